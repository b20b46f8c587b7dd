use nalgebra::{UnitQuaternion, Vector3};

/// Rotation built from euler angles in radians, applied around Z, then X, then Y.
pub fn euler_rotation(euler_angles: &Vector3<f32>) -> UnitQuaternion<f32> {
    UnitQuaternion::from_axis_angle(&Vector3::y_axis(), euler_angles.y)
        * UnitQuaternion::from_axis_angle(&Vector3::x_axis(), euler_angles.x)
        * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), euler_angles.z)
}

pub fn yaw_rotation(yaw: f32) -> UnitQuaternion<f32> {
    UnitQuaternion::from_axis_angle(&Vector3::y_axis(), yaw)
}

pub fn rotate_point_around_pivot(
    point: &Vector3<f32>,
    pivot: &Vector3<f32>,
    euler_angles: &Vector3<f32>,
) -> Vector3<f32> {
    euler_rotation(euler_angles) * (point - pivot) + pivot
}
