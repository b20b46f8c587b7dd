use nalgebra::Vector3;

/// Signed angle in radians about +Y that turns `from` onto `to`.
/// Only the XZ components are considered; a vertical or zero input yields 0.
pub fn signed_yaw_between(from: &Vector3<f32>, to: &Vector3<f32>) -> f32 {
    let a = Vector3::new(from.x, 0.0, from.z);
    let b = Vector3::new(to.x, 0.0, to.z);
    if a.norm_squared() <= f32::EPSILON || b.norm_squared() <= f32::EPSILON {
        return 0.0;
    }

    let cross_y = a.z * b.x - a.x * b.z;
    let dot = a.x * b.x + a.z * b.z;
    cross_y.atan2(dot)
}
