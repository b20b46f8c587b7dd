use crate::constants::BoundsFit;
use crate::rotate_point_around_pivot::yaw_rotation;
use nalgebra::Vector3;

/// Axis-aligned box given by its center and half extents.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Bounds {
    pub center: Vector3<f32>,
    pub half_extents: Vector3<f32>,
}

impl Bounds {
    pub fn new(center: Vector3<f32>, half_extents: Vector3<f32>) -> Self {
        Bounds {
            center,
            half_extents: half_extents.abs(),
        }
    }

    pub fn from_size(center: Vector3<f32>, size: Vector3<f32>) -> Self {
        Bounds::new(center, size * 0.5)
    }

    /// Boxes intersect when they interpenetrate by more than `tolerance` along every axis.
    /// Boxes that only share a face are not intersecting.
    pub fn intersects(&self, other: &Bounds, tolerance: f32) -> bool {
        let distance = (self.center - other.center).abs();
        let reach = self.half_extents + other.half_extents;
        (0..3).all(|axis| reach[axis] - distance[axis] > tolerance)
    }

    pub fn contains_point(&self, point: &Vector3<f32>) -> bool {
        let distance = (point - self.center).abs();
        (0..3).all(|axis| distance[axis] <= self.half_extents[axis])
    }

    /// Places a room-local box into the world for a room at `position` turned by `yaw`.
    pub fn to_world(&self, position: &Vector3<f32>, yaw: f32, fit: BoundsFit) -> Bounds {
        let rotation = yaw_rotation(yaw);
        Bounds {
            center: position + rotation * self.center,
            half_extents: fit_half_extents(&self.half_extents, yaw, fit),
        }
    }
}

pub fn fit_half_extents(half_extents: &Vector3<f32>, yaw: f32, fit: BoundsFit) -> Vector3<f32> {
    match fit {
        BoundsFit::Unrotated => *half_extents,
        BoundsFit::RotatedEnclosing => {
            let matrix = yaw_rotation(yaw).to_rotation_matrix().into_inner().abs();
            matrix * half_extents
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::bounds::Bounds;
    use crate::constants::{BoundsFit, OVERLAP_TOLERANCE};
    use nalgebra::Vector3;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_overlapping_boxes_intersect() {
        let a = Bounds::new(Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0));
        let b = Bounds::new(Vector3::new(1.5, 0.5, -0.5), Vector3::new(1.0, 1.0, 1.0));
        assert!(a.intersects(&b, OVERLAP_TOLERANCE));
        assert!(b.intersects(&a, OVERLAP_TOLERANCE));
    }

    #[test]
    fn test_touching_faces_do_not_intersect() {
        let a = Bounds::new(Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0));
        let b = Bounds::new(Vector3::new(0.0, 0.0, 2.0), Vector3::new(1.0, 1.0, 1.0));
        assert!(!a.intersects(&b, OVERLAP_TOLERANCE));
        let flat = Bounds::new(Vector3::new(0.0, 0.0, 1.0), Vector3::new(0.5, 0.5, 0.0));
        assert!(!a.intersects(&flat, OVERLAP_TOLERANCE));
    }

    #[test]
    fn test_separated_on_one_axis() {
        let a = Bounds::new(Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0));
        let b = Bounds::new(Vector3::new(0.0, 3.0, 0.0), Vector3::new(1.0, 1.0, 1.0));
        assert!(!a.intersects(&b, OVERLAP_TOLERANCE));
    }

    #[test]
    fn test_world_extents_by_fit() {
        let local = Bounds::new(Vector3::new(0.0, 0.0, 2.0), Vector3::new(1.0, 1.0, 3.0));
        let unrotated = local.to_world(&Vector3::zeros(), FRAC_PI_2, BoundsFit::Unrotated);
        assert!((unrotated.center - Vector3::new(2.0, 0.0, 0.0)).norm() < 1e-5);
        assert!((unrotated.half_extents - Vector3::new(1.0, 1.0, 3.0)).norm() < 1e-5);

        let enclosing = local.to_world(&Vector3::zeros(), FRAC_PI_2, BoundsFit::RotatedEnclosing);
        assert!((enclosing.half_extents - Vector3::new(3.0, 1.0, 1.0)).norm() < 1e-5);
    }

    #[test]
    fn test_from_size_and_contains() {
        let bounds = Bounds::from_size(Vector3::new(0.0, 1.0, 0.0), Vector3::new(4.0, 2.0, 4.0));
        assert_eq!(bounds.half_extents, Vector3::new(2.0, 1.0, 2.0));
        assert!(bounds.contains_point(&Vector3::new(2.0, 0.0, 0.0)));
        assert!(!bounds.contains_point(&Vector3::new(2.5, 0.0, 0.0)));
    }
}
