pub const MAX_ATTACH_ATTEMPTS: usize = 50;
pub const OVERLAP_TOLERANCE: f32 = 1e-3;
pub const CONTACT_HALF_EXTENT: f32 = 0.25;

#[derive(Ord, PartialOrd, PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum CollisionChannel {
    RoomBounds,
    Decoration,
    Trigger,
}

/// How a room's local half extents are carried into world space.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default)]
pub enum BoundsFit {
    /// Extents are used as-is regardless of the room's yaw.
    #[default]
    Unrotated,
    /// Axis-aligned box enclosing the rotated local box.
    RotatedEnclosing,
}
