use crate::bounds::Bounds;
use crate::constants::CollisionChannel;
use crate::doorway::{Doorway, DoorwayId};
use crate::error::GenerationError;
use crate::room::{Room, RoomId, RoomTemplate};
use nalgebra::Vector3;

/// Placed rooms and the obstacle set consulted by overlap tests.
pub trait WorldRegistry {
    /// Adds the room's world bounds to the obstacle set on the room-bounds channel.
    fn register_placed_room(&mut self, room_id: RoomId) -> Result<(), GenerationError>;

    fn query_overlap(&self, bounds: &Bounds, channel: CollisionChannel) -> bool;

    fn placed_rooms(&self) -> Vec<&Room>;

    fn doorway(&self, id: DoorwayId) -> Option<&Doorway>;

    /// Single entry point for the unconnected -> connected transition.
    fn mark_doorway_connected(&mut self, id: DoorwayId) -> Result<bool, GenerationError>;
}

pub trait Instantiate {
    fn instantiate(
        &mut self,
        template: &RoomTemplate,
        position: Vector3<f32>,
        yaw: f32,
        parent: Option<DoorwayId>,
    ) -> Result<RoomId, GenerationError>;
}
