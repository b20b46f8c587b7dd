use crate::bounds::Bounds;
use crate::room::RoomId;
use crate::rotate_point_around_pivot::yaw_rotation;
use nalgebra::Vector3;

/// Opening on a room template, in the template's local frame.
#[derive(Clone, Debug)]
pub struct DoorwayTemplate {
    pub local_position: Vector3<f32>,
    pub local_forward: Vector3<f32>, // outward facing
}

impl DoorwayTemplate {
    pub fn new(local_position: Vector3<f32>, local_forward: Vector3<f32>) -> Self {
        DoorwayTemplate {
            local_position,
            local_forward: local_forward.normalize(),
        }
    }
}

#[derive(Ord, PartialOrd, PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub struct DoorwayId {
    pub room_id: RoomId,
    pub index: usize,
}

impl DoorwayId {
    pub fn new(room_id: RoomId, index: usize) -> Self {
        DoorwayId { room_id, index }
    }
}

/// Opening of a placed room. The owning room is referenced by id only.
#[derive(Clone, Debug)]
pub struct Doorway {
    pub id: DoorwayId,
    pub local_position: Vector3<f32>,
    pub local_forward: Vector3<f32>,
    pub world_position: Vector3<f32>,
    pub world_forward: Vector3<f32>,
    connected: bool,
    sensing: bool,
}

impl Doorway {
    pub fn place(
        id: DoorwayId,
        template: &DoorwayTemplate,
        room_position: &Vector3<f32>,
        room_yaw: f32,
    ) -> Self {
        let rotation = yaw_rotation(room_yaw);
        Doorway {
            id,
            local_position: template.local_position,
            local_forward: template.local_forward,
            world_position: room_position + rotation * template.local_position,
            world_forward: rotation * template.local_forward,
            connected: false,
            sensing: true,
        }
    }

    pub fn room_id(&self) -> RoomId {
        self.id.room_id
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// The only way connection state changes. Returns true on the unconnected -> connected
    /// transition; a connected doorway stays connected.
    pub fn mark_connected(&mut self) -> bool {
        let changed = !self.connected;
        self.connected = true;
        changed
    }

    pub fn is_sensing(&self) -> bool {
        self.sensing
    }

    pub fn disable_sensing(&mut self) {
        self.sensing = false;
    }

    pub fn trigger_volume(&self, half_extent: f32) -> Bounds {
        Bounds::new(
            self.world_position,
            Vector3::new(half_extent, half_extent, half_extent),
        )
    }
}
