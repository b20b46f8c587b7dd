use crate::bounds::Bounds;
use crate::constants::{BoundsFit, CollisionChannel};
use crate::doorway::{Doorway, DoorwayId};
use crate::doorway_link::DoorwayLink;
use crate::error::GenerationError;
use crate::placement_engine::AttachConfig;
use crate::room::{Room, RoomId, RoomTemplate};
use crate::world_registry::{Instantiate, WorldRegistry};
use nalgebra::Vector3;
use pathfinding::prelude::bfs_reach;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Debug)]
pub struct Collider {
    pub owner: Option<RoomId>,
    pub bounds: Bounds,
    pub channel: CollisionChannel,
}

/// Every placed room, the obstacle set and the doorway links found so far.
#[derive(Debug)]
pub struct DungeonWorld {
    pub rooms: BTreeMap<RoomId, Room>,
    colliders: Vec<Collider>,
    links: BTreeSet<DoorwayLink>,
    room_id: RoomId,
    bounds_fit: BoundsFit,
    overlap_tolerance: f32,
}

impl DungeonWorld {
    pub fn new(config: &AttachConfig) -> Self {
        DungeonWorld {
            rooms: BTreeMap::new(),
            colliders: Vec::new(),
            links: BTreeSet::new(),
            room_id: RoomId::first(),
            bounds_fit: config.bounds_fit,
            overlap_tolerance: config.overlap_tolerance,
        }
    }

    pub fn room(&self, room_id: RoomId) -> Result<&Room, GenerationError> {
        self.rooms
            .get(&room_id)
            .ok_or(GenerationError::UnknownRoom(room_id))
    }

    fn doorway_mut(&mut self, id: DoorwayId) -> Result<&mut Doorway, GenerationError> {
        self.rooms
            .get_mut(&id.room_id)
            .and_then(|room| room.doorway_mut(id.index))
            .ok_or(GenerationError::UnknownDoorway(id))
    }

    /// Colliders on channels other than room bounds never block placement.
    pub fn add_collider(
        &mut self,
        owner: Option<RoomId>,
        bounds: Bounds,
        channel: CollisionChannel,
    ) {
        self.colliders.push(Collider {
            owner,
            bounds,
            channel,
        });
    }

    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    pub fn disable_sensing(&mut self, id: DoorwayId) -> Result<(), GenerationError> {
        self.doorway_mut(id)?.disable_sensing();
        Ok(())
    }

    pub fn add_link(&mut self, link: DoorwayLink) -> bool {
        self.links.insert(link)
    }

    pub fn links(&self) -> &BTreeSet<DoorwayLink> {
        &self.links
    }

    pub fn unconnected_doorways(&self) -> Vec<DoorwayId> {
        self.rooms
            .values()
            .flat_map(|room| room.unconnected_doorways().map(|doorway| doorway.id))
            .collect()
    }

    /// Rooms reachable from `start` through placement parents and doorway links.
    pub fn reachable_rooms(&self, start: RoomId) -> BTreeSet<RoomId> {
        let mut neighbors: BTreeMap<RoomId, BTreeSet<RoomId>> = BTreeMap::new();
        let edges = self
            .rooms
            .values()
            .filter_map(|room| room.attached_to.map(|anchor| (room.id, anchor.room_id)))
            .chain(
                self.links
                    .iter()
                    .map(|link| (link.doorway0_id.room_id, link.doorway1_id.room_id)),
            );
        for (room0_id, room1_id) in edges {
            neighbors.entry(room0_id).or_default().insert(room1_id);
            neighbors.entry(room1_id).or_default().insert(room0_id);
        }
        bfs_reach(start, |room_id| {
            neighbors
                .get(room_id)
                .map(|ids| ids.iter().copied().collect::<Vec<_>>())
                .unwrap_or_default()
        })
        .collect()
    }
}

impl WorldRegistry for DungeonWorld {
    fn register_placed_room(&mut self, room_id: RoomId) -> Result<(), GenerationError> {
        let bounds = self.room(room_id)?.world_bounds;
        let registered = self.colliders.iter().any(|collider| {
            collider.owner == Some(room_id) && collider.channel == CollisionChannel::RoomBounds
        });
        if !registered {
            self.add_collider(Some(room_id), bounds, CollisionChannel::RoomBounds);
        }
        Ok(())
    }

    fn query_overlap(&self, bounds: &Bounds, channel: CollisionChannel) -> bool {
        self.colliders.iter().any(|collider| {
            collider.channel == channel
                && collider.bounds.intersects(bounds, self.overlap_tolerance)
        })
    }

    fn placed_rooms(&self) -> Vec<&Room> {
        self.rooms.values().collect()
    }

    fn doorway(&self, id: DoorwayId) -> Option<&Doorway> {
        self.rooms
            .get(&id.room_id)
            .and_then(|room| room.doorway(id.index))
    }

    fn mark_doorway_connected(&mut self, id: DoorwayId) -> Result<bool, GenerationError> {
        Ok(self.doorway_mut(id)?.mark_connected())
    }
}

impl Instantiate for DungeonWorld {
    fn instantiate(
        &mut self,
        template: &RoomTemplate,
        position: Vector3<f32>,
        yaw: f32,
        parent: Option<DoorwayId>,
    ) -> Result<RoomId, GenerationError> {
        if let Some(anchor) = parent {
            self.room(anchor.room_id)?;
        }
        let room_id = self.room_id.gen_id();
        self.rooms.insert(
            room_id,
            Room::new(room_id, template, position, yaw, self.bounds_fit, parent),
        );
        Ok(room_id)
    }
}
