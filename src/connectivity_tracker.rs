use crate::bounds::Bounds;
use crate::constants::CONTACT_HALF_EXTENT;
use crate::doorway::DoorwayId;
use crate::doorway_link::DoorwayLink;
use crate::dungeon_world::DungeonWorld;
use crate::error::GenerationError;
use crate::world_registry::WorldRegistry;

/// Marks doorways connected when their trigger volumes touch a doorway of another room.
#[derive(Clone, Debug)]
pub struct ConnectivityTracker {
    pub contact_half_extent: f32,
}

impl Default for ConnectivityTracker {
    fn default() -> Self {
        ConnectivityTracker {
            contact_half_extent: CONTACT_HALF_EXTENT,
        }
    }
}

impl ConnectivityTracker {
    pub fn new(contact_half_extent: f32) -> Self {
        ConnectivityTracker {
            contact_half_extent,
        }
    }

    /// Rebuilds the contact index from the rooms placed so far and applies every contact.
    /// Sensing flags are read once up front, so both sides of a contact register in the
    /// same tick. Returns the links that are new this tick.
    pub fn tick(&self, world: &mut DungeonWorld) -> Result<Vec<DoorwayLink>, GenerationError> {
        let contacts = self.contacts(world);
        let mut new_links = Vec::new();
        for (doorway0_id, doorway1_id) in contacts {
            for (sensing_id, other_id) in [(doorway0_id, doorway1_id), (doorway1_id, doorway0_id)] {
                world.mark_doorway_connected(other_id)?;
                world.disable_sensing(sensing_id)?;
            }
            let link = DoorwayLink::new(doorway0_id, doorway1_id);
            if world.add_link(link) {
                log::debug!("doorways {:?} and {:?} are in contact", doorway0_id, doorway1_id);
                new_links.push(link);
            }
        }
        Ok(new_links)
    }

    fn contacts(&self, world: &DungeonWorld) -> Vec<(DoorwayId, DoorwayId)> {
        let index: Vec<(DoorwayId, Bounds)> = world
            .placed_rooms()
            .into_iter()
            .flat_map(|room| room.doorways.iter())
            .filter(|doorway| doorway.is_sensing())
            .map(|doorway| (doorway.id, doorway.trigger_volume(self.contact_half_extent)))
            .collect();

        let mut contacts = Vec::new();
        for (i, (id0, volume0)) in index.iter().enumerate() {
            for (id1, volume1) in &index[(i + 1)..] {
                if id0.room_id != id1.room_id && volume0.intersects(volume1, 0.0) {
                    contacts.push((*id0, *id1));
                }
            }
        }
        contacts
    }
}
