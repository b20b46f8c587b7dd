use crate::doorway::DoorwayId;
use std::hash::{Hash, Hasher};

/// Two doorways found in contact. The pair is unordered.
#[derive(Debug, Clone, Copy)]
pub struct DoorwayLink {
    pub doorway0_id: DoorwayId,
    pub doorway1_id: DoorwayId,
}

impl DoorwayLink {
    pub fn new(doorway0_id: DoorwayId, doorway1_id: DoorwayId) -> Self {
        if doorway0_id <= doorway1_id {
            DoorwayLink {
                doorway0_id,
                doorway1_id,
            }
        } else {
            DoorwayLink {
                doorway0_id: doorway1_id,
                doorway1_id: doorway0_id,
            }
        }
    }
}

impl Eq for DoorwayLink {}

impl PartialEq for DoorwayLink {
    fn eq(&self, other: &Self) -> bool {
        self.doorway0_id == other.doorway0_id && self.doorway1_id == other.doorway1_id
    }
}

impl Hash for DoorwayLink {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.doorway0_id, self.doorway1_id).hash(state);
    }
}

impl PartialOrd for DoorwayLink {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DoorwayLink {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.doorway0_id, self.doorway1_id).cmp(&(other.doorway0_id, other.doorway1_id))
    }
}
