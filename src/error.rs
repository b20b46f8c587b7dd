use crate::doorway::DoorwayId;
use crate::room::RoomId;
use thiserror::Error;

/// Fatal failures of dungeon generation. Rejected placements and an exhausted
/// retry budget are recovered locally and never surface here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("room catalog has no candidate templates")]
    EmptyCatalog,

    #[error("room catalog has no filler template")]
    MissingFillerTemplate,

    #[error("no room template at index {index}")]
    MissingTemplate { index: usize },

    #[error("room template '{name}' has no doorways")]
    TemplateWithoutDoorways { name: String },

    #[error("filler template failed to close doorway {anchor:?} after {attempts} attempts")]
    FillerPlacementFailed { anchor: DoorwayId, attempts: usize },

    #[error("unknown doorway {0:?}")]
    UnknownDoorway(DoorwayId),

    #[error("unknown room {0:?}")]
    UnknownRoom(RoomId),

    #[error("scheduler still had pending tasks after {ticks} ticks")]
    SchedulerStalled { ticks: usize },
}
