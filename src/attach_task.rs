use crate::doorway::DoorwayId;
use crate::error::GenerationError;
use crate::placement_engine::{Placement, PlacementEngine};
use crate::room::RoomId;
use crate::room_catalog::RoomCatalog;
use crate::world_registry::{Instantiate, WorldRegistry};
use rand::Rng;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AttachResult {
    Attached { room_id: RoomId, attempts: usize },
    /// No candidate fit within the budget and the filler closed the doorway.
    Blocked { room_id: RoomId, attempts: usize },
    AlreadyConnected,
    Cancelled,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TaskStatus {
    Pending,
    Finished(AttachResult),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum AttachState {
    Start,
    Searching,
    Settling(AttachResult),
    Finished(AttachResult),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum AttachMode {
    Candidates,
    FillerOnly,
}

/// Spawns a neighbour for one doorway across several scheduler ticks.
///
/// `resume` yields once on entry and once right after a room is placed, so the
/// connectivity tracker sees the new room before the task reports completion.
#[derive(Clone, Debug)]
pub struct AttachTask {
    anchor: DoorwayId,
    mode: AttachMode,
    state: AttachState,
}

impl AttachTask {
    pub fn new(anchor: DoorwayId) -> Self {
        AttachTask {
            anchor,
            mode: AttachMode::Candidates,
            state: AttachState::Start,
        }
    }

    /// Closes the doorway with the filler template without trying candidates.
    pub fn filler_only(anchor: DoorwayId) -> Self {
        AttachTask {
            anchor,
            mode: AttachMode::FillerOnly,
            state: AttachState::Start,
        }
    }

    pub fn anchor(&self) -> DoorwayId {
        self.anchor
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, AttachState::Finished(_))
    }

    /// A room was placed on the last resume and the task has not reported it yet.
    pub fn has_placed(&self) -> bool {
        matches!(self.state, AttachState::Settling(_))
    }

    /// Stops the task. Rooms already placed stay placed; nothing is ever half placed
    /// because a placement completes within a single resume.
    pub fn cancel(&mut self) {
        if !self.is_finished() {
            log::warn!("attach task for doorway {:?} cancelled", self.anchor);
            self.state = AttachState::Finished(AttachResult::Cancelled);
        }
    }

    pub fn resume<C, W, R>(
        &mut self,
        engine: &mut PlacementEngine<C, W>,
        rng: &mut R,
    ) -> Result<TaskStatus, GenerationError>
    where
        C: RoomCatalog,
        W: WorldRegistry + Instantiate,
        R: Rng,
    {
        match self.state {
            AttachState::Start => {
                self.state = AttachState::Searching;
                Ok(TaskStatus::Pending)
            }
            AttachState::Searching => {
                let anchor = engine
                    .world()
                    .doorway(self.anchor)
                    .ok_or(GenerationError::UnknownDoorway(self.anchor))?;
                if anchor.is_connected() {
                    return Ok(self.finish(AttachResult::AlreadyConnected));
                }
                let result = self.search(engine, rng)?;
                self.state = AttachState::Settling(result);
                Ok(TaskStatus::Pending)
            }
            AttachState::Settling(result) => Ok(self.finish(result)),
            AttachState::Finished(result) => Ok(TaskStatus::Finished(result)),
        }
    }

    fn finish(&mut self, result: AttachResult) -> TaskStatus {
        self.state = AttachState::Finished(result);
        TaskStatus::Finished(result)
    }

    fn search<C, W, R>(
        &self,
        engine: &mut PlacementEngine<C, W>,
        rng: &mut R,
    ) -> Result<AttachResult, GenerationError>
    where
        C: RoomCatalog,
        W: WorldRegistry + Instantiate,
        R: Rng,
    {
        let mut attempts = 0;
        if self.mode == AttachMode::Candidates {
            while attempts < engine.config().max_attempts {
                attempts += 1;
                if let Placement::Placed(room_id) =
                    engine.attempt_random_candidate(self.anchor, rng)?
                {
                    return Ok(AttachResult::Attached { room_id, attempts });
                }
            }
            log::info!(
                "no room fits doorway {:?} after {} attempts, placing filler",
                self.anchor,
                attempts
            );
        }

        match engine.attempt_filler(self.anchor, rng)? {
            Placement::Placed(room_id) => Ok(AttachResult::Blocked { room_id, attempts }),
            Placement::Rejected => Err(GenerationError::FillerPlacementFailed {
                anchor: self.anchor,
                attempts,
            }),
        }
    }
}
