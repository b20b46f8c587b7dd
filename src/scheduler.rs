use crate::attach_task::{AttachResult, AttachTask, TaskStatus};
use crate::connectivity_tracker::ConnectivityTracker;
use crate::doorway::DoorwayId;
use crate::dungeon_world::DungeonWorld;
use crate::error::GenerationError;
use crate::placement_engine::{AttachConfig, PlacementEngine};
use crate::room_catalog::RoomCatalog;
use rand::Rng;

/// Cooperative single-threaded runner for attach tasks.
///
/// Every tick first refreshes connectivity, then resumes each pending task once, in
/// spawn order. Connectivity is refreshed again right after any task places a room, so
/// a sibling whose doorway the new room landed on sees it connected when it resumes.
#[derive(Debug)]
pub struct Scheduler {
    tasks: Vec<AttachTask>,
    tracker: ConnectivityTracker,
    ticks: usize,
}

impl Scheduler {
    pub fn new(tracker: ConnectivityTracker) -> Self {
        Scheduler {
            tasks: Vec::new(),
            tracker,
            ticks: 0,
        }
    }

    pub fn spawn(&mut self, task: AttachTask) {
        self.tasks.push(task);
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }

    pub fn cancel_all(&mut self) {
        for task in self.tasks.iter_mut() {
            task.cancel();
        }
    }

    pub fn tick<C, R>(
        &mut self,
        catalog: &C,
        world: &mut DungeonWorld,
        config: &AttachConfig,
        rng: &mut R,
    ) -> Result<Vec<(DoorwayId, AttachResult)>, GenerationError>
    where
        C: RoomCatalog,
        R: Rng,
    {
        self.ticks += 1;
        self.tracker.tick(world)?;

        let mut finished = Vec::new();
        for task in self.tasks.iter_mut() {
            let status = {
                let mut engine = PlacementEngine::new(catalog, &mut *world, config);
                task.resume(&mut engine, rng)?
            };
            if task.has_placed() {
                self.tracker.tick(world)?;
            }
            if let TaskStatus::Finished(result) = status {
                finished.push((task.anchor(), result));
            }
        }
        self.tasks.retain(|task| !task.is_finished());
        Ok(finished)
    }

    /// Ticks until every task has finished, plus one tick so the last placements
    /// register their contacts. `max_ticks` bounds this run only.
    pub fn run_to_completion<C, R>(
        &mut self,
        catalog: &C,
        world: &mut DungeonWorld,
        config: &AttachConfig,
        rng: &mut R,
        max_ticks: usize,
    ) -> Result<Vec<(DoorwayId, AttachResult)>, GenerationError>
    where
        C: RoomCatalog,
        R: Rng,
    {
        let mut results = Vec::new();
        let started_at = self.ticks;
        while !self.tasks.is_empty() {
            let ticks = self.ticks - started_at;
            if ticks >= max_ticks {
                self.cancel_all();
                self.tasks.clear();
                return Err(GenerationError::SchedulerStalled { ticks });
            }
            results.extend(self.tick(catalog, world, config, rng)?);
        }
        self.tracker.tick(world)?;
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use crate::attach_task::{AttachResult, AttachTask};
    use crate::connectivity_tracker::ConnectivityTracker;
    use crate::doorway::DoorwayId;
    use crate::dungeon_world::DungeonWorld;
    use crate::error::GenerationError;
    use crate::placement_engine::AttachConfig;
    use crate::room_catalog::Catalog;
    use crate::scheduler::Scheduler;
    use crate::world_registry::{Instantiate, WorldRegistry};
    use nalgebra::Vector3;
    use rand::SeedableRng;

    fn start_world(config: &AttachConfig, catalog: &Catalog) -> (DungeonWorld, Vec<DoorwayId>) {
        let mut world = DungeonWorld::new(config);
        let start = world
            .instantiate(&catalog.templates[0], Vector3::zeros(), 0.0, None)
            .unwrap();
        world.register_placed_room(start).unwrap();
        let anchors = world.unconnected_doorways();
        (world, anchors)
    }

    #[test]
    fn test_siblings_interleave_without_overlap() {
        let config = AttachConfig::default();
        let catalog = Catalog::default();
        let (mut world, anchors) = start_world(&config, &catalog);
        let mut scheduler = Scheduler::new(ConnectivityTracker::default());
        for anchor in &anchors {
            scheduler.spawn(AttachTask::new(*anchor));
        }
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);

        // entry yield for all four tasks
        assert!(scheduler
            .tick(&catalog, &mut world, &config, &mut rng)
            .unwrap()
            .is_empty());
        assert_eq!(world.rooms.len(), 1);

        let results = scheduler
            .run_to_completion(&catalog, &mut world, &config, &mut rng, 100)
            .unwrap();
        assert_eq!(results.len(), 4);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.ticks(), 3);
        for (anchor, _) in &results {
            assert!(world.doorway(*anchor).unwrap().is_connected());
        }

        let rooms = world.placed_rooms();
        for (i, room0) in rooms.iter().enumerate() {
            for room1 in &rooms[(i + 1)..] {
                assert!(!room0
                    .world_bounds
                    .intersects(&room1.world_bounds, config.overlap_tolerance));
            }
        }
        // each new room's aligned doorway registered one tick after placement
        assert_eq!(world.rooms.len(), 5);
        assert!(world.links().len() >= 4);
    }

    #[test]
    fn test_sibling_sees_doorway_placed_on_its_anchor() {
        let config = AttachConfig::default();
        let catalog = Catalog::default();
        let corridor = catalog.templates[1].clone();
        let corridors = Catalog {
            templates: vec![corridor.clone()],
            filler: catalog.filler.clone(),
        };
        let mut world = DungeonWorld::new(&config);
        // one corridor length of empty space between the two doorways
        let first = world
            .instantiate(&corridor, Vector3::zeros(), 0.0, None)
            .unwrap();
        let second = world
            .instantiate(&corridor, Vector3::new(0.0, 0.0, 8.0), 0.0, None)
            .unwrap();
        world.register_placed_room(first).unwrap();
        world.register_placed_room(second).unwrap();
        let north = DoorwayId::new(first, 0);
        let south = DoorwayId::new(second, 1);

        let mut scheduler = Scheduler::new(ConnectivityTracker::default());
        scheduler.spawn(AttachTask::new(north));
        scheduler.spawn(AttachTask::new(south));
        let mut rng = rand::rngs::StdRng::seed_from_u64(4);
        let results = scheduler
            .run_to_completion(&corridors, &mut world, &config, &mut rng, 10)
            .unwrap();

        assert!(matches!(
            results.as_slice(),
            [
                (b, AttachResult::AlreadyConnected),
                (a, AttachResult::Attached { attempts: 1, .. }),
            ] if *a == north && *b == south
        ));
        assert_eq!(world.rooms.len(), 3);
        assert!(world
            .rooms
            .values()
            .all(|room| room.template_name == "corridor"));
        assert!(world.doorway(south).unwrap().is_connected());
        assert_eq!(world.unconnected_doorways().len(), 2);
    }

    #[test]
    fn test_tick_limit_applies_per_run() {
        let config = AttachConfig::default();
        let catalog = Catalog::default();
        let (mut world, anchors) = start_world(&config, &catalog);
        let mut scheduler = Scheduler::new(ConnectivityTracker::default());
        let mut rng = rand::rngs::StdRng::seed_from_u64(2);
        for anchor in &anchors[..2] {
            scheduler.spawn(AttachTask::new(*anchor));
            let results = scheduler
                .run_to_completion(&catalog, &mut world, &config, &mut rng, 3)
                .unwrap();
            assert_eq!(results.len(), 1);
        }
        assert_eq!(scheduler.ticks(), 6);
        assert_eq!(world.rooms.len(), 3);
    }

    #[test]
    fn test_stall_cancels_tasks() {
        let config = AttachConfig::default();
        let catalog = Catalog::default();
        let (mut world, anchors) = start_world(&config, &catalog);
        let mut scheduler = Scheduler::new(ConnectivityTracker::default());
        scheduler.spawn(AttachTask::new(anchors[0]));
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        assert_eq!(
            scheduler.run_to_completion(&catalog, &mut world, &config, &mut rng, 1),
            Err(GenerationError::SchedulerStalled { ticks: 1 })
        );
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(world.rooms.len(), 1);
    }

    #[test]
    fn test_results_report_attempts() {
        let config = AttachConfig::default();
        let catalog = Catalog::default();
        let (mut world, anchors) = start_world(&config, &catalog);
        let mut scheduler = Scheduler::new(ConnectivityTracker::default());
        scheduler.spawn(AttachTask::filler_only(anchors[0]));
        let mut rng = rand::rngs::StdRng::seed_from_u64(9);
        let results = scheduler
            .run_to_completion(&catalog, &mut world, &config, &mut rng, 10)
            .unwrap();
        assert!(matches!(
            results.as_slice(),
            [(_, AttachResult::Blocked { attempts: 0, .. })]
        ));
    }
}
