use crate::attach_task::{AttachResult, AttachTask};
use crate::connectivity_tracker::ConnectivityTracker;
use crate::constants::CONTACT_HALF_EXTENT;
use crate::doorway::DoorwayId;
use crate::dungeon_world::DungeonWorld;
use crate::error::GenerationError;
use crate::placement_engine::AttachConfig;
use crate::room::RoomId;
use crate::room_catalog::RoomCatalog;
use crate::scheduler::Scheduler;
use crate::world_registry::{Instantiate, WorldRegistry};
use nalgebra::Vector3;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

pub struct DungeonConfig {
    pub room_size: usize,              // Rooms to grow before remaining doorways are closed
    pub seed: Option<u64>,             // Seed value for random dungeon generation
    pub start_template: Option<usize>, // Catalog index of the first room, random if None
    pub attach: AttachConfig,
    pub contact_half_extent: f32,
    pub max_ticks: usize, // Tick limit for each scheduler run
}

impl Default for DungeonConfig {
    fn default() -> Self {
        DungeonConfig {
            room_size: 20,
            seed: None,
            start_template: None,
            attach: AttachConfig::default(),
            contact_half_extent: CONTACT_HALF_EXTENT,
            max_ticks: 10_000,
        }
    }
}

#[derive(Debug)]
pub struct DungeonResult {
    pub world: DungeonWorld,
    pub start_room_id: RoomId,
    pub attach_results: Vec<(DoorwayId, AttachResult)>,
}

impl DungeonResult {
    pub fn attached_rooms(&self) -> usize {
        self.attach_results
            .iter()
            .filter(|(_, result)| matches!(result, AttachResult::Attached { .. }))
            .count()
    }

    pub fn blocked_doorways(&self) -> usize {
        self.attach_results
            .iter()
            .filter(|(_, result)| matches!(result, AttachResult::Blocked { .. }))
            .count()
    }
}

/// Grows a dungeon from a start room at the origin in waves of attach tasks, one task per
/// open doorway, oldest doorways first. A wave spawns no more tasks than rooms left in the
/// budget; doorways it skips wait for the next wave. Once `room_size` rooms exist, or
/// nothing is left to grow from, every doorway still open is closed with the filler.
pub fn generate_dungeon<C: RoomCatalog>(
    config: DungeonConfig,
    catalog: &C,
) -> Result<DungeonResult, GenerationError> {
    catalog.validate()?;

    let mut rng: rand::rngs::StdRng = config
        .seed
        .map(SeedableRng::seed_from_u64)
        .unwrap_or_else(rand::rngs::StdRng::from_entropy);

    let mut world = DungeonWorld::new(&config.attach);
    let start_index = config
        .start_template
        .unwrap_or_else(|| rng.gen_range(0..catalog.candidate_templates().len()));
    let start_template = catalog.template(start_index)?;
    let start_room_id = world.instantiate(start_template, Vector3::zeros(), 0.0, None)?;
    world.register_placed_room(start_room_id)?;

    let mut scheduler = Scheduler::new(ConnectivityTracker::new(config.contact_half_extent));
    let mut attach_results = Vec::new();
    let mut room_count = 1;
    let mut open_doorways: VecDeque<DoorwayId> = world
        .room(start_room_id)?
        .unconnected_doorways()
        .map(|doorway| doorway.id)
        .collect();

    while room_count < config.room_size {
        let budget = config.room_size - room_count;
        if spawn_wave(&mut scheduler, &world, &mut open_doorways, budget) == 0 {
            break;
        }
        let results = scheduler.run_to_completion(
            catalog,
            &mut world,
            &config.attach,
            &mut rng,
            config.max_ticks,
        )?;
        for (_, result) in results.iter() {
            if let AttachResult::Attached { room_id, .. } = result {
                room_count += 1;
                open_doorways.extend(
                    world
                        .room(*room_id)?
                        .unconnected_doorways()
                        .map(|doorway| doorway.id),
                );
            }
        }
        attach_results.extend(results);
    }

    for anchor in world.unconnected_doorways() {
        scheduler.spawn(AttachTask::filler_only(anchor));
    }
    attach_results.extend(scheduler.run_to_completion(
        catalog,
        &mut world,
        &config.attach,
        &mut rng,
        config.max_ticks,
    )?);

    log::info!(
        "generated dungeon with {} rooms ({} placed by filler) in {} ticks",
        room_count,
        world.rooms.len() - room_count,
        scheduler.ticks()
    );

    Ok(DungeonResult {
        world,
        start_room_id,
        attach_results,
    })
}

/// Spawns attach tasks for up to `budget` doorways that are still open, oldest first.
/// Doorways beyond the budget stay queued.
fn spawn_wave(
    scheduler: &mut Scheduler,
    world: &DungeonWorld,
    open_doorways: &mut VecDeque<DoorwayId>,
    budget: usize,
) -> usize {
    // rooms placed since the doorway was queued may have closed it
    open_doorways.retain(|id| {
        world
            .doorway(*id)
            .is_some_and(|doorway| !doorway.is_connected())
    });
    let count = budget.min(open_doorways.len());
    for anchor in open_doorways.drain(..count) {
        scheduler.spawn(AttachTask::new(anchor));
    }
    count
}
