pub mod attach_task;
pub mod bounds;
pub mod constants;
pub mod connectivity_tracker;
pub mod doorway;
pub mod doorway_link;
pub mod dungeon_world;
pub mod error;
pub mod generate_dungeon;
pub mod placement_engine;
pub mod room;
pub mod room_catalog;
pub mod rotate_point_around_pivot;
pub mod scheduler;
pub mod signed_yaw_between;
pub mod world_registry;
