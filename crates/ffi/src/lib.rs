//! C ABI for the forest fire simulation
//!
//! Every call takes an opaque `ForestFireInstance*` from `forest_fire_new` and reports
//! failure through `ForestFireErrorCode`, with a per-thread message available from
//! `forest_fire_get_last_error`. The header `ForestFireFFI.h` is generated by cbindgen
//! at build time.

mod error;
mod helpers;
mod instance;
mod queries;
mod simulation;

pub use error::{forest_fire_get_last_error, forest_fire_get_last_error_code, ForestFireErrorCode};
pub use instance::{
    forest_fire_default_config, forest_fire_destroy, forest_fire_new, ForestFireConfig,
    ForestFireInstance,
};
pub use queries::{
    forest_fire_clear_particle_snapshot, forest_fire_copy_cells, forest_fire_get_burn_intensity,
    forest_fire_get_cell_state, forest_fire_get_dimensions, forest_fire_get_particles,
    forest_fire_get_stats, ForestFireStats, ParticleVisual,
};
pub use simulation::{
    forest_fire_ignite_at, forest_fire_ignite_random, forest_fire_initialize, forest_fire_reset,
    forest_fire_tick, ForestFireTickSummary,
};
