use forest_fire_core::{FireRules, ParticleConfig, Simulation, SimulationConfig};
use std::ptr;
use std::sync::{Mutex, RwLock};

use crate::error::{DefaultForestFireError, ForestFireErrorCode};
use crate::helpers::{track_error, track_result};
use crate::queries::ParticleVisual;

/// C mirror of the simulation configuration.
///
/// Obtain one from `forest_fire_default_config()` and override the fields you need.
/// Particle motion tuning not listed here keeps its defaults.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForestFireConfig {
    /// Grid width in cells (> 0).
    pub width: usize,
    /// Grid height in cells (> 0).
    pub height: usize,
    /// Seed for the random source, used only when `use_seed` is true.
    pub seed: u64,
    pub use_seed: bool,
    /// Per-tick chance an empty cell grows a tree.
    pub growth_probability: f32,
    /// Per-tick chance a tree is struck by lightning.
    pub lightning_probability: f32,
    /// Base per-tick chance a burning neighbour ignites a tree.
    pub fire_spread_probability: f32,
    /// Ticks a tree burns before turning to ash (>= 1).
    pub burn_time: u32,
    /// Multiplier on `growth_probability` for ash clearing back to empty ground.
    pub regrowth_from_ash_factor: f32,
    /// Upper clamp for wind strength passed to `forest_fire_tick`.
    pub max_wind_strength: f32,
    /// Per-tick chance a burning cell emits a flame particle.
    pub flame_emission_probability: f32,
    /// Per-tick chance a burning cell emits a smoke particle.
    pub smoke_emission_probability: f32,
}

impl From<&SimulationConfig> for ForestFireConfig {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            seed: config.seed.unwrap_or(0),
            use_seed: config.seed.is_some(),
            growth_probability: config.fire.growth_probability,
            lightning_probability: config.fire.lightning_probability,
            fire_spread_probability: config.fire.fire_spread_probability,
            burn_time: config.fire.burn_time,
            regrowth_from_ash_factor: config.fire.regrowth_from_ash_factor,
            max_wind_strength: config.max_wind_strength,
            flame_emission_probability: config.particles.flame_emission_probability,
            smoke_emission_probability: config.particles.smoke_emission_probability,
        }
    }
}

impl From<&ForestFireConfig> for SimulationConfig {
    fn from(config: &ForestFireConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            seed: config.use_seed.then_some(config.seed),
            max_wind_strength: config.max_wind_strength,
            fire: FireRules {
                growth_probability: config.growth_probability,
                lightning_probability: config.lightning_probability,
                fire_spread_probability: config.fire_spread_probability,
                burn_time: config.burn_time,
                regrowth_from_ash_factor: config.regrowth_from_ash_factor,
            },
            particles: ParticleConfig {
                flame_emission_probability: config.flame_emission_probability,
                smoke_emission_probability: config.smoke_emission_probability,
                ..ParticleConfig::default()
            },
            ..SimulationConfig::default()
        }
    }
}

/// The forest fire simulation context handed across the C boundary.
///
/// # Thread Safety
/// The simulation sits behind an `RwLock`: queries take the read lock and may run
/// concurrently, `forest_fire_tick` and the other mutating calls take the write lock.
/// The particle snapshot buffer has its own `Mutex`.
pub struct ForestFireInstance {
    pub(crate) sim: RwLock<Simulation>,
    /// Reused by `forest_fire_get_particles` to avoid per-frame allocations.
    pub(crate) particle_snapshot: Mutex<Vec<ParticleVisual>>,
}

impl ForestFireInstance {
    /// Creates a new instance from a C configuration.
    ///
    /// # Errors
    ///
    /// Returns `ForestFireErrorCode::InvalidParameter` if the configuration fails validation.
    pub(crate) fn new(config: &ForestFireConfig) -> Result<Box<Self>, DefaultForestFireError> {
        let sim = Simulation::new(SimulationConfig::from(config))?;

        Ok(Box::new(Self {
            sim: RwLock::new(sim),
            particle_snapshot: Mutex::new(Vec::new()),
        }))
    }
}

/// Default configuration: 80x80 grid, unseeded, stock fire and particle rules.
#[no_mangle]
pub extern "C" fn forest_fire_default_config() -> ForestFireConfig {
    ForestFireConfig::from(&SimulationConfig::default())
}

/// Create a new forest fire instance and return it via out-parameter.
///
/// - Returns `ForestFireErrorCode::Ok` (0) on success with valid instance in `out_instance`
/// - Returns non-zero error code on failure with `out_instance` set to null
///
/// Parameters
/// - `config`: configuration to use, or null for `forest_fire_default_config()`.
/// - `out_instance`: pointer to receive the created instance. Must be non-null.
///
/// Returns
/// - `ForestFireErrorCode::Ok` - success
/// - `ForestFireErrorCode::NullPointer` - `out_instance` is null
/// - `ForestFireErrorCode::InvalidParameter` - a configuration value was rejected
///
/// Call `forest_fire_get_last_error()` for a human-readable description.
///
/// # Safety
///
/// - `config` must be null or point to a valid `ForestFireConfig`.
/// - `out_instance` must be a valid, non-null pointer to writable memory.
/// - The caller takes ownership of the returned instance and MUST call
///   `forest_fire_destroy` exactly once.
///
/// Example (C++)
/// ```cpp
/// ForestFireConfig config = forest_fire_default_config();
/// config.width = 120;
/// ForestFireInstance* sim = nullptr;
/// if (forest_fire_new(&config, &sim) != ForestFireErrorCode::Ok) {
///     fprintf(stderr, "Failed to create simulation: %s\n", forest_fire_get_last_error());
///     return;
/// }
/// // ... use sim ...
/// forest_fire_destroy(sim);
/// ```
#[no_mangle]
pub unsafe extern "C" fn forest_fire_new(
    config: *const ForestFireConfig,
    out_instance: *mut *mut ForestFireInstance,
) -> ForestFireErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultForestFireError::null_pointer("out_instance"));
    }

    // SAFETY: null selects the defaults; anything else is valid per the caller contract.
    let config = unsafe { config.as_ref() }
        .copied()
        .unwrap_or_else(|| forest_fire_default_config());

    match track_result(ForestFireInstance::new(&config)) {
        Ok(instance) => {
            unsafe {
                *out_instance = Box::into_raw(instance);
            }
            ForestFireErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                *out_instance = ptr::null_mut();
            }
            code
        }
    }
}

/// Destroys an instance previously created by `forest_fire_new`.
///
/// If `ptr` is null, this function is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by `forest_fire_new` and not freed already.
/// - After calling this function, the caller must not use the pointer again.
#[no_mangle]
pub unsafe extern "C" fn forest_fire_destroy(ptr: *mut ForestFireInstance) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: the pointer came from `Box::into_raw` in `forest_fire_new` and is freed once.
    unsafe {
        drop(Box::from_raw(ptr));
    }
}
