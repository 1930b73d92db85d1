use forest_fire_core::TickReport;

use crate::error::{DefaultForestFireError, ForestFireErrorCode};
use crate::helpers::{handle_ffi_result_error, instance_from_ptr, with_simulation_mut};
use crate::instance::ForestFireInstance;

/// Summary of one tick, filled by `forest_fire_tick`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForestFireTickSummary {
    /// Tick number after this tick (first tick reports 1).
    pub tick: u64,
    /// Empty cells that grew a tree.
    pub grown: usize,
    /// Trees ignited by lightning.
    pub lightning_strikes: usize,
    /// Trees ignited by a burning neighbour.
    pub spread_ignitions: usize,
    /// Burning cells that turned to ash.
    pub burned_out: usize,
    /// Ash cells that cleared to empty ground.
    pub regrown: usize,
    pub particles_spawned: usize,
    pub particles_expired: usize,
}

impl From<TickReport> for ForestFireTickSummary {
    fn from(report: TickReport) -> Self {
        Self {
            tick: report.tick,
            grown: report.grid.grown,
            lightning_strikes: report.grid.lightning_strikes,
            spread_ignitions: report.grid.spread_ignitions,
            burned_out: report.grid.burned_out,
            regrown: report.grid.regrown,
            particles_spawned: report.particles.spawned,
            particles_expired: report.particles.expired,
        }
    }
}

/// Convert C grid coordinates, rejecting negatives the same way as coordinates past the edge.
pub(crate) fn grid_coordinate(
    x: i32,
    y: i32,
    width: usize,
    height: usize,
) -> Result<(usize, usize), DefaultForestFireError> {
    match (usize::try_from(x), usize::try_from(y)) {
        (Ok(x), Ok(y)) => Ok((x, y)),
        _ => Err(DefaultForestFireError::out_of_bounds(
            i64::from(x),
            i64::from(y),
            width,
            height,
        )),
    }
}

/// Advance the simulation by one tick with this frame's wind.
///
/// Thread-safe: acquires the `RwLock` write lock.
///
/// - `wind_direction_degrees`: 0 = up, 90 = right; wrapped into `[0, 360)`.
/// - `wind_strength`: clamped into `[0, max_wind_strength]`.
/// - `out_summary`: receives the tick summary; may be null.
///
/// Returns
/// - `ForestFireErrorCode::Ok` on success
/// - `ForestFireErrorCode::NullPointer` if `ptr` is null
/// - `ForestFireErrorCode::LockPoisoned` if the internal lock is poisoned
///
/// # Safety
/// - `ptr` must be null or a valid pointer returned by `forest_fire_new`.
/// - `out_summary` must be null or a valid pointer to writable memory.
#[no_mangle]
pub unsafe extern "C" fn forest_fire_tick(
    ptr: *const ForestFireInstance,
    wind_direction_degrees: f32,
    wind_strength: f32,
    out_summary: *mut ForestFireTickSummary,
) -> ForestFireErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let report = with_simulation_mut(instance, |sim| {
            sim.tick(wind_direction_degrees, wind_strength).report
        })?;

        if !out_summary.is_null() {
            unsafe {
                *out_summary = ForestFireTickSummary::from(report);
            }
        }
        Ok(())
    })
}

/// Reallocate the grid at new dimensions, reseed it and clear all particles.
///
/// Returns
/// - `ForestFireErrorCode::Ok` on success
/// - `ForestFireErrorCode::InvalidParameter` if either dimension is zero (grid unchanged)
/// - `ForestFireErrorCode::NullPointer` / `LockPoisoned` as usual
///
/// # Safety
/// `ptr` must be null or a valid pointer returned by `forest_fire_new`.
#[no_mangle]
pub unsafe extern "C" fn forest_fire_initialize(
    ptr: *const ForestFireInstance,
    width: usize,
    height: usize,
) -> ForestFireErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_simulation_mut(instance, |sim| sim.initialize(width, height))??;
        Ok(())
    })
}

/// Regrow the forest with the seeding law and clear all particles.
///
/// # Safety
/// `ptr` must be null or a valid pointer returned by `forest_fire_new`.
#[no_mangle]
pub unsafe extern "C" fn forest_fire_reset(ptr: *const ForestFireInstance) -> ForestFireErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_simulation_mut(instance, forest_fire_core::Simulation::reset)?;
        Ok(())
    })
}

/// Strike a uniformly random cell; it ignites only if it holds a tree.
///
/// - `out_ignited`: receives whether a tree caught fire; may be null.
///
/// # Safety
/// - `ptr` must be null or a valid pointer returned by `forest_fire_new`.
/// - `out_ignited` must be null or a valid pointer to a `bool`.
#[no_mangle]
pub unsafe extern "C" fn forest_fire_ignite_random(
    ptr: *const ForestFireInstance,
    out_ignited: *mut bool,
) -> ForestFireErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let ignited = with_simulation_mut(instance, |sim| sim.ignite_random().is_some())?;

        if !out_ignited.is_null() {
            unsafe {
                *out_ignited = ignited;
            }
        }
        Ok(())
    })
}

/// Set the tree at `(x, y)` burning.
///
/// - `out_ignited`: receives whether the cell held a tree and caught fire; may be null.
///
/// Returns
/// - `ForestFireErrorCode::Ok` on success, even when the cell wasn't a tree
/// - `ForestFireErrorCode::OutOfBounds` for coordinates outside the grid (never clamped)
/// - `ForestFireErrorCode::NullPointer` / `LockPoisoned` as usual
///
/// # Safety
/// - `ptr` must be null or a valid pointer returned by `forest_fire_new`.
/// - `out_ignited` must be null or a valid pointer to a `bool`.
#[no_mangle]
pub unsafe extern "C" fn forest_fire_ignite_at(
    ptr: *const ForestFireInstance,
    x: i32,
    y: i32,
    out_ignited: *mut bool,
) -> ForestFireErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let ignited = with_simulation_mut(instance, |sim| {
            let (x, y) = grid_coordinate(x, y, sim.width(), sim.height())?;
            sim.ignite_at(x, y).map_err(DefaultForestFireError::from)
        })??;

        if !out_ignited.is_null() {
            unsafe {
                *out_ignited = ignited;
            }
        }
        Ok(())
    })
}
