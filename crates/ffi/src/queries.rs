use forest_fire_core::{Particle, ParticleConfig, SimulationStats};
use std::{ptr, slice};

use crate::error::{DefaultForestFireError, ForestFireErrorCode};
use crate::helpers::{handle_ffi_result_error, instance_from_ptr, track_error, with_simulation};
use crate::instance::ForestFireInstance;
use crate::simulation::grid_coordinate;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
/// FFI-friendly drawing data for one particle.
/// Keep this layout stable for C/C++/C# consumers.
pub struct ParticleVisual {
    /// Position in cells (multiply by the cell size for pixels).
    pub x: f32,
    pub y: f32,
    /// Draw radius.
    pub size: f32,
    /// Fade factor in `[0, 1]`: remaining life over the kind's maximum life.
    pub alpha: f32,
    /// Remaining ticks.
    pub life: u32,
    pub is_smoke: bool,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ParticleVisual {
    fn new(particle: &Particle, config: &ParticleConfig) -> Self {
        let position = particle.position();
        let color = particle.color();
        Self {
            x: position.x,
            y: position.y,
            size: particle.size(),
            alpha: particle.alpha(config),
            life: particle.life(),
            is_smoke: particle.is_smoke(),
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        }
    }
}

/// Population counts, filled by `forest_fire_get_stats`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForestFireStats {
    pub tick: u64,
    pub empty: usize,
    pub trees: usize,
    pub burning: usize,
    pub burnt: usize,
    pub flame_particles: usize,
    pub smoke_particles: usize,
}

impl From<SimulationStats> for ForestFireStats {
    fn from(stats: SimulationStats) -> Self {
        Self {
            tick: stats.tick,
            empty: stats.empty,
            trees: stats.trees,
            burning: stats.burning,
            burnt: stats.burnt,
            flame_particles: stats.flame_particles,
            smoke_particles: stats.smoke_particles,
        }
    }
}

/// Grid dimensions in cells.
///
/// # Safety
/// - `ptr` must be null or a valid pointer returned by `forest_fire_new`.
/// - `out_width` and `out_height` must be valid, non-null pointers.
#[no_mangle]
pub unsafe extern "C" fn forest_fire_get_dimensions(
    ptr: *const ForestFireInstance,
    out_width: *mut usize,
    out_height: *mut usize,
) -> ForestFireErrorCode {
    if out_width.is_null() {
        return track_error(&DefaultForestFireError::null_pointer("out_width"));
    }
    if out_height.is_null() {
        return track_error(&DefaultForestFireError::null_pointer("out_height"));
    }

    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let (width, height) = with_simulation(instance, |sim| (sim.width(), sim.height()))?;
        unsafe {
            *out_width = width;
            *out_height = height;
        }
        Ok(())
    })
}

/// State of one cell: 0 = Empty, 1 = Tree, 2 = Burning, 3 = Burnt.
///
/// Returns `ForestFireErrorCode::OutOfBounds` for coordinates outside the grid.
///
/// # Safety
/// - `ptr` must be null or a valid pointer returned by `forest_fire_new`.
/// - `out_state` must be a valid, non-null pointer.
#[no_mangle]
pub unsafe extern "C" fn forest_fire_get_cell_state(
    ptr: *const ForestFireInstance,
    x: i32,
    y: i32,
    out_state: *mut u8,
) -> ForestFireErrorCode {
    if out_state.is_null() {
        return track_error(&DefaultForestFireError::null_pointer("out_state"));
    }

    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let state = with_simulation(instance, |sim| {
            let (x, y) = grid_coordinate(x, y, sim.width(), sim.height())?;
            sim.cell_state(x, y).map_err(DefaultForestFireError::from)
        })??;
        unsafe {
            *out_state = state.as_u8();
        }
        Ok(())
    })
}

/// Remaining burn of one cell as a fraction of the burn time, for flicker shading.
///
/// # Safety
/// - `ptr` must be null or a valid pointer returned by `forest_fire_new`.
/// - `out_intensity` must be a valid, non-null pointer.
#[no_mangle]
pub unsafe extern "C" fn forest_fire_get_burn_intensity(
    ptr: *const ForestFireInstance,
    x: i32,
    y: i32,
    out_intensity: *mut f32,
) -> ForestFireErrorCode {
    if out_intensity.is_null() {
        return track_error(&DefaultForestFireError::null_pointer("out_intensity"));
    }

    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let intensity = with_simulation(instance, |sim| {
            let (x, y) = grid_coordinate(x, y, sim.width(), sim.height())?;
            sim.burn_intensity(x, y).map_err(DefaultForestFireError::from)
        })??;
        unsafe {
            *out_intensity = intensity;
        }
        Ok(())
    })
}

/// Copy the whole grid into caller-owned buffers in row-major order.
///
/// - `out_states`: receives one state byte per cell (see `forest_fire_get_cell_state`).
/// - `out_burn_remaining`: receives the burn countdown per cell; may be null.
/// - `capacity`: length of each buffer in elements; must be at least `width * height`.
///
/// Returns `ForestFireErrorCode::InvalidParameter` if `capacity` is too small; nothing
/// is written in that case.
///
/// # Safety
/// - `ptr` must be null or a valid pointer returned by `forest_fire_new`.
/// - `out_states` must point to at least `capacity` writable bytes.
/// - `out_burn_remaining` must be null or point to at least `capacity` writable `u32`s.
#[no_mangle]
pub unsafe extern "C" fn forest_fire_copy_cells(
    ptr: *const ForestFireInstance,
    out_states: *mut u8,
    out_burn_remaining: *mut u32,
    capacity: usize,
) -> ForestFireErrorCode {
    if out_states.is_null() {
        return track_error(&DefaultForestFireError::null_pointer("out_states"));
    }

    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_simulation(instance, |sim| {
            let cells = sim.cells();
            if capacity < cells.len() {
                return Err(DefaultForestFireError::invalid_parameter(format!(
                    "Buffer holds {capacity} cells but the grid has {}",
                    cells.len()
                )));
            }

            // SAFETY: the caller guarantees `capacity` elements; we write only `cells.len()`.
            let states = unsafe { slice::from_raw_parts_mut(out_states, cells.len()) };
            for (out, state) in states.iter_mut().zip(cells.states()) {
                *out = state.as_u8();
            }

            if !out_burn_remaining.is_null() {
                let burn = unsafe { slice::from_raw_parts_mut(out_burn_remaining, cells.len()) };
                burn.copy_from_slice(cells.burn_remaining());
            }
            Ok(())
        })?
    })
}

#[no_mangle]
/// Return a borrowed pointer to a cached snapshot of every live particle.
///
/// The buffer is reused between calls to avoid per-frame allocations. The returned
/// pointer is valid until the next call to this function or to
/// `forest_fire_clear_particle_snapshot`. **DO NOT FREE THIS POINTER**.
///
/// Returns
/// - `ForestFireErrorCode::Ok` on success with the array in `out_array` and count in `out_len`
/// - `ForestFireErrorCode::NullPointer` if `ptr`, `out_len`, or `out_array` is null
/// - `ForestFireErrorCode::LockPoisoned` if an internal lock is poisoned
///
/// # Safety
///
/// - `ptr` must be a valid pointer returned by `forest_fire_new` or null.
/// - `out_len` must be a valid, non-null pointer to a `usize`.
/// - `out_array` must be a valid, non-null pointer to a `*const ParticleVisual`.
///
/// # Example Usage (C++)
/// ```cpp
/// uintptr_t len = 0;
/// const ParticleVisual* particles = nullptr;
/// if (forest_fire_get_particles(sim, &len, &particles) == ForestFireErrorCode::Ok) {
///     for (uintptr_t i = 0; i < len; i++) {
///         draw_particle(particles[i]);
///     }
/// }
/// ```
pub unsafe extern "C" fn forest_fire_get_particles(
    ptr: *const ForestFireInstance,
    out_len: *mut usize,
    out_array: *mut *const ParticleVisual,
) -> ForestFireErrorCode {
    if out_len.is_null() {
        return track_error(&DefaultForestFireError::null_pointer("out_len"));
    }

    if out_array.is_null() {
        unsafe {
            *out_len = 0;
        }
        return track_error(&DefaultForestFireError::null_pointer("out_array"));
    }

    let result = handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let mut snapshot = instance
            .particle_snapshot
            .lock()
            .map_err(|_| DefaultForestFireError::lock_poisoned("Mutex"))?;
        snapshot.clear();

        with_simulation(instance, |sim| {
            let config = &sim.config().particles;
            snapshot.extend(
                sim.particles()
                    .iter()
                    .map(|particle| ParticleVisual::new(particle, config)),
            );
        })?;

        unsafe {
            *out_len = snapshot.len();
            *out_array = snapshot.as_ptr();
        }
        Ok(())
    });

    if result != ForestFireErrorCode::Ok {
        unsafe {
            *out_array = ptr::null();
            *out_len = 0;
        }
    }

    result
}

#[no_mangle]
/// Clear the cached particle snapshot and release its memory.
///
/// Invalidates any pointer previously returned by `forest_fire_get_particles`.
///
/// # Safety
/// `ptr` must be null or a valid pointer returned by `forest_fire_new`.
pub unsafe extern "C" fn forest_fire_clear_particle_snapshot(
    ptr: *const ForestFireInstance,
) -> ForestFireErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let mut snapshot = instance
            .particle_snapshot
            .lock()
            .map_err(|_| DefaultForestFireError::lock_poisoned("Mutex"))?;
        snapshot.clear();
        snapshot.shrink_to_fit();
        Ok(())
    })
}

/// Population counts for the grid and particle system.
///
/// # Safety
/// - `ptr` must be null or a valid pointer returned by `forest_fire_new`.
/// - `out_stats` must be a valid, non-null pointer.
#[no_mangle]
pub unsafe extern "C" fn forest_fire_get_stats(
    ptr: *const ForestFireInstance,
    out_stats: *mut ForestFireStats,
) -> ForestFireErrorCode {
    if out_stats.is_null() {
        return track_error(&DefaultForestFireError::null_pointer("out_stats"));
    }

    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let stats = with_simulation(instance, forest_fire_core::Simulation::stats)?;
        unsafe {
            *out_stats = ForestFireStats::from(stats);
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::{
        forest_fire_default_config, forest_fire_destroy, forest_fire_new, ForestFireConfig,
    };
    use crate::simulation::{forest_fire_ignite_random, forest_fire_tick};

    fn instance(width: usize, height: usize) -> *mut ForestFireInstance {
        let config = ForestFireConfig {
            width,
            height,
            seed: 4,
            use_seed: true,
            ..forest_fire_default_config()
        };
        let mut instance: *mut ForestFireInstance = ptr::null_mut();
        assert_eq!(
            unsafe { forest_fire_new(&config, &mut instance) },
            ForestFireErrorCode::Ok
        );
        instance
    }

    #[test]
    fn test_dimensions_and_cell_state() {
        let sim = instance(12, 7);
        let (mut width, mut height) = (0usize, 0usize);
        let code = unsafe { forest_fire_get_dimensions(sim, &mut width, &mut height) };
        assert_eq!(code, ForestFireErrorCode::Ok);
        assert_eq!((width, height), (12, 7));

        let mut state = u8::MAX;
        let code = unsafe { forest_fire_get_cell_state(sim, 11, 6, &mut state) };
        assert_eq!(code, ForestFireErrorCode::Ok);
        assert!(state <= 3);

        let code = unsafe { forest_fire_get_cell_state(sim, 12, 0, &mut state) };
        assert_eq!(code, ForestFireErrorCode::OutOfBounds);
        unsafe { forest_fire_destroy(sim) };
    }

    #[test]
    fn test_copy_cells_matches_stats() {
        let sim = instance(16, 16);
        let mut ignited = false;
        for _ in 0..20 {
            unsafe { forest_fire_ignite_random(sim, &mut ignited) };
        }

        let mut states = vec![0u8; 256];
        let mut burn = vec![0u32; 256];
        let code = unsafe {
            forest_fire_copy_cells(sim, states.as_mut_ptr(), burn.as_mut_ptr(), states.len())
        };
        assert_eq!(code, ForestFireErrorCode::Ok);

        let mut stats = ForestFireStats::default();
        assert_eq!(
            unsafe { forest_fire_get_stats(sim, &mut stats) },
            ForestFireErrorCode::Ok
        );
        assert_eq!(states.iter().filter(|&&s| s == 1).count(), stats.trees);
        assert_eq!(states.iter().filter(|&&s| s == 2).count(), stats.burning);
        assert_eq!(burn.iter().filter(|&&b| b > 0).count(), stats.burning);

        let code =
            unsafe { forest_fire_copy_cells(sim, states.as_mut_ptr(), ptr::null_mut(), 255) };
        assert_eq!(code, ForestFireErrorCode::InvalidParameter);
        unsafe { forest_fire_destroy(sim) };
    }

    #[test]
    fn test_particle_snapshot_tracks_simulation() {
        let sim = instance(30, 30);
        let mut ignited = false;
        while !ignited {
            unsafe { forest_fire_ignite_random(sim, &mut ignited) };
        }
        for _ in 0..40 {
            unsafe { forest_fire_tick(sim, 45.0, 5.0, ptr::null_mut()) };
        }

        let mut len = 0usize;
        let mut array: *const ParticleVisual = ptr::null();
        let code = unsafe { forest_fire_get_particles(sim, &mut len, &mut array) };
        assert_eq!(code, ForestFireErrorCode::Ok);

        let mut stats = ForestFireStats::default();
        unsafe { forest_fire_get_stats(sim, &mut stats) };
        assert_eq!(len, stats.flame_particles + stats.smoke_particles);
        if len > 0 {
            let particles = unsafe { slice::from_raw_parts(array, len) };
            assert!(particles.iter().all(|p| (0.0..=1.0).contains(&p.alpha)));
            assert_eq!(
                particles.iter().filter(|p| p.is_smoke).count(),
                stats.smoke_particles
            );
        }

        assert_eq!(
            unsafe { forest_fire_clear_particle_snapshot(sim) },
            ForestFireErrorCode::Ok
        );
        unsafe { forest_fire_destroy(sim) };
    }

    #[test]
    fn test_null_outputs_are_rejected() {
        let sim = instance(4, 4);
        let mut len = 7usize;
        let code = unsafe { forest_fire_get_particles(sim, &mut len, ptr::null_mut()) };
        assert_eq!(code, ForestFireErrorCode::NullPointer);
        assert_eq!(len, 0);
        assert_eq!(
            unsafe { forest_fire_get_stats(sim, ptr::null_mut()) },
            ForestFireErrorCode::NullPointer
        );
        unsafe { forest_fire_destroy(sim) };
    }
}
