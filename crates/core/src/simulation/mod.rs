//! Forest fire simulation aggregate
//!
//! `Simulation` owns the grid, the particle system, the current wind and the random
//! source, and is the only surface the presentation layer talks to:
//! - `tick` advances grid and particles together with the wind of this frame
//! - `ignite_random` / `ignite_at` / `reset` / `initialize` are applied between ticks
//! - everything else is a read of committed state

pub mod snapshot;
pub mod stats;

pub use snapshot::{ParticleSnapshot, SimulationSnapshot, TickResult};
pub use stats::{SimulationStats, TickReport};

use crate::core_types::config::{validate_dimensions, SimulationConfig};
use crate::core_types::particle::{EmissionEvent, Particle};
use crate::error::Result;
use crate::grid::{CellField, CellState, ForestGrid, WindField};
use crate::particles::ParticleSystem;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Forest fire simulation with flame and smoke particles
pub struct Simulation {
    config: SimulationConfig,
    grid: ForestGrid,
    particles: ParticleSystem,
    wind: WindField,
    rng: StdRng,
    /// Reused between ticks to avoid a per-tick allocation
    emissions: Vec<EmissionEvent>,
    tick: u64,
    last_report: TickReport,
}

impl Simulation {
    /// Create a simulation with a freshly seeded forest
    ///
    /// # Arguments
    ///
    /// * `config` - Grid size, fire rules, particle tuning and optional seed
    ///
    /// # Errors
    ///
    /// Returns the first validation error in `config`.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = Self::make_rng(config.seed);
        let grid = ForestGrid::seeded(config.width, config.height, &mut rng)?;

        info!(
            "Forest fire simulation initialized: {}x{} grid, {} trees, seed={:?}",
            config.width,
            config.height,
            grid.counts().trees,
            config.seed
        );

        Ok(Self::assemble(config, grid, rng))
    }

    /// Create a simulation around a prepared grid.
    ///
    /// The grid's dimensions replace `config.width` / `config.height`.
    ///
    /// # Errors
    ///
    /// Returns the first validation error in `config`.
    pub fn with_grid(mut config: SimulationConfig, grid: ForestGrid) -> Result<Self> {
        config.width = grid.width();
        config.height = grid.height();
        config.validate()?;
        let rng = Self::make_rng(config.seed);

        info!(
            "Forest fire simulation initialized from prepared {}x{} grid",
            config.width, config.height
        );

        Ok(Self::assemble(config, grid, rng))
    }

    fn assemble(config: SimulationConfig, grid: ForestGrid, rng: StdRng) -> Self {
        Self {
            config,
            grid,
            particles: ParticleSystem::new(),
            wind: WindField::calm(),
            rng,
            emissions: Vec::new(),
            tick: 0,
            last_report: TickReport::default(),
        }
    }

    fn make_rng(seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Reallocate the grid at new dimensions and reseed it.
    ///
    /// Particles are cleared and the tick counter restarts.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SimulationError::InvalidDimensions`] if either side is zero; the
    /// current grid is left untouched in that case.
    pub fn initialize(&mut self, width: usize, height: usize) -> Result<()> {
        validate_dimensions(width, height)?;
        self.grid = ForestGrid::seeded(width, height, &mut self.rng)?;
        self.config.width = width;
        self.config.height = height;
        self.restart();

        info!(
            "Forest resized to {}x{}: {} trees",
            width,
            height,
            self.grid.counts().trees
        );
        Ok(())
    }

    /// Regrow the forest with the seeding law and clear all particles
    pub fn reset(&mut self) {
        self.grid.reseed(&mut self.rng);
        self.restart();

        info!("Forest reset: {} trees", self.grid.counts().trees);
    }

    fn restart(&mut self) {
        self.particles.clear();
        self.emissions.clear();
        self.tick = 0;
        self.last_report = TickReport::default();
    }

    /// Strike a uniformly random cell; it ignites only if it holds a tree.
    ///
    /// Returns the ignited coordinate, or `None` if the strike hit something else.
    pub fn ignite_random(&mut self) -> Option<(usize, usize)> {
        let x = self.rng.random_range(0..self.grid.width());
        let y = self.rng.random_range(0..self.grid.height());

        match self.grid.ignite(x, y, self.config.fire.burn_time) {
            Ok(true) => {
                info!("Ignited random tree at ({}, {})", x, y);
                Some((x, y))
            }
            _ => {
                debug!("Random ignition at ({}, {}) found no tree", x, y);
                None
            }
        }
    }

    /// Set the tree at `(x, y)` burning.
    ///
    /// Returns `false` when the cell isn't a tree.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SimulationError::OutOfBounds`] for coordinates outside the grid.
    pub fn ignite_at(&mut self, x: usize, y: usize) -> Result<bool> {
        let ignited = self.grid.ignite(x, y, self.config.fire.burn_time)?;
        if ignited {
            info!("Ignited tree at ({}, {})", x, y);
        }
        Ok(ignited)
    }

    /// Replace the wind from raw UI values and return the normalized field
    pub fn set_wind(&mut self, direction_degrees: f32, strength: f32) -> WindField {
        let wind = WindField::new(direction_degrees, strength, self.config.max_wind_strength);
        if *wind.direction() != direction_degrees || wind.strength() != strength {
            debug!(
                "Wind input normalized: ({}, {}) -> ({}, {})",
                direction_degrees,
                strength,
                wind.direction(),
                wind.strength()
            );
        }
        self.wind = wind;
        wind
    }

    /// Advance one tick with this frame's wind
    ///
    /// # Arguments
    ///
    /// * `wind_direction_degrees` - 0 = up, 90 = right; wrapped into `[0, 360)`
    /// * `wind_strength` - clamped into `[0, max_wind_strength]`
    pub fn tick(&mut self, wind_direction_degrees: f32, wind_strength: f32) -> TickResult<'_> {
        self.set_wind(wind_direction_degrees, wind_strength);
        let report = self.step();

        TickResult {
            report,
            cells: self.grid.cells(),
            particles: self.particles.particles(),
        }
    }

    /// Advance one tick with the wind from the last `tick` / `set_wind`
    pub fn step(&mut self) -> TickReport {
        self.emissions.clear();
        let grid_report = self.grid.step(
            &self.wind,
            &self.config.fire,
            &self.config.particles,
            &mut self.rng,
            &mut self.emissions,
        );
        let particle_report = self.particles.advance(
            &self.wind,
            &self.emissions,
            &self.config.particles,
            &mut self.rng,
        );
        self.tick += 1;

        let report = TickReport {
            tick: self.tick,
            grid: grid_report,
            particles: particle_report,
        };
        self.last_report = report;

        debug!(
            "Tick {}: ignitions={}, burned_out={}, particles=+{}/-{} ({} live), wind={} @ {:.1}",
            self.tick,
            report.ignitions(),
            grid_report.burned_out,
            particle_report.spawned,
            particle_report.expired,
            self.particles.len(),
            self.wind.direction(),
            self.wind.strength()
        );

        report
    }

    /// State of the cell at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns [`crate::SimulationError::OutOfBounds`] for coordinates outside the grid.
    pub fn cell_state(&self, x: usize, y: usize) -> Result<CellState> {
        self.grid.state(x, y)
    }

    /// Burn countdown of the cell at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns [`crate::SimulationError::OutOfBounds`] for coordinates outside the grid.
    pub fn burn_remaining(&self, x: usize, y: usize) -> Result<u32> {
        self.grid.burn_remaining(x, y)
    }

    /// Remaining burn as a fraction of `burn_time`, for flicker shading.
    ///
    /// 1.0 for a freshly ignited tree, falling toward 0 as it burns out; 0 for cells
    /// that aren't burning.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SimulationError::OutOfBounds`] for coordinates outside the grid.
    pub fn burn_intensity(&self, x: usize, y: usize) -> Result<f32> {
        let remaining = self.grid.burn_remaining(x, y)?;
        Ok((remaining as f32 / self.config.fire.burn_time as f32).min(1.0))
    }

    pub fn particles(&self) -> &[Particle] {
        self.particles.particles()
    }

    pub fn cells(&self) -> &CellField {
        self.grid.cells()
    }

    pub fn grid(&self) -> &ForestGrid {
        &self.grid
    }

    pub fn wind(&self) -> WindField {
        self.wind
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Ticks since construction, resize or reset
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Report of the most recent tick
    pub fn last_report(&self) -> TickReport {
        self.last_report
    }

    pub fn stats(&self) -> SimulationStats {
        SimulationStats::new(self.tick, self.grid.counts(), self.particles.counts())
    }

    /// Owned copy of the full state, particles with their fade alpha precomputed
    pub fn snapshot(&self) -> SimulationSnapshot {
        let cells = self.grid.cells();
        SimulationSnapshot {
            tick: self.tick,
            width: cells.width(),
            height: cells.height(),
            wind: self.wind,
            states: cells.states().to_vec(),
            burn_remaining: cells.burn_remaining().to_vec(),
            particles: self
                .particles
                .particles()
                .iter()
                .map(|p| ParticleSnapshot::from_particle(p, &self.config.particles))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::config::FireRules;
    use crate::error::SimulationError;

    fn quiet_config(seed: u64) -> SimulationConfig {
        SimulationConfig {
            seed: Some(seed),
            fire: FireRules {
                growth_probability: 0.0,
                lightning_probability: 0.0,
                ..FireRules::default()
            },
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = SimulationConfig {
            height: 0,
            ..SimulationConfig::default()
        };
        assert!(Simulation::new(config).is_err());
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = Simulation::new(SimulationConfig::seeded(42)).unwrap();
        let mut b = Simulation::new(SimulationConfig::seeded(42)).unwrap();
        assert_eq!(a.ignite_random(), b.ignite_random());
        for _ in 0..20 {
            a.tick(90.0, 5.0);
            b.tick(90.0, 5.0);
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_tick_normalizes_wind() {
        let mut sim = Simulation::new(quiet_config(1)).unwrap();
        sim.tick(-45.0, 42.0);
        assert_eq!(*sim.wind().direction(), 315.0);
        assert_eq!(sim.wind().strength(), 10.0);
    }

    #[test]
    fn test_ignite_at_out_of_bounds() {
        let mut sim = Simulation::new(quiet_config(1)).unwrap();
        assert_eq!(
            sim.ignite_at(80, 0),
            Err(SimulationError::OutOfBounds {
                x: 80,
                y: 0,
                width: 80,
                height: 80
            })
        );
        assert!(sim.cell_state(0, 80).is_err());
    }

    #[test]
    fn test_burn_intensity() {
        let grid = ForestGrid::from_states(2, 1, &[CellState::Tree, CellState::Empty], 300)
            .unwrap();
        let mut sim = Simulation::with_grid(quiet_config(3), grid).unwrap();
        assert!(sim.ignite_at(0, 0).unwrap());
        assert_eq!(sim.burn_intensity(0, 0).unwrap(), 1.0);
        assert_eq!(sim.burn_intensity(1, 0).unwrap(), 0.0);

        sim.tick(0.0, 0.0);
        assert!((sim.burn_intensity(0, 0).unwrap() - 299.0 / 300.0).abs() < 1e-6);
    }

    #[test]
    fn test_initialize_resizes_and_clears() {
        let mut sim = Simulation::new(quiet_config(9)).unwrap();
        while sim.ignite_random().is_none() {}
        for _ in 0..5 {
            sim.tick(0.0, 3.0);
        }

        sim.initialize(20, 10).unwrap();
        assert_eq!((sim.width(), sim.height()), (20, 10));
        assert_eq!(sim.config().width, 20);
        assert_eq!(sim.tick_count(), 0);
        assert!(sim.particles().is_empty());
        assert_eq!(sim.stats().burning, 0);

        assert!(sim.initialize(0, 10).is_err());
        assert_eq!((sim.width(), sim.height()), (20, 10));
    }

    #[test]
    fn test_stats_match_snapshot() {
        let mut sim = Simulation::new(quiet_config(5)).unwrap();
        while sim.ignite_random().is_none() {}
        for _ in 0..30 {
            sim.tick(180.0, 2.0);
        }

        let stats = sim.stats();
        let snapshot = sim.snapshot();
        assert_eq!(stats.tick, 30);
        assert_eq!(stats.total_cells(), 80 * 80);
        assert_eq!(stats.total_particles(), snapshot.particles.len());
        assert_eq!(
            stats.smoke_particles,
            snapshot.particles.iter().filter(|p| p.is_smoke).count()
        );
        assert!(snapshot
            .particles
            .iter()
            .all(|p| (0.0..=1.0).contains(&p.alpha)));
        assert_eq!(sim.last_report().tick, 30);
    }
}
