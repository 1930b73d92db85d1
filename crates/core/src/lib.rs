//! Forest Fire Simulation Core Library
//!
//! A cellular-automaton forest fire on a 2-D grid with a directional wind field and a
//! lightweight flame/smoke particle system.
//!
//! ## Per-tick flow
//!
//! 1. The grid steps every cell from its tick-start state (growth, lightning, burning,
//!    wind-biased spread, ash regrowth) and commits all changes at once.
//! 2. Burning cells emit flame and smoke requests.
//! 3. The particle system spawns those particles, advects everything, steers smoke
//!    with the wind and drops expired particles.
//!
//! ```
//! use forest_fire_core::{Simulation, SimulationConfig};
//!
//! let mut sim = Simulation::new(SimulationConfig::seeded(7)).unwrap();
//! while sim.ignite_random().is_none() {}
//!
//! for _ in 0..10 {
//!     let result = sim.tick(90.0, 3.0);
//!     assert!(result.cells.counts().burning > 0);
//! }
//! ```

// Core types and utilities
pub mod core_types;
pub mod error;

// Simulation modules
pub mod grid;
pub mod particles;
pub mod simulation;

// Re-export core types
pub use core_types::{
    Degrees, EmissionEvent, FireRules, LifeRange, Particle, ParticleConfig, ParticleKind,
    Radians, Rgba, SimulationConfig, ValueRange, Vec2,
};
pub use error::{Result, SimulationError};

// Re-export simulation types
pub use grid::{CellCounts, CellField, CellState, ForestGrid, StepReport, WindField};
pub use particles::{AdvanceReport, ParticleSystem};
pub use simulation::{
    ParticleSnapshot, Simulation, SimulationSnapshot, SimulationStats, TickReport, TickResult,
};
