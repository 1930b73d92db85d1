//! Read-only views handed to the presentation layer

use crate::core_types::config::ParticleConfig;
use crate::core_types::particle::{Particle, Rgba};
use crate::grid::{CellField, CellState, WindField};
use crate::simulation::stats::TickReport;
use serde::{Deserialize, Serialize};

/// Borrowed result of [`crate::Simulation::tick`]
///
/// Only ever built from committed post-tick state.
#[derive(Debug, Clone, Copy)]
pub struct TickResult<'a> {
    pub report: TickReport,
    /// Cell states and burn countdowns
    pub cells: &'a CellField,
    pub particles: &'a [Particle],
}

/// Drawing data for one particle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleSnapshot {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub life: u32,
    /// `life / max_life` of the particle's kind
    pub alpha: f32,
    pub is_smoke: bool,
    pub color: Rgba,
}

impl ParticleSnapshot {
    pub fn from_particle(particle: &Particle, config: &ParticleConfig) -> Self {
        let position = particle.position();
        Self {
            x: position.x,
            y: position.y,
            size: particle.size(),
            life: particle.life(),
            alpha: particle.alpha(config),
            is_smoke: particle.is_smoke(),
            color: particle.color(),
        }
    }
}

/// Owned copy of the full simulation state after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    pub tick: u64,
    pub width: usize,
    pub height: usize,
    pub wind: WindField,
    /// Row-major cell states
    pub states: Vec<CellState>,
    /// Row-major burn countdowns
    pub burn_remaining: Vec<u32>,
    pub particles: Vec<ParticleSnapshot>,
}

impl SimulationSnapshot {
    /// State at `(x, y)`, or `None` outside the grid
    pub fn state(&self, x: usize, y: usize) -> Option<CellState> {
        (x < self.width && y < self.height).then(|| self.states[y * self.width + x])
    }
}
