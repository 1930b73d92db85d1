//! Particle system for flame and smoke effects
//!
//! Owns every live particle. Each tick it spawns the particles requested by the grid
//! step, advects and ages all of them, then drops the expired ones in a single
//! compacting pass.
//!
//! # Resource Growth
//!
//! The collection is unbounded. Emission scales with the number of burning cells: at the
//! default rates a steady fire holds about 27 live particles per burning cell
//! (0.3 × 40 ticks of flame plus 0.1 × 150 ticks of smoke). Callers that need a ceiling
//! should cap on their side.

use crate::core_types::config::ParticleConfig;
use crate::core_types::particle::{spawn_flame, spawn_smoke, EmissionEvent, Particle, ParticleKind};
use crate::grid::WindField;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// What one [`ParticleSystem::advance`] changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceReport {
    pub spawned: usize,
    pub expired: usize,
}

/// Unordered collection of live particles
#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn, move, age and cull particles for one tick.
    ///
    /// Newly spawned particles take their first step in the same call, so a particle
    /// created with life `L` is gone after exactly `L` calls.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        wind: &WindField,
        emissions: &[EmissionEvent],
        config: &ParticleConfig,
        rng: &mut R,
    ) -> AdvanceReport {
        let wind_velocity = wind.velocity();

        self.particles.reserve(emissions.len());
        for event in emissions {
            let particle = match event.kind {
                ParticleKind::Flame => spawn_flame(event.x, event.y, config, rng),
                ParticleKind::Smoke => {
                    spawn_smoke(event.x, event.y, wind_velocity, config, rng)
                }
            };
            self.particles.push(particle);
        }

        let wind_accel = wind_velocity * config.smoke_wind_acceleration;
        let before = self.particles.len();
        self.particles
            .retain_mut(|particle| particle.update(wind_accel, config.smoke_growth));

        AdvanceReport {
            spawned: emissions.len(),
            expired: before - self.particles.len(),
        }
    }

    /// Add a particle outside the emission rule
    pub fn spawn(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// `(flame, smoke)` particle counts
    pub fn counts(&self) -> (usize, usize) {
        let smoke = self.particles.iter().filter(|p| p.is_smoke()).count();
        (self.particles.len() - smoke, smoke)
    }
}
