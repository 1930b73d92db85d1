//! Simulation configuration
//!
//! All tunables are fixed at construction. Defaults reproduce the classic forest fire
//! setup: an 80x80 forest, rare growth and lightning, 15% base spread chance and trees
//! that burn for 300 ticks.

use crate::error::{Result, SimulationError};
use serde::{Deserialize, Serialize};

/// Render pixels per cell the particle motion defaults were tuned against.
///
/// Only used to express the defaults below in cell units.
const TUNING_PIXELS_PER_CELL: f32 = 6.0;

/// Probabilities and timings of the cell state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireRules {
    /// Chance per tick that an empty cell grows a tree
    pub growth_probability: f32,
    /// Chance per tick that a tree is struck by lightning
    pub lightning_probability: f32,
    /// Base chance per tick that fire jumps to one neighbouring tree
    pub fire_spread_probability: f32,
    /// Ticks a tree burns before turning to ash
    pub burn_time: u32,
    /// Multiplier on `growth_probability` for ash clearing back to empty ground
    pub regrowth_from_ash_factor: f32,
}

impl Default for FireRules {
    fn default() -> Self {
        Self {
            growth_probability: 0.00002,
            lightning_probability: 0.000005,
            fire_spread_probability: 0.15,
            burn_time: 300,
            regrowth_from_ash_factor: 5.0,
        }
    }
}

impl FireRules {
    /// Chance per tick that ash clears to empty ground.
    #[must_use]
    pub fn ash_clear_probability(&self) -> f32 {
        self.growth_probability * self.regrowth_from_ash_factor
    }

    /// Check every probability and timing.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidParameter`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        check_probability("growth_probability", self.growth_probability)?;
        check_probability("lightning_probability", self.lightning_probability)?;
        check_probability("fire_spread_probability", self.fire_spread_probability)?;
        if self.burn_time == 0 {
            return Err(SimulationError::invalid_parameter(
                "burn_time",
                "must be at least 1 tick",
            ));
        }
        check_non_negative("regrowth_from_ash_factor", self.regrowth_from_ash_factor)?;
        Ok(())
    }
}

/// Inclusive float range sampled uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    #[must_use]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    fn validate(&self, name: &'static str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(SimulationError::invalid_parameter(
                name,
                format!("expected finite min <= max, got {}..{}", self.min, self.max),
            ));
        }
        Ok(())
    }
}

/// Inclusive particle lifetime range in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeRange {
    pub min: u32,
    pub max: u32,
}

impl LifeRange {
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    fn validate(&self, name: &'static str) -> Result<()> {
        if self.min == 0 || self.min > self.max {
            return Err(SimulationError::invalid_parameter(
                name,
                format!("expected 1 <= min <= max, got {}..={}", self.min, self.max),
            ));
        }
        Ok(())
    }
}

/// Emission odds, lifetimes, sizes and motion of flame and smoke particles.
///
/// Positions and velocities are in cells (per tick). Sizes are render diameters and are
/// never mixed with positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleConfig {
    /// Chance per tick that a burning cell emits a flame particle
    pub flame_emission_probability: f32,
    /// Chance per tick that a burning cell emits a smoke particle
    pub smoke_emission_probability: f32,

    pub flame_life: LifeRange,
    pub smoke_life: LifeRange,
    pub flame_size: ValueRange,
    pub smoke_size: ValueRange,
    /// Size added to smoke every tick (diffusion)
    pub smoke_growth: f32,

    /// Half-width of the uniform jitter applied to spawn positions
    pub spawn_jitter: f32,
    /// Half-width of the flame horizontal velocity jitter
    pub flame_drift: f32,
    /// Upward flame speed range (applied as negative y)
    pub flame_rise: ValueRange,
    /// Half-width of the smoke horizontal velocity jitter
    pub smoke_drift: f32,
    /// Upward smoke speed range (applied as negative y)
    pub smoke_rise: ValueRange,
    /// Wind velocity added to smoke at spawn, per unit of wind strength
    pub smoke_spawn_wind_factor: f32,
    /// Wind acceleration applied to smoke every tick, per unit of wind strength
    pub smoke_wind_acceleration: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        let px = TUNING_PIXELS_PER_CELL;
        Self {
            flame_emission_probability: 0.3,
            smoke_emission_probability: 0.1,
            flame_life: LifeRange::new(20, 60),
            smoke_life: LifeRange::new(100, 200),
            flame_size: ValueRange::new(2.0, 5.0),
            smoke_size: ValueRange::new(3.0, 8.0),
            smoke_growth: 0.05,
            spawn_jitter: 2.0 / px,
            flame_drift: 1.0 / px,
            flame_rise: ValueRange::new(1.0 / px, 3.0 / px),
            smoke_drift: 0.2 / px,
            smoke_rise: ValueRange::new(0.5 / px, 1.5 / px),
            smoke_spawn_wind_factor: 0.1 / px,
            smoke_wind_acceleration: 0.01 / px,
        }
    }
}

impl ParticleConfig {
    /// Check emission odds, ranges and motion constants.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidParameter`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        check_probability("flame_emission_probability", self.flame_emission_probability)?;
        check_probability("smoke_emission_probability", self.smoke_emission_probability)?;
        self.flame_life.validate("flame_life")?;
        self.smoke_life.validate("smoke_life")?;
        self.flame_size.validate("flame_size")?;
        self.smoke_size.validate("smoke_size")?;
        self.flame_rise.validate("flame_rise")?;
        self.smoke_rise.validate("smoke_rise")?;
        check_non_negative("smoke_growth", self.smoke_growth)?;
        check_non_negative("spawn_jitter", self.spawn_jitter)?;
        check_non_negative("flame_drift", self.flame_drift)?;
        check_non_negative("smoke_drift", self.smoke_drift)?;
        check_non_negative("smoke_spawn_wind_factor", self.smoke_spawn_wind_factor)?;
        check_non_negative("smoke_wind_acceleration", self.smoke_wind_acceleration)?;
        Ok(())
    }
}

/// Top-level configuration handed to [`crate::Simulation::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Render size of one cell in pixels. Carried for the presentation layer only.
    pub cell_size: f32,
    /// Upper clamp for wind strength input
    pub max_wind_strength: f32,
    /// Fixed RNG seed; `None` seeds from the thread RNG
    pub seed: Option<u64>,
    pub fire: FireRules,
    pub particles: ParticleConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 80,
            cell_size: TUNING_PIXELS_PER_CELL,
            max_wind_strength: 10.0,
            seed: None,
            fire: FireRules::default(),
            particles: ParticleConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Default configuration with a fixed seed, for reproducible runs.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Check dimensions, wind clamp and every nested section.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidDimensions`] for an empty grid and
    /// [`SimulationError::InvalidParameter`] for any other bad field.
    pub fn validate(&self) -> Result<()> {
        validate_dimensions(self.width, self.height)?;
        check_non_negative("max_wind_strength", self.max_wind_strength)?;
        self.fire.validate()?;
        self.particles.validate()?;
        Ok(())
    }
}

pub(crate) fn validate_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 || width.checked_mul(height).is_none() {
        return Err(SimulationError::InvalidDimensions { width, height });
    }
    Ok(())
}

fn check_probability(name: &'static str, value: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(SimulationError::invalid_parameter(
            name,
            format!("must be a probability in [0, 1], got {value}"),
        ));
    }
    Ok(())
}

fn check_non_negative(name: &'static str, value: f32) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(SimulationError::invalid_parameter(
            name,
            format!("must be finite and non-negative, got {value}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_ash_clear_probability() {
        let rules = FireRules::default();
        assert_relative_eq!(rules.ash_clear_probability(), 0.0001, epsilon = 1e-9);
    }

    #[test]
    fn test_rejects_zero_burn_time() {
        let rules = FireRules {
            burn_time: 0,
            ..FireRules::default()
        };
        assert!(matches!(
            rules.validate(),
            Err(SimulationError::InvalidParameter {
                name: "burn_time",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_probability_above_one() {
        let config = SimulationConfig {
            fire: FireRules {
                fire_spread_probability: 1.5,
                ..FireRules::default()
            },
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_nan_probability() {
        let particles = ParticleConfig {
            smoke_emission_probability: f32::NAN,
            ..ParticleConfig::default()
        };
        assert!(particles.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_ranges() {
        let particles = ParticleConfig {
            flame_life: LifeRange::new(60, 20),
            ..ParticleConfig::default()
        };
        assert!(particles.validate().is_err());

        let particles = ParticleConfig {
            smoke_size: ValueRange::new(8.0, 3.0),
            ..ParticleConfig::default()
        };
        assert!(particles.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_grid() {
        let config = SimulationConfig {
            width: 0,
            ..SimulationConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(SimulationError::InvalidDimensions {
                width: 0,
                height: 80
            })
        );
    }

    #[test]
    fn test_seeded_keeps_defaults() {
        let config = SimulationConfig::seeded(7);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.fire, FireRules::default());
    }
}
