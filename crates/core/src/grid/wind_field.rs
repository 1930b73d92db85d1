//! Uniform wind field
//!
//! A single direction and strength shared by the whole grid. It biases fire spread
//! toward downwind neighbours and steers smoke.
//!
//! # Conventions
//!
//! Direction is in degrees, clockwise from "up": 0° blows toward the top of the grid,
//! 90° toward the right. Grid `y` grows downward, so the unit vector is
//! `(sin θ, −cos θ)`.
//!
//! # Spread Bias
//!
//! ```text
//! dot       = unit(offset) · unit(wind)
//! influence = 1 + dot × strength × 0.1   if dot > 0
//!           = 1                          otherwise
//! ```
//!
//! Wind only ever amplifies spread; spreading against the wind is not penalised.

use crate::core_types::units::Degrees;
use crate::core_types::vec2::Vec2;
use serde::{Deserialize, Serialize};

/// Spread bonus per unit of wind strength for a perfectly downwind neighbour
pub const WIND_SPREAD_FACTOR: f32 = 0.1;

/// Direction and strength of the wind for one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindField {
    direction: Degrees,
    strength: f32,
}

impl Default for WindField {
    fn default() -> Self {
        Self::calm()
    }
}

impl WindField {
    /// Build a wind field from untrusted UI input.
    ///
    /// Direction wraps into `[0, 360)`; strength is clamped to `[0, max_strength]`.
    /// Non-finite values collapse to zero.
    #[must_use]
    pub fn new(direction_degrees: f32, strength: f32, max_strength: f32) -> Self {
        let max_strength = if max_strength.is_finite() {
            max_strength.max(0.0)
        } else {
            0.0
        };
        let strength = if strength.is_finite() {
            strength.clamp(0.0, max_strength)
        } else {
            0.0
        };

        Self {
            direction: Degrees::new(direction_degrees).normalized(),
            strength,
        }
    }

    /// No wind
    #[must_use]
    pub fn calm() -> Self {
        Self {
            direction: Degrees::new(0.0),
            strength: 0.0,
        }
    }

    pub fn direction(&self) -> Degrees {
        self.direction
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }

    /// Unit vector the wind blows toward, in grid coordinates
    pub fn unit_vector(&self) -> Vec2 {
        let angle = self.direction.to_radians();
        Vec2::new(angle.sin(), -angle.cos())
    }

    /// `unit_vector() × strength`
    pub fn velocity(&self) -> Vec2 {
        self.unit_vector() * self.strength
    }

    /// Spread probability multiplier toward the neighbour at `(dx, dy)`.
    ///
    /// Diagonal offsets are normalised first, so all eight neighbours share the same
    /// `[1, 1 + strength × 0.1]` range.
    pub fn spread_multiplier(&self, dx: i32, dy: i32) -> f32 {
        spread_multiplier(self.unit_vector(), self.strength, dx, dy)
    }
}

/// Shared by [`WindField::spread_multiplier`] and the grid step, which hoists the unit
/// vector out of its cell loop.
#[inline]
pub(crate) fn spread_multiplier(wind_unit: Vec2, strength: f32, dx: i32, dy: i32) -> f32 {
    let offset = Vec2::new(dx as f32, dy as f32);
    let length = offset.norm();
    if length == 0.0 {
        return 1.0;
    }

    let dot = (offset / length).dot(&wind_unit);
    if dot > 0.0 {
        1.0 + dot * strength * WIND_SPREAD_FACTOR
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const NEIGHBOURS: [(i32, i32); 8] = [
        (-1, -1),
        (0, -1),
        (1, -1),
        (-1, 0),
        (1, 0),
        (-1, 1),
        (0, 1),
        (1, 1),
    ];

    #[test]
    fn test_unit_vector_compass() {
        let up = WindField::new(0.0, 1.0, 10.0).unit_vector();
        assert_relative_eq!(up.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(up.y, -1.0, epsilon = 1e-6);

        let right = WindField::new(90.0, 1.0, 10.0).unit_vector();
        assert_relative_eq!(right.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(right.y, 0.0, epsilon = 1e-6);

        let down = WindField::new(180.0, 1.0, 10.0).unit_vector();
        assert_relative_eq!(down.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_input_normalization() {
        let wind = WindField::new(-90.0, 25.0, 10.0);
        assert_eq!(*wind.direction(), 270.0);
        assert_eq!(wind.strength(), 10.0);

        let wind = WindField::new(f32::NAN, -3.0, 10.0);
        assert_eq!(*wind.direction(), 0.0);
        assert_eq!(wind.strength(), 0.0);

        let wind = WindField::new(720.0, f32::INFINITY, 10.0);
        assert_eq!(*wind.direction(), 0.0);
        assert_eq!(wind.strength(), 0.0);
    }

    #[test]
    fn test_calm_wind_is_isotropic() {
        for direction in [0.0, 45.0, 90.0, 217.0] {
            let wind = WindField::new(direction, 0.0, 10.0);
            for (dx, dy) in NEIGHBOURS {
                assert_eq!(wind.spread_multiplier(dx, dy), 1.0);
            }
        }
    }

    #[test]
    fn test_downwind_beats_upwind() {
        let wind = WindField::new(90.0, 3.0, 10.0);
        let downwind = wind.spread_multiplier(1, 0);
        let upwind = wind.spread_multiplier(-1, 0);

        assert_relative_eq!(downwind, 1.3, epsilon = 1e-5);
        assert_eq!(upwind, 1.0);
        assert!(downwind > upwind);
    }

    #[test]
    fn test_diagonal_and_crosswind() {
        let wind = WindField::new(90.0, 10.0, 10.0);
        // 45° off the wind: cos(45°) of the full bonus
        assert_relative_eq!(
            wind.spread_multiplier(1, 1),
            1.0 + std::f32::consts::FRAC_1_SQRT_2,
            epsilon = 1e-5
        );
        // Perpendicular neighbours get no bonus
        assert_relative_eq!(wind.spread_multiplier(0, 1), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_multiplier_never_below_one() {
        let wind = WindField::new(33.0, 7.0, 10.0);
        for (dx, dy) in NEIGHBOURS {
            assert!(wind.spread_multiplier(dx, dy) >= 1.0);
        }
    }

    #[test]
    fn test_velocity_scales_with_strength() {
        let wind = WindField::new(180.0, 4.0, 10.0);
        assert_relative_eq!(wind.velocity().y, 4.0, epsilon = 1e-5);
    }
}
