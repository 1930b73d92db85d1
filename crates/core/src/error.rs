//! Error type for the forest fire core
//!
//! Normal simulation ticks never fail; errors only come from configuration validation
//! and from coordinates handed in by the presentation layer.

use std::fmt;

/// Result alias used across the core crate.
pub type Result<T> = std::result::Result<T, SimulationError>;

/// Conditions the simulation rejects instead of clamping or wrapping.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Coordinate outside the grid. Never clamped, so a stray click can't hit another cell.
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    /// Grid dimensions that can't hold a single cell, or don't match supplied cell data.
    InvalidDimensions { width: usize, height: usize },
    /// A configuration value outside its valid range.
    InvalidParameter { name: &'static str, reason: String },
}

impl SimulationError {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        SimulationError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::OutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                "coordinate ({x}, {y}) is outside the {width}x{height} grid"
            ),
            SimulationError::InvalidDimensions { width, height } => {
                write!(f, "invalid grid dimensions {width}x{height}")
            }
            SimulationError::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter '{name}': {reason}")
            }
        }
    }
}

impl std::error::Error for SimulationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_message() {
        let err = SimulationError::OutOfBounds {
            x: 80,
            y: 3,
            width: 80,
            height: 80,
        };
        assert_eq!(
            err.to_string(),
            "coordinate (80, 3) is outside the 80x80 grid"
        );
    }

    #[test]
    fn test_invalid_parameter_message() {
        let err = SimulationError::invalid_parameter("burn_time", "must be at least 1");
        assert_eq!(
            err.to_string(),
            "invalid parameter 'burn_time': must be at least 1"
        );
    }
}
