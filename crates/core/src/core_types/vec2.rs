//! Vector type alias for 2D grid positions and directions.

use nalgebra::Vector2;

/// 2D vector type for positions, velocities, and directions.
///
/// This is a simple alias for `nalgebra::Vector2<f32>`, used throughout
/// the simulation for particle positions, wind vectors, and neighbour offsets.
/// Coordinates are in grid space: one unit is one cell, `y` grows downward.
pub type Vec2 = Vector2<f32>;
