//! Forest grid: cell states, double-buffered storage and the wind field
//!
//! - `cell`: the four cell states and per-state counts
//! - `field`: row-major parallel arrays of state and burn countdown
//! - `forest_grid`: the transition rule and external ignition
//! - `wind_field`: direction/strength input and the downwind spread bias

pub mod cell;
pub mod field;
pub mod forest_grid;
pub mod wind_field;

pub use cell::{CellCounts, CellState};
pub use field::CellField;
pub use forest_grid::{ForestGrid, StepReport};
pub use wind_field::{WindField, WIND_SPREAD_FACTOR};
