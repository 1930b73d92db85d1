//! Cell states of the forest automaton

use serde::{Deserialize, Serialize};

/// State of one grid cell
///
/// Cells cycle `Empty → Tree → Burning → Burnt → Empty` indefinitely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellState {
    /// Bare ground
    #[default]
    Empty = 0,
    /// Unburnt tree
    Tree = 1,
    /// Tree on fire; carries a burn countdown
    Burning = 2,
    /// Ash left after a fire
    Burnt = 3,
}

impl CellState {
    /// All states, in discriminant order
    pub const ALL: [CellState; 4] = [
        CellState::Empty,
        CellState::Tree,
        CellState::Burning,
        CellState::Burnt,
    ];

    /// Convert from u8 for FFI compatibility
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(CellState::Empty),
            1 => Some(CellState::Tree),
            2 => Some(CellState::Burning),
            3 => Some(CellState::Burnt),
            _ => None,
        }
    }

    /// Convert to u8 for FFI compatibility
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn is_burning(self) -> bool {
        self == CellState::Burning
    }
}

/// Number of cells in each state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellCounts {
    pub empty: usize,
    pub trees: usize,
    pub burning: usize,
    pub burnt: usize,
}

impl CellCounts {
    pub(crate) fn record(&mut self, state: CellState) {
        match state {
            CellState::Empty => self.empty += 1,
            CellState::Tree => self.trees += 1,
            CellState::Burning => self.burning += 1,
            CellState::Burnt => self.burnt += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.empty + self.trees + self.burning + self.burnt
    }
}
