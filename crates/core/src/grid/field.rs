//! Row-major cell storage
//!
//! One [`CellField`] holds a full copy of the grid as two parallel arrays: the cell
//! state and the burn countdown. The automaton keeps two of them and swaps after each
//! tick.

use crate::grid::cell::{CellCounts, CellState};
use serde::{Deserialize, Serialize};

/// Parallel state and burn-countdown arrays in row-major order (`y * width + x`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellField {
    states: Vec<CellState>,
    burn_remaining: Vec<u32>,
    width: usize,
    height: usize,
}

impl CellField {
    /// Create a field of empty cells
    ///
    /// # Arguments
    ///
    /// * `width` - Grid width in cells
    /// * `height` - Grid height in cells
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            states: vec![CellState::Empty; width * height],
            burn_remaining: vec![0; width * height],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Row-major index. Callers check bounds first.
    #[inline]
    pub(crate) fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(self.in_bounds(x, y), "Coordinates out of bounds");
        y * self.width + x
    }

    #[inline]
    pub(crate) fn state_at(&self, index: usize) -> CellState {
        self.states[index]
    }

    #[inline]
    pub(crate) fn burn_at(&self, index: usize) -> u32 {
        self.burn_remaining[index]
    }

    /// Set a non-burning state; clears the countdown.
    #[inline]
    pub(crate) fn set_idle(&mut self, index: usize, state: CellState) {
        debug_assert!(state != CellState::Burning);
        self.states[index] = state;
        self.burn_remaining[index] = 0;
    }

    /// Set the cell burning with `ticks` left. Zero ticks means burnt out.
    #[inline]
    pub(crate) fn set_burning(&mut self, index: usize, ticks: u32) {
        if ticks == 0 {
            self.set_idle(index, CellState::Burnt);
        } else {
            self.states[index] = CellState::Burning;
            self.burn_remaining[index] = ticks;
        }
    }

    /// Copy another field of the same shape without reallocating.
    pub(crate) fn copy_from(&mut self, other: &CellField) {
        debug_assert_eq!((self.width, self.height), (other.width, other.height));
        self.states.copy_from_slice(&other.states);
        self.burn_remaining.copy_from_slice(&other.burn_remaining);
    }

    /// Cell states in row-major order
    pub fn states(&self) -> &[CellState] {
        &self.states
    }

    /// Burn countdowns in row-major order
    pub fn burn_remaining(&self) -> &[u32] {
        &self.burn_remaining
    }

    pub fn counts(&self) -> CellCounts {
        let mut counts = CellCounts::default();
        for &state in &self.states {
            counts.record(state);
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_field_is_empty_ground() {
        let field = CellField::new(4, 3);
        assert_eq!(field.len(), 12);
        assert!(field.states().iter().all(|&s| s == CellState::Empty));
        assert!(field.burn_remaining().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_index_is_row_major() {
        let field = CellField::new(4, 3);
        assert_eq!(field.index(0, 0), 0);
        assert_eq!(field.index(3, 0), 3);
        assert_eq!(field.index(1, 2), 9);
        assert!(!field.in_bounds(4, 0));
        assert!(!field.in_bounds(0, 3));
    }

    #[test]
    fn test_set_burning_keeps_invariant() {
        let mut field = CellField::new(2, 2);
        field.set_burning(1, 5);
        assert_eq!(field.state_at(1), CellState::Burning);
        assert_eq!(field.burn_at(1), 5);

        field.set_burning(1, 0);
        assert_eq!(field.state_at(1), CellState::Burnt);
        assert_eq!(field.burn_at(1), 0);

        field.set_burning(2, 3);
        field.set_idle(2, CellState::Tree);
        assert_eq!(field.burn_at(2), 0);
    }

    #[test]
    fn test_copy_from() {
        let mut a = CellField::new(3, 3);
        let mut b = CellField::new(3, 3);
        a.set_burning(4, 7);
        b.copy_from(&a);
        assert_eq!(a, b);
    }
}
