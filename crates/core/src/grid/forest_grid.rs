//! Forest fire cellular automaton
//!
//! The grid steps all cells in lockstep. Every decision in a tick reads the state the
//! tick started with, and every write goes to a second buffer that is swapped in once
//! the whole grid has been evaluated. Fire therefore moves at most one cell per tick.
//!
//! # Transition Rule
//!
//! | From      | To        | Chance per tick                                   |
//! |-----------|-----------|---------------------------------------------------|
//! | `Empty`   | `Tree`    | `growth_probability`                              |
//! | `Tree`    | `Burning` | `lightning_probability`                           |
//! | `Tree`    | `Burning` | `fire_spread_probability × wind influence`, per burning neighbour |
//! | `Burning` | `Burnt`   | countdown reaches zero (deterministic)            |
//! | `Burnt`   | `Empty`   | `growth_probability × regrowth_from_ash_factor`   |
//!
//! Burning cells also emit flame and smoke particle requests.

use crate::core_types::config::{validate_dimensions, FireRules, ParticleConfig};
use crate::core_types::particle::{EmissionEvent, ParticleKind};
use crate::error::{Result, SimulationError};
use crate::grid::cell::{CellCounts, CellState};
use crate::grid::field::CellField;
use crate::grid::wind_field::{spread_multiplier, WindField};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Tree chance at the exact centre of a fresh forest
const CENTER_TREE_DENSITY: f32 = 0.65;
/// Fraction of the centre density lost at one half-width from the centre
const EDGE_DENSITY_FALLOFF: f32 = 0.7;

/// Moore neighbourhood offsets, row by row
const NEIGHBOUR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Transitions that happened during one [`ForestGrid::step`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    /// Empty cells that grew a tree
    pub grown: usize,
    /// Trees ignited by lightning
    pub lightning_strikes: usize,
    /// Trees ignited by a burning neighbour
    pub spread_ignitions: usize,
    /// Burning cells that turned to ash
    pub burned_out: usize,
    /// Ash cells cleared back to empty ground
    pub regrown: usize,
    pub flame_emissions: usize,
    pub smoke_emissions: usize,
}

/// Double-buffered forest grid
#[derive(Debug, Clone)]
pub struct ForestGrid {
    current: CellField,
    next: CellField,
}

impl ForestGrid {
    /// Create a grid of bare ground.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidDimensions`] if either side is zero.
    pub fn empty(width: usize, height: usize) -> Result<Self> {
        validate_dimensions(width, height)?;
        Ok(Self {
            current: CellField::new(width, height),
            next: CellField::new(width, height),
        })
    }

    /// Create a freshly seeded forest, dense in the middle and sparse at the edges.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidDimensions`] if either side is zero.
    pub fn seeded<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Result<Self> {
        let mut grid = Self::empty(width, height)?;
        grid.reseed(rng);
        Ok(grid)
    }

    /// Build a grid from explicit row-major states.
    ///
    /// Burning cells start with a full `burn_time` countdown.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidDimensions`] if the dimensions are empty or
    /// don't match `states.len()`, and [`SimulationError::InvalidParameter`] if
    /// `burn_time` is zero while a cell is burning.
    pub fn from_states(
        width: usize,
        height: usize,
        states: &[CellState],
        burn_time: u32,
    ) -> Result<Self> {
        validate_dimensions(width, height)?;
        if states.len() != width * height {
            return Err(SimulationError::InvalidDimensions { width, height });
        }
        if burn_time == 0 && states.contains(&CellState::Burning) {
            return Err(SimulationError::invalid_parameter(
                "burn_time",
                "burning cells need a countdown of at least 1 tick",
            ));
        }

        let mut grid = Self::empty(width, height)?;
        for (index, &state) in states.iter().enumerate() {
            if state == CellState::Burning {
                grid.current.set_burning(index, burn_time);
            } else {
                grid.current.set_idle(index, state);
            }
        }
        Ok(grid)
    }

    /// Re-roll every cell with the distance-weighted seeding law.
    ///
    /// `P(tree) = 0.65 × (1 − 0.7 × d)`, where `d` is the distance from the grid centre
    /// divided by half the grid width.
    pub fn reseed<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let width = self.current.width();
        let height = self.current.height();
        let center_x = width as f32 / 2.0;
        let center_y = height as f32 / 2.0;
        let half_width = width as f32 / 2.0;

        for y in 0..height {
            for x in 0..width {
                let dx = x as f32 - center_x;
                let dy = y as f32 - center_y;
                let distance = (dx * dx + dy * dy).sqrt() / half_width;
                let tree_probability =
                    CENTER_TREE_DENSITY * (1.0 - distance * EDGE_DENSITY_FALLOFF);

                let state = if rng.random::<f32>() < tree_probability {
                    CellState::Tree
                } else {
                    CellState::Empty
                };
                let index = self.current.index(x, y);
                self.current.set_idle(index, state);
            }
        }
    }

    /// Advance the automaton one tick.
    ///
    /// Emission requests from burning cells are appended to `emissions`.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        wind: &WindField,
        rules: &FireRules,
        particles: &ParticleConfig,
        rng: &mut R,
        emissions: &mut Vec<EmissionEvent>,
    ) -> StepReport {
        let mut report = StepReport::default();
        let width = self.current.width();
        let height = self.current.height();
        let wind_unit = wind.unit_vector();
        let wind_strength = wind.strength();
        let ash_clear_probability = rules.ash_clear_probability();

        self.next.copy_from(&self.current);

        for y in 0..height {
            for x in 0..width {
                let index = self.current.index(x, y);

                match self.current.state_at(index) {
                    CellState::Empty => {
                        if rng.random::<f32>() < rules.growth_probability {
                            self.next.set_idle(index, CellState::Tree);
                            report.grown += 1;
                        }
                    }
                    CellState::Tree => {
                        if rng.random::<f32>() < rules.lightning_probability {
                            // A neighbour may already have set it alight this tick
                            if self.next.state_at(index) == CellState::Tree {
                                report.lightning_strikes += 1;
                            }
                            self.next.set_burning(index, rules.burn_time);
                        }
                    }
                    CellState::Burning => {
                        if rng.random::<f32>() < particles.flame_emission_probability {
                            emissions.push(EmissionEvent {
                                kind: ParticleKind::Flame,
                                x,
                                y,
                            });
                            report.flame_emissions += 1;
                        }
                        if rng.random::<f32>() < particles.smoke_emission_probability {
                            emissions.push(EmissionEvent {
                                kind: ParticleKind::Smoke,
                                x,
                                y,
                            });
                            report.smoke_emissions += 1;
                        }

                        let remaining = self.current.burn_at(index).saturating_sub(1);
                        self.next.set_burning(index, remaining);
                        if remaining == 0 {
                            report.burned_out += 1;
                        }

                        for (dx, dy) in NEIGHBOUR_OFFSETS {
                            let Some((nx, ny)) = self.neighbour(x, y, dx, dy) else {
                                continue;
                            };
                            let neighbour = self.current.index(nx, ny);
                            if self.current.state_at(neighbour) != CellState::Tree {
                                continue;
                            }

                            let influence = spread_multiplier(wind_unit, wind_strength, dx, dy);
                            if rng.random::<f32>() < rules.fire_spread_probability * influence {
                                if self.next.state_at(neighbour) == CellState::Tree {
                                    report.spread_ignitions += 1;
                                }
                                self.next.set_burning(neighbour, rules.burn_time);
                            }
                        }
                    }
                    CellState::Burnt => {
                        if rng.random::<f32>() < ash_clear_probability {
                            self.next.set_idle(index, CellState::Empty);
                            report.regrown += 1;
                        }
                    }
                }
            }
        }

        std::mem::swap(&mut self.current, &mut self.next);
        report
    }

    /// Set the tree at `(x, y)` burning.
    ///
    /// Returns `false` without changing anything when the cell is not a tree.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::OutOfBounds`] if `(x, y)` is outside the grid.
    pub fn ignite(&mut self, x: usize, y: usize, burn_time: u32) -> Result<bool> {
        let index = self.checked_index(x, y)?;
        if self.current.state_at(index) != CellState::Tree {
            return Ok(false);
        }
        self.current.set_burning(index, burn_time);
        Ok(true)
    }

    /// State of the cell at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::OutOfBounds`] if `(x, y)` is outside the grid.
    pub fn state(&self, x: usize, y: usize) -> Result<CellState> {
        let index = self.checked_index(x, y)?;
        Ok(self.current.state_at(index))
    }

    /// Burn countdown of the cell at `(x, y)`; zero unless it is burning
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::OutOfBounds`] if `(x, y)` is outside the grid.
    pub fn burn_remaining(&self, x: usize, y: usize) -> Result<u32> {
        let index = self.checked_index(x, y)?;
        Ok(self.current.burn_at(index))
    }

    /// Committed cell data
    pub fn cells(&self) -> &CellField {
        &self.current
    }

    pub fn width(&self) -> usize {
        self.current.width()
    }

    pub fn height(&self) -> usize {
        self.current.height()
    }

    pub fn counts(&self) -> CellCounts {
        self.current.counts()
    }

    fn checked_index(&self, x: usize, y: usize) -> Result<usize> {
        if !self.current.in_bounds(x, y) {
            return Err(SimulationError::OutOfBounds {
                x,
                y,
                width: self.current.width(),
                height: self.current.height(),
            });
        }
        Ok(self.current.index(x, y))
    }

    /// Neighbour coordinate, or `None` past the grid edge (no wraparound)
    #[inline]
    fn neighbour(&self, x: usize, y: usize, dx: i32, dy: i32) -> Option<(usize, usize)> {
        let nx = x.checked_add_signed(dx as isize)?;
        let ny = y.checked_add_signed(dy as isize)?;
        self.current.in_bounds(nx, ny).then_some((nx, ny))
    }
}
