//! Per-tick reports and population statistics

use crate::grid::{CellCounts, StepReport};
use crate::particles::AdvanceReport;
use serde::{Deserialize, Serialize};

/// Everything that changed during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// Tick number after this tick (first tick reports 1)
    pub tick: u64,
    pub grid: StepReport,
    pub particles: AdvanceReport,
}

impl TickReport {
    /// Cells that caught fire this tick, by lightning or spread
    pub fn ignitions(&self) -> usize {
        self.grid.lightning_strikes + self.grid.spread_ignitions
    }
}

/// Population of the grid and particle system at a point in time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationStats {
    pub tick: u64,
    pub empty: usize,
    pub trees: usize,
    pub burning: usize,
    pub burnt: usize,
    pub flame_particles: usize,
    pub smoke_particles: usize,
}

impl SimulationStats {
    pub(crate) fn new(tick: u64, cells: CellCounts, particles: (usize, usize)) -> Self {
        Self {
            tick,
            empty: cells.empty,
            trees: cells.trees,
            burning: cells.burning,
            burnt: cells.burnt,
            flame_particles: particles.0,
            smoke_particles: particles.1,
        }
    }

    pub fn total_cells(&self) -> usize {
        self.empty + self.trees + self.burning + self.burnt
    }

    pub fn total_particles(&self) -> usize {
        self.flame_particles + self.smoke_particles
    }

    /// Fraction of cells covered by living forest (trees and burning trees)
    pub fn forest_cover(&self) -> f32 {
        let total = self.total_cells();
        if total == 0 {
            return 0.0;
        }
        (self.trees + self.burning) as f32 / total as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_totals() {
        let cells = CellCounts {
            empty: 5,
            trees: 3,
            burning: 1,
            burnt: 1,
        };
        let stats = SimulationStats::new(4, cells, (7, 2));
        assert_eq!(stats.total_cells(), 10);
        assert_eq!(stats.total_particles(), 9);
        assert!((stats.forest_cover() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_ignitions_sum_both_causes() {
        let report = TickReport {
            tick: 1,
            grid: StepReport {
                lightning_strikes: 2,
                spread_ignitions: 5,
                ..StepReport::default()
            },
            particles: AdvanceReport::default(),
        };
        assert_eq!(report.ignitions(), 7);
    }
}
