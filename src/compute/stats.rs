//! Per-state cell counts for monitoring.

use serde::{Deserialize, Serialize};

use super::Grid;

/// Number of cells in each state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    /// `counts[v]` is the number of cells holding value `v`.
    pub counts: Vec<usize>,
    pub total: usize,
}

impl Census {
    /// Count cells of a grid whose valid states are `0..states`.
    pub fn from_grid(grid: &Grid, states: u8) -> Self {
        let len = (states as usize).max(grid.max_value() as usize + 1);
        let mut counts = vec![0usize; len];
        for &cell in grid.cells() {
            counts[cell as usize] += 1;
        }
        Self {
            counts,
            total: grid.cells().len(),
        }
    }

    /// Cells holding `state`.
    pub fn count(&self, state: u8) -> usize {
        self.counts.get(state as usize).copied().unwrap_or(0)
    }
}

impl std::fmt::Display for Census {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .counts
            .iter()
            .enumerate()
            .map(|(state, n)| format!("{state}:{n}"))
            .collect();
        write!(f, "[{}] of {}", parts.join(" "), self.total)
    }
}
