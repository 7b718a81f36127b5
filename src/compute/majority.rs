//! Majority-vote automaton over a square window.

use std::io::{self, Write};

use rand::{Rng, rngs::StdRng};

use super::{
    AutomatonError, CellularAutomaton, DoubleBuffer, Grid, Lifecycle, check_dimensions,
    check_seed, rng_from_seed, window_sum,
};
use crate::render::{self, Palette};
use crate::schema::MajorityConfig;

/// 1 iff `sum` strictly exceeds half of `window_cells` (integer division).
/// Ties go to 0.
#[inline]
pub fn majority_transition(sum: usize, window_cells: usize) -> u8 {
    u8::from(sum > window_cells / 2)
}

/// Binary automaton where each cell takes the majority value of the
/// `neighborhood_size` x `neighborhood_size` window around it. Out-of-grid
/// cells count as 0.
#[derive(Debug, Clone)]
pub struct MajorityCA<R = StdRng> {
    buffer: DoubleBuffer,
    neighborhood_size: usize,
    rng: R,
    lifecycle: Lifecycle,
    generation: u64,
}

impl MajorityCA<StdRng> {
    pub fn new(rows: usize, cols: usize, neighborhood_size: usize) -> Result<Self, AutomatonError> {
        Self::with_rng(rows, cols, neighborhood_size, rng_from_seed(None))
    }
}

impl<R: Rng> MajorityCA<R> {
    /// Even sizes are accepted; their window extends one cell further up and
    /// left than down and right.
    pub fn with_rng(
        rows: usize,
        cols: usize,
        neighborhood_size: usize,
        rng: R,
    ) -> Result<Self, AutomatonError> {
        check_dimensions(rows, cols)?;
        if neighborhood_size == 0 || neighborhood_size.checked_mul(neighborhood_size).is_none() {
            return Err(AutomatonError::InvalidNeighborhoodSize);
        }
        if neighborhood_size % 2 == 0 {
            log::warn!("Majority CA: even window {neighborhood_size} is asymmetric");
        }
        log::info!("Majority CA: {rows}x{cols}, window {neighborhood_size}");
        Ok(Self {
            buffer: DoubleBuffer::new(rows, cols),
            neighborhood_size,
            rng,
            lifecycle: Lifecycle::Uninitialized,
            generation: 0,
        })
    }

    pub fn from_config(config: &MajorityConfig, rng: R) -> Result<Self, AutomatonError> {
        Self::with_rng(config.rows, config.cols, config.neighborhood_size, rng)
    }

    /// Cells covered by one window.
    pub fn window_cells(&self) -> usize {
        self.neighborhood_size * self.neighborhood_size
    }
}

impl<R: Rng> CellularAutomaton for MajorityCA<R> {
    fn name(&self) -> &'static str {
        "Majority CA"
    }

    fn states(&self) -> u8 {
        2
    }

    fn grid(&self) -> &Grid {
        self.buffer.current()
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    fn initialize_random_state(&mut self) {
        let rng = &mut self.rng;
        self.buffer
            .current_mut()
            .fill_with(|_, _| if rng.r#gen::<f64>() < 0.5 { 0 } else { 1 });
        self.lifecycle = Lifecycle::Initialized;
    }

    fn load(&mut self, grid: Grid) -> Result<(), AutomatonError> {
        check_seed(&grid, self.dimensions(), self.states())?;
        self.buffer.replace(grid);
        self.lifecycle = Lifecycle::Initialized;
        Ok(())
    }

    fn apply_rules(&mut self) {
        let size = self.neighborhood_size;
        let cells = self.window_cells();
        self.buffer.step(|current, row, col| {
            majority_transition(window_sum(current, row, col, size), cells)
        });
        self.generation += 1;
    }

    fn print_state(&self, out: &mut dyn Write) -> io::Result<()> {
        render::write_frame(out, self.grid(), Palette::BINARY)
    }

    fn begin_evolution(&mut self) {
        self.lifecycle = Lifecycle::Evolving;
    }
}
