//! 1D elementary (binary-rule) cellular automaton.
//!
//! Row 0 of the grid is the live generation. The remaining rows form a
//! scrolling trace of earlier generations, most recent first; the oldest row
//! is dropped on every step.

use std::io::{self, Write};

use rand::{Rng, rngs::StdRng};

use super::{
    AutomatonError, CellularAutomaton, DoubleBuffer, Grid, Lifecycle, check_dimensions,
    check_seed, elementary_triple, rng_from_seed,
};
use crate::render::{self, Palette};
use crate::schema::ElementaryConfig;

/// Look up the next state of a cell from its (left, self, right) triple.
///
/// The triple is read as the 3-bit index `4 * left + 2 * self + right`, and
/// the result is bit `index` of `rule`. With this convention rule 204
/// (`0b1100_1100`) is the identity and rule 0 clears every cell.
#[inline]
pub fn rule_output(rule: u8, [left, center, right]: [u8; 3]) -> u8 {
    let index = 4 * left + 2 * center + right;
    (rule >> index) & 1
}

/// 1D binary-rule automaton with a generation trace.
#[derive(Debug, Clone)]
pub struct ElementaryCA<R = StdRng> {
    buffer: DoubleBuffer,
    rule: u8,
    rng: R,
    lifecycle: Lifecycle,
    generation: u64,
}

impl ElementaryCA<StdRng> {
    /// Create a seeded automaton with an entropy-backed random source.
    pub fn new(
        cols: usize,
        history: usize,
        rule: u8,
        initial_state: &[u8],
    ) -> Result<Self, AutomatonError> {
        Self::with_rng(cols, history, rule, initial_state, rng_from_seed(None))
    }
}

impl<R: Rng> ElementaryCA<R> {
    /// Create an automaton of `cols` cells keeping `history` generations
    /// (including the live one).
    ///
    /// `initial_state` is copied into the leading cells of the live row; the
    /// rest start empty.
    pub fn with_rng(
        cols: usize,
        history: usize,
        rule: u8,
        initial_state: &[u8],
        rng: R,
    ) -> Result<Self, AutomatonError> {
        check_dimensions(history, cols)?;
        if initial_state.is_empty() {
            return Err(AutomatonError::EmptyInitialState);
        }
        if initial_state.len() > cols {
            return Err(AutomatonError::InitialStateTooLong {
                len: initial_state.len(),
                cols,
            });
        }
        if let Some(col) = initial_state.iter().position(|&v| v > 1) {
            return Err(AutomatonError::InvalidCellState {
                row: 0,
                col,
                value: initial_state[col],
            });
        }

        let mut buffer = DoubleBuffer::new(history, cols);
        buffer.current_mut().row_mut(0)[..initial_state.len()].copy_from_slice(initial_state);

        log::info!("Elementary CA: rule {rule}, {cols} cells, {history} rows of history");

        Ok(Self {
            buffer,
            rule,
            rng,
            lifecycle: Lifecycle::Initialized,
            generation: 0,
        })
    }

    /// Build from configuration.
    pub fn from_config(config: &ElementaryConfig, rng: R) -> Result<Self, AutomatonError> {
        Self::with_rng(
            config.cols,
            config.history,
            config.rule,
            &config.initial_state,
            rng,
        )
    }

    /// The live generation.
    pub fn cells(&self) -> &[u8] {
        self.buffer.current().row(0)
    }

    /// Trace rows, most recent first.
    pub fn history(&self) -> impl Iterator<Item = &[u8]> {
        self.buffer.current().iter_rows()
    }

    /// Write the whole trace buffer as a frame.
    pub fn render_history(&self, out: &mut dyn Write) -> io::Result<()> {
        render::write_frame(out, self.buffer.current(), Palette::BINARY)
    }
}

impl<R: Rng> CellularAutomaton for ElementaryCA<R> {
    fn name(&self) -> &'static str {
        "Elementary CA"
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
            .fill_with(|row, _| if row == 0 && rng.r#gen::<f64>() >= 0.5 { 1 } else { 0 });
        self.lifecycle = Lifecycle::Initialized;
    }

    fn load(&mut self, grid: Grid) -> Result<(), AutomatonError> {
        check_seed(&grid, self.dimensions(), self.states())?;
        self.buffer.replace(grid);
        self.lifecycle = Lifecycle::Initialized;
        Ok(())
    }

    fn apply_rules(&mut self) {
        let rule = self.rule;
        self.buffer.step_with(|current, next| {
            let live = current.row(0);
            for (i, cell) in next.row_mut(0).iter_mut().enumerate() {
                *cell = rule_output(rule, elementary_triple(live, i));
            }
            // Scroll the trace down, dropping the oldest generation.
            for r in 1..current.rows() {
                next.row_mut(r).copy_from_slice(current.row(r - 1));
            }
        });
        self.generation += 1;
    }

    /// A single-row automaton prints its live row; with a trace the whole
    /// buffer is printed as a frame, most recent generation on top.
    fn print_state(&self, out: &mut dyn Write) -> io::Result<()> {
        if self.grid().rows() > 1 {
            return self.render_history(out);
        }
        render::write_row(out, self.cells(), Palette::BINARY)
    }

    fn begin_evolution(&mut self) {
        self.lifecycle = Lifecycle::Evolving;
    }

    fn print_step(&self, _step: u64, out: &mut dyn Write) -> io::Result<()> {
        self.print_state(out)
    }
}
