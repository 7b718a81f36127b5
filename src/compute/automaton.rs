//! The automaton contract shared by every rule engine.

use std::io::{self, Write};

use rand::{SeedableRng, rngs::StdRng};

use super::Grid;
use crate::schema::SeedError;

/// Where an automaton is in its life.
///
/// There is no terminal state: an automaton can be evolved indefinitely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed with an all-zero grid.
    Uninitialized,
    /// Populated by a random pass or an explicit seed.
    Initialized,
    /// At least one `evolve` call has run.
    Evolving,
}

/// Construction and seeding errors.
#[derive(Debug, thiserror::Error)]
pub enum AutomatonError {
    #[error("Grid dimensions must be non-zero and addressable (got {rows}x{cols})")]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("Initial state must not be empty")]
    EmptyInitialState,
    #[error("Initial state has {len} cells but the row only holds {cols}")]
    InitialStateTooLong { len: usize, cols: usize },
    #[error("Probability {name} must be within [0, 1] (got {value})")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("Neighborhood size must be at least 1 and its window addressable")]
    InvalidNeighborhoodSize,
    #[error("Seed grid is {got:?} but the automaton is {expected:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },
    #[error("Cell value {value} at ({row}, {col}) is not a valid state")]
    InvalidCellState { row: usize, col: usize, value: u8 },
    #[error("Step count must be non-negative (got {0})")]
    NegativeSteps(i64),
    #[error(transparent)]
    Seed(#[from] SeedError),
}

/// Convert a signed step count from an input boundary into a step count.
pub fn parse_step_count(steps: i64) -> Result<u64, AutomatonError> {
    u64::try_from(steps).map_err(|_| AutomatonError::NegativeSteps(steps))
}

/// Random source for an automaton: seeded when `seed` is given, else from entropy.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Reject zero-sized grids and grids whose cell count overflows `usize`.
pub(crate) fn check_dimensions(rows: usize, cols: usize) -> Result<(), AutomatonError> {
    if rows == 0 || cols == 0 || rows.checked_mul(cols).is_none() {
        return Err(AutomatonError::InvalidDimensions { rows, cols });
    }
    Ok(())
}

pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<(), AutomatonError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(AutomatonError::InvalidProbability { name, value });
    }
    Ok(())
}

/// Validate a caller grid against the automaton's shape and cell domain.
pub(crate) fn check_seed(
    grid: &Grid,
    expected: (usize, usize),
    states: u8,
) -> Result<(), AutomatonError> {
    if grid.dimensions() != expected {
        return Err(AutomatonError::DimensionMismatch {
            expected,
            got: grid.dimensions(),
        });
    }
    for (row, cells) in grid.iter_rows().enumerate() {
        if let Some(col) = cells.iter().position(|&v| v >= states) {
            return Err(AutomatonError::InvalidCellState {
                row,
                col,
                value: cells[col],
            });
        }
    }
    Ok(())
}

/// A discrete-state grid automaton.
///
/// Implementors own their grid exclusively. `apply_rules` must compute the
/// whole next generation from the current one before committing it.
pub trait CellularAutomaton {
    /// Human-readable variant name.
    fn name(&self) -> &'static str;

    /// Number of distinct cell states; valid cells are `0..states()`.
    fn states(&self) -> u8;

    /// Read-only view of the current grid.
    fn grid(&self) -> &Grid;

    /// Generations applied so far.
    fn generation(&self) -> u64;

    fn lifecycle(&self) -> Lifecycle;

    /// Overwrite the whole grid with the variant's random distribution.
    fn initialize_random_state(&mut self);

    /// Replace the grid with an explicit seed of identical dimensions.
    fn load(&mut self, grid: Grid) -> Result<(), AutomatonError>;

    /// Advance exactly one generation.
    fn apply_rules(&mut self);

    /// Write the current state as a plain-text frame. Never mutates state.
    fn print_state(&self, out: &mut dyn Write) -> io::Result<()>;

    /// Mark the automaton as evolving. Called once per `evolve`, even for zero steps.
    fn begin_evolution(&mut self);

    /// Write the frame shown before generation `step` (1-based) is applied.
    fn print_step(&self, step: u64, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Step {step}")?;
        self.print_state(out)
    }

    /// Run `steps` generations, rendering each state before advancing.
    fn evolve(&mut self, steps: u64, out: &mut dyn Write) -> io::Result<()> {
        self.begin_evolution();
        if steps == 0 {
            return Ok(());
        }
        log::info!(
            "{}: evolving {} steps from generation {}",
            self.name(),
            steps,
            self.generation()
        );
        for step in 1..=steps {
            self.print_step(step, out)?;
            self.apply_rules();
            log::debug!("{}: generation {}", self.name(), self.generation());
        }
        out.flush()
    }

    /// (rows, cols) of the grid.
    fn dimensions(&self) -> (usize, usize) {
        self.grid().dimensions()
    }
}
