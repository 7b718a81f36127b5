//! Seed types for explicitly initializing automata.

use serde::{Deserialize, Serialize};

use crate::compute::Grid;

/// A set of patterns stamped onto an empty grid, in order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Seed {
    pub patterns: Vec<Pattern>,
}

/// Predefined patterns for initialization.
///
/// Coordinates are (row, col) of the pattern's top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Pattern {
    /// Full grid literal. Must match the grid dimensions exactly.
    Rows { rows: Vec<Vec<u8>> },
    /// Sparse (row, col, value) entries.
    Cells { cells: Vec<(usize, usize, u8)> },
    /// 2x2 still life.
    Block { row: usize, col: usize },
    /// Period-2 oscillator: three cells in a line.
    Blinker {
        row: usize,
        col: usize,
        vertical: bool,
    },
    /// Glider travelling down and to the right.
    Glider { row: usize, col: usize },
}

/// Seed generation errors.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Pattern cell ({row}, {col}) lies outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("Row literal must be {rows}x{cols}")]
    ShapeMismatch { rows: usize, cols: usize },
}

const GLIDER: [(usize, usize); 5] = [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];
const BLOCK: [(usize, usize); 4] = [(0, 0), (0, 1), (1, 0), (1, 1)];

impl Pattern {
    /// Generate a grid holding only this pattern.
    pub fn generate(&self, rows: usize, cols: usize) -> Result<Grid, SeedError> {
        let mut grid = Grid::new(rows, cols);
        self.stamp(&mut grid)?;
        Ok(grid)
    }

    /// Write this pattern onto `grid`.
    pub fn stamp(&self, grid: &mut Grid) -> Result<(), SeedError> {
        match self {
            Pattern::Rows { rows } => {
                let literal = Grid::from_rows(rows)
                    .filter(|g| g.dimensions() == grid.dimensions())
                    .ok_or(SeedError::ShapeMismatch {
                        rows: grid.rows(),
                        cols: grid.cols(),
                    })?;
                *grid = literal;
                Ok(())
            }
            Pattern::Cells { cells } => cells
                .iter()
                .try_for_each(|&(row, col, value)| put(grid, row, col, value)),
            Pattern::Block { row, col } => place(grid, *row, *col, &BLOCK),
            Pattern::Blinker { row, col, vertical } => {
                let cells = if *vertical {
                    [(0, 0), (1, 0), (2, 0)]
                } else {
                    [(0, 0), (0, 1), (0, 2)]
                };
                place(grid, *row, *col, &cells)
            }
            Pattern::Glider { row, col } => place(grid, *row, *col, &GLIDER),
        }
    }
}

impl Seed {
    /// Stamp every pattern onto an empty `rows` x `cols` grid.
    pub fn generate(&self, rows: usize, cols: usize) -> Result<Grid, SeedError> {
        let mut grid = Grid::new(rows, cols);
        for pattern in &self.patterns {
            pattern.stamp(&mut grid)?;
        }
        Ok(grid)
    }
}

fn place(
    grid: &mut Grid,
    row: usize,
    col: usize,
    offsets: &[(usize, usize)],
) -> Result<(), SeedError> {
    offsets
        .iter()
        .try_for_each(|&(dr, dc)| put(grid, row + dr, col + dc, 1))
}

fn put(grid: &mut Grid, row: usize, col: usize, value: u8) -> Result<(), SeedError> {
    if row >= grid.rows() || col >= grid.cols() {
        return Err(SeedError::OutOfBounds {
            row,
            col,
            rows: grid.rows(),
            cols: grid.cols(),
        });
    }
    grid.set(row, col, value);
    Ok(())
}
