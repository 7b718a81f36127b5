//! Conway's Game of Life (B3/S23) on a bounded, non-wrapping grid.

use std::io::{self, Write};

use rand::{Rng, rngs::StdRng};

use super::{
    AutomatonError, CellularAutomaton, DoubleBuffer, Grid, Lifecycle, check_dimensions,
    check_seed, count_moore, rng_from_seed,
};
use crate::render::{self, Palette};
use crate::schema::LifeConfig;

pub const DEAD: u8 = 0;
pub const ALIVE: u8 = 1;

/// Probability that a cell starts dead in a random initialization.
const DEAD_PROBABILITY: f64 = 0.5;

/// B3/S23: survive on 2 or 3 live neighbors, birth on exactly 3.
#[inline]
pub fn life_transition(cell: u8, live_neighbors: usize) -> u8 {
    match (cell == ALIVE, live_neighbors) {
        (true, 2 | 3) | (false, 3) => ALIVE,
        _ => DEAD,
    }
}

/// Game of Life grid. Cells past the edge are absent, never wrapped.
#[derive(Debug, Clone)]
pub struct GameOfLife<R = StdRng> {
    buffer: DoubleBuffer,
    rng: R,
    lifecycle: Lifecycle,
    generation: u64,
}

impl GameOfLife<StdRng> {
    pub fn new(rows: usize, cols: usize) -> Result<Self, AutomatonError> {
        Self::with_rng(rows, cols, rng_from_seed(None))
    }
}

impl<R: Rng> GameOfLife<R> {
    pub fn with_rng(rows: usize, cols: usize, rng: R) -> Result<Self, AutomatonError> {
        check_dimensions(rows, cols)?;
        log::info!("Game of Life: {rows}x{cols}");
        Ok(Self {
            buffer: DoubleBuffer::new(rows, cols),
            rng,
            lifecycle: Lifecycle::Uninitialized,
            generation: 0,
        })
    }

    /// Build from configuration, stamping the configured seed if there is one.
    pub fn from_config(config: &LifeConfig, rng: R) -> Result<Self, AutomatonError> {
        let mut life = Self::with_rng(config.rows, config.cols, rng)?;
        if let Some(seed) = &config.seed {
            life.load(seed.generate(config.rows, config.cols)?)?;
        }
        Ok(life)
    }

    /// Counts total alive cells.
    pub fn population(&self) -> usize {
        self.grid().cells().iter().filter(|&&c| c == ALIVE).count()
    }
}

impl<R: Rng> CellularAutomaton for GameOfLife<R> {
    fn name(&self) -> &'static str {
        "Game of Life"
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
        self.buffer.current_mut().fill_with(|_, _| {
            if rng.r#gen::<f64>() < DEAD_PROBABILITY {
                DEAD
            } else {
                ALIVE
            }
        });
        self.lifecycle = Lifecycle::Initialized;
    }

    fn load(&mut self, grid: Grid) -> Result<(), AutomatonError> {
        check_seed(&grid, self.dimensions(), self.states())?;
        self.buffer.replace(grid);
        self.lifecycle = Lifecycle::Initialized;
        Ok(())
    }

    fn apply_rules(&mut self) {
        self.buffer.step(|current, row, col| {
            life_transition(current.get(row, col), count_moore(current, row, col, ALIVE))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Pattern, Seed, SeedError};
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn life_with(pattern: Pattern, rows: usize, cols: usize) -> GameOfLife {
        let mut life = GameOfLife::with_rng(rows, cols, StdRng::seed_from_u64(1)).unwrap();
        life.load(pattern.generate(rows, cols).unwrap()).unwrap();
        life
    }

    #[test]
    fn test_transition_table() {
        for n in 0..=8 {
            let survive = if n == 2 || n == 3 { ALIVE } else { DEAD };
            let birth = if n == 3 { ALIVE } else { DEAD };
            assert_eq!(life_transition(ALIVE, n), survive, "alive with {n}");
            assert_eq!(life_transition(DEAD, n), birth, "dead with {n}");
        }
    }

    #[test]
    fn test_oversized_grid_rejected() {
        assert!(matches!(
            GameOfLife::with_rng(usize::MAX / 2 + 1, 4, StdRng::seed_from_u64(0)),
            Err(AutomatonError::InvalidDimensions { cols: 4, .. })
        ));
    }

    #[test]
    fn test_from_config_stamps_seed() {
        let config = LifeConfig {
            rows: 4,
            cols: 4,
            seed: Some(Seed {
                patterns: vec![Pattern::Block { row: 1, col: 1 }],
            }),
        };
        let life = GameOfLife::from_config(&config, StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(life.lifecycle(), Lifecycle::Initialized);
        assert_eq!(life.population(), 4);
        assert_eq!(life.grid().get(2, 2), ALIVE);

        let config = LifeConfig {
            seed: Some(Seed {
                patterns: vec![Pattern::Glider { row: 3, col: 3 }],
            }),
            ..config
        };
        assert!(matches!(
            GameOfLife::from_config(&config, StdRng::seed_from_u64(0)),
            Err(AutomatonError::Seed(SeedError::OutOfBounds { .. }))
        ));
    }

    #[test]
    fn test_block_is_still() {
        let mut life = life_with(Pattern::Block { row: 1, col: 1 }, 4, 4);
        let block = life.grid().clone();
        for _ in 0..10 {
            life.apply_rules();
            assert_eq!(life.grid(), &block);
        }
    }

    #[test]
    fn test_blinker_has_period_two() {
        let mut life = life_with(
            Pattern::Blinker {
                row: 2,
                col: 1,
                vertical: false,
            },
            5,
            5,
        );
        let horizontal = life.grid().clone();

        life.apply_rules();
        let vertical = life.grid().clone();
        assert_ne!(vertical, horizontal);
        assert_eq!(vertical.get(1, 2), ALIVE);
        assert_eq!(vertical.get(2, 2), ALIVE);
        assert_eq!(vertical.get(3, 2), ALIVE);
        assert_eq!(life.population(), 3);

        life.apply_rules();
        assert_eq!(life.grid(), &horizontal);
    }

    #[test]
    fn test_glider_moves_diagonally() {
        let mut life = life_with(Pattern::Glider { row: 0, col: 0 }, 8, 8);
        for _ in 0..4 {
            life.apply_rules();
        }
        let shifted = Pattern::Glider { row: 1, col: 1 }.generate(8, 8).unwrap();
        assert_eq!(life.grid(), &shifted);
    }

    #[test]
    fn test_edges_do_not_wrap() {
        // A blinker cut by the border is a domino that dies out.
        let mut life = life_with(
            Pattern::Blinker {
                row: 0,
                col: 0,
                vertical: false,
            },
            3,
            3,
        );
        life.apply_rules();
        life.apply_rules();
        assert_eq!(life.population(), 0);
    }

    proptest! {
        #[test]
        fn test_dimensions_fixed(seed: u64, rows in 1usize..16, cols in 1usize..16, steps in 0usize..8) {
            let mut life = GameOfLife::with_rng(rows, cols, StdRng::seed_from_u64(seed)).unwrap();
            life.initialize_random_state();
            for _ in 0..steps {
                life.apply_rules();
            }
            prop_assert_eq!(life.dimensions(), (rows, cols));
            prop_assert!(life.grid().max_value() <= ALIVE);
        }

        #[test]
        fn test_print_state_is_pure(seed: u64) {
            let mut life = GameOfLife::with_rng(6, 6, StdRng::seed_from_u64(seed)).unwrap();
            life.initialize_random_state();
            let before = life.grid().clone();
            let mut first = Vec::new();
            let mut second = Vec::new();
            life.print_state(&mut first).unwrap();
            life.print_state(&mut second).unwrap();
            prop_assert_eq!(first, second);
            prop_assert_eq!(life.grid(), &before);
        }
    }
}
