//! Forest-fire automaton: trees ignite from burning neighbors or spontaneously,
//! burn for one step, and leave empty ground. Nothing regrows.

use std::io::{self, Write};

use rand::{Rng, rngs::StdRng};

use super::{
    AutomatonError, CellularAutomaton, DoubleBuffer, Grid, Lifecycle, check_dimensions,
    check_probability, check_seed, moore, rng_from_seed,
};
use crate::render::{self, Palette};
use crate::schema::ForestFireConfig;

pub const EMPTY: u8 = 0;
pub const TREE: u8 = 1;
pub const BURNING: u8 = 2;

/// Next state of a cell.
///
/// `ignites` is only consulted for a tree with no burning neighbor, and
/// reports whether that tree catches fire spontaneously this step.
#[inline]
pub fn fire_transition(cell: u8, burning_neighbor: bool, ignites: impl FnOnce() -> bool) -> u8 {
    match cell {
        BURNING => EMPTY,
        TREE => {
            if burning_neighbor || ignites() {
                BURNING
            } else {
                TREE
            }
        }
        _ => EMPTY,
    }
}

/// Whether any in-grid Moore neighbor of (row, col) is burning.
#[inline]
pub fn has_burning_neighbor(grid: &Grid, row: usize, col: usize) -> bool {
    moore(grid, row, col).any(|v| v == BURNING)
}

/// Stochastic forest-fire spread on a bounded grid.
#[derive(Debug, Clone)]
pub struct ForestFire<R = StdRng> {
    buffer: DoubleBuffer,
    tree_density: f64,
    ignition_probability: f64,
    rng: R,
    lifecycle: Lifecycle,
    generation: u64,
}

impl ForestFire<StdRng> {
    pub fn new(
        rows: usize,
        cols: usize,
        tree_density: f64,
        ignition_probability: f64,
    ) -> Result<Self, AutomatonError> {
        Self::with_rng(
            rows,
            cols,
            tree_density,
            ignition_probability,
            rng_from_seed(None),
        )
    }
}

impl<R: Rng> ForestFire<R> {
    /// Create an empty forest drawing from `rng`.
    pub fn with_rng(
        rows: usize,
        cols: usize,
        tree_density: f64,
        ignition_probability: f64,
        rng: R,
    ) -> Result<Self, AutomatonError> {
        check_dimensions(rows, cols)?;
        check_probability("tree_density", tree_density)?;
        check_probability("ignition_probability", ignition_probability)?;

        log::info!(
            "Forest fire: {rows}x{cols}, density {tree_density}, ignition {ignition_probability}"
        );

        Ok(Self {
            buffer: DoubleBuffer::new(rows, cols),
            tree_density,
            ignition_probability,
            rng,
            lifecycle: Lifecycle::Uninitialized,
            generation: 0,
        })
    }

    /// Build from configuration.
    pub fn from_config(config: &ForestFireConfig, rng: R) -> Result<Self, AutomatonError> {
        Self::with_rng(
            config.rows,
            config.cols,
            config.tree_density,
            config.ignition_probability,
            rng,
        )
    }

    /// Number of cells currently burning.
    pub fn burning(&self) -> usize {
        self.grid().cells().iter().filter(|&&c| c == BURNING).count()
    }
}

impl<R: Rng> CellularAutomaton for ForestFire<R> {
    fn name(&self) -> &'static str {
        "Forest Fire"
    }

    fn states(&self) -> u8 {
        3
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
        let density = self.tree_density;
        self.buffer
            .current_mut()
            .fill_with(|_, _| if rng.r#gen::<f64>() < density { TREE } else { EMPTY });
        self.lifecycle = Lifecycle::Initialized;
    }

    fn load(&mut self, grid: Grid) -> Result<(), AutomatonError> {
        check_seed(&grid, self.dimensions(), self.states())?;
        self.buffer.replace(grid);
        self.lifecycle = Lifecycle::Initialized;
        Ok(())
    }

    fn apply_rules(&mut self) {
        let rng = &mut self.rng;
        let p = self.ignition_probability;
        self.buffer.step(|current, row, col| {
            fire_transition(
                current.get(row, col),
                has_burning_neighbor(current, row, col),
                || rng.r#gen::<f64>() < p,
            )
        });
        self.generation += 1;
    }

    fn print_state(&self, out: &mut dyn Write) -> io::Result<()> {
        render::write_frame(out, self.grid(), Palette::FOREST)
    }

    fn begin_evolution(&mut self) {
        self.lifecycle = Lifecycle::Evolving;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::mock::StepRng;

    fn forest(rows: usize, cols: usize, density: f64, p: f64) -> ForestFire {
        ForestFire::with_rng(rows, cols, density, p, StdRng::seed_from_u64(42)).unwrap()
    }

    fn filled(rows: usize, cols: usize, value: u8) -> Grid {
        Grid::from_rows(&vec![vec![value; cols]; rows]).unwrap()
    }

    #[test]
    fn test_transition_table() {
        assert_eq!(fire_transition(BURNING, true, || true), EMPTY);
        assert_eq!(fire_transition(EMPTY, true, || true), EMPTY);
        assert_eq!(fire_transition(TREE, true, || false), BURNING);
        assert_eq!(fire_transition(TREE, false, || true), BURNING);
        assert_eq!(fire_transition(TREE, false, || false), TREE);
    }

    #[test]
    fn test_invalid_parameters() {
        let rng = || StdRng::seed_from_u64(0);
        assert!(ForestFire::with_rng(0, 5, 0.5, 0.1, rng()).is_err());
        assert!(matches!(
            ForestFire::with_rng(5, 5, 1.5, 0.1, rng()),
            Err(AutomatonError::InvalidProbability {
                name: "tree_density",
                ..
            })
        ));
        assert!(matches!(
            ForestFire::with_rng(5, 5, 0.5, -0.1, rng()),
            Err(AutomatonError::InvalidProbability {
                name: "ignition_probability",
                ..
            })
        ));
    }

    #[test]
    fn test_density_extremes() {
        let mut full = forest(6, 6, 1.0, 0.0);
        full.initialize_random_state();
        assert!(full.grid().cells().iter().all(|&c| c == TREE));

        let mut bare = forest(6, 6, 0.0, 0.0);
        bare.initialize_random_state();
        assert!(bare.grid().cells().iter().all(|&c| c == EMPTY));
    }

    #[test]
    fn test_fire_spreads_to_all_neighbors() {
        let mut ff = forest(5, 5, 1.0, 0.0);
        let mut grid = filled(5, 5, TREE);
        grid.set(2, 2, BURNING);
        ff.load(grid).unwrap();

        ff.apply_rules();
        let g = ff.grid();
        assert_eq!(g.get(2, 2), EMPTY);
        for (dr, dc) in crate::compute::MOORE_OFFSETS {
            let (r, c) = ((2 + dr) as usize, (2 + dc) as usize);
            assert_eq!(g.get(r, c), BURNING, "({r}, {c})");
        }
        assert_eq!(g.get(0, 0), TREE);
        assert_eq!(ff.burning(), 8);

        ff.apply_rules();
        let g = ff.grid();
        for (dr, dc) in crate::compute::MOORE_OFFSETS {
            let (r, c) = ((2 + dr) as usize, (2 + dc) as usize);
            assert_eq!(g.get(r, c), EMPTY);
        }
        // The outer ring caught fire from the second wave.
        assert_eq!(g.get(0, 0), BURNING);
        assert_eq!(g.get(4, 4), BURNING);
    }

    #[test]
    fn test_certain_ignition() {
        // p = 1: every tree without a burning neighbor still ignites.
        let mut ff = forest(3, 3, 1.0, 1.0);
        ff.initialize_random_state();
        ff.apply_rules();
        assert_eq!(ff.burning(), 9);
        ff.apply_rules();
        assert!(ff.grid().cells().iter().all(|&c| c == EMPTY));
    }

    #[test]
    fn test_injected_rng_drives_ignition() {
        // StepRng(0, 0) always draws 0.0, which is below any positive p.
        let mut ff = ForestFire::with_rng(2, 2, 0.5, 0.01, StepRng::new(0, 0)).unwrap();
        ff.initialize_random_state();
        assert!(ff.grid().cells().iter().all(|&c| c == TREE));
        ff.apply_rules();
        assert_eq!(ff.burning(), 4);
    }

    #[test]
    fn test_evolve_output() {
        let mut ff = forest(1, 2, 1.0, 0.0);
        ff.load(Grid::from_rows(&[vec![BURNING, TREE]]).unwrap())
            .unwrap();
        let mut out = Vec::new();
        ff.evolve(2, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Step 1\n! + \n\nStep 2\n= ! \n\n"
        );
        assert_eq!(ff.grid().row(0), &[EMPTY, EMPTY]);
    }

    #[test]
    fn test_load_rejects_foreign_states() {
        let mut ff = forest(2, 2, 0.5, 0.0);
        assert!(ff.load(filled(2, 2, 3)).is_err());
        assert!(ff.load(filled(2, 3, TREE)).is_err());
        assert_eq!(ff.lifecycle(), Lifecycle::Uninitialized);
    }

    proptest! {
        #[test]
        fn test_no_fire_means_no_change(
            seed: u64,
            rows in 1usize..12,
            cols in 1usize..12,
            density in 0.0f64..=1.0,
        ) {
            let mut ff = ForestFire::with_rng(rows, cols, density, 0.0, StdRng::seed_from_u64(seed)).unwrap();
            ff.initialize_random_state();
            let before = ff.grid().clone();
            for _ in 0..5 {
                ff.apply_rules();
            }
            prop_assert_eq!(ff.grid(), &before);
            prop_assert_eq!(ff.dimensions(), (rows, cols));
        }

        #[test]
        fn test_print_state_is_pure(seed: u64, ignition in 0.0f64..=1.0) {
            let mut ff = ForestFire::with_rng(6, 6, 0.7, ignition, StdRng::seed_from_u64(seed)).unwrap();
            ff.initialize_random_state();
            let mut twin = ff.clone();
            let mut first = Vec::new();
            let mut second = Vec::new();
            ff.print_state(&mut first).unwrap();
            ff.print_state(&mut second).unwrap();
            prop_assert_eq!(first, second);
            prop_assert_eq!(ff.grid(), twin.grid());

            // Printing draws nothing from the random source.
            ff.apply_rules();
            twin.apply_rules();
            prop_assert_eq!(ff.grid(), twin.grid());
        }
    }
}
