//! Grid automata - discrete-state cellular automata on bounded grids.
//!
//! Every cell holds a small integer state that evolves synchronously: each
//! generation is computed entirely from the previous one, then committed.
//!
//! # Architecture
//!
//! - `compute`: grid state, neighborhood extraction and the four rule engines
//!   (elementary 1D, forest fire, Game of Life, majority vote)
//! - `schema`: configuration and seed patterns
//! - `render`: plain-text frames
//! - `menu`: the interactive selection front end
//!
//! # Example
//!
//! ```rust
//! use grid_automata::compute::{CellularAutomaton, GameOfLife};
//! use grid_automata::schema::Pattern;
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let mut life = GameOfLife::with_rng(5, 5, StdRng::seed_from_u64(1)).unwrap();
//! let blinker = Pattern::Blinker { row: 2, col: 1, vertical: false };
//! life.load(blinker.generate(5, 5).unwrap()).unwrap();
//!
//! let mut frames = Vec::new();
//! life.evolve(2, &mut frames).unwrap();
//! assert_eq!(life.grid(), &blinker.generate(5, 5).unwrap());
//! ```

pub mod compute;
pub mod menu;
pub mod render;
pub mod schema;

// Re-export commonly used types
pub use compute::{
    AutomatonError, CellularAutomaton, ElementaryCA, ForestFire, GameOfLife, Grid, Lifecycle,
    MajorityCA,
};
pub use menu::{AutomatonKind, Menu, MenuError, MenuOutcome};
pub use schema::{MenuConfig, Pattern, Seed};
