//! Compute module - Grid state, neighborhoods and the rule engines.

mod automaton;
mod elementary;
mod forest_fire;
mod grid;
mod life;
mod majority;
mod neighborhood;
mod stats;

pub use automaton::{
    AutomatonError, CellularAutomaton, Lifecycle, parse_step_count, rng_from_seed,
};
pub(crate) use automaton::{check_dimensions, check_probability, check_seed};
pub use elementary::{ElementaryCA, rule_output};
pub use forest_fire::{BURNING, EMPTY, ForestFire, TREE, fire_transition, has_burning_neighbor};
pub use grid::{DoubleBuffer, Grid};
pub use life::{ALIVE, DEAD, GameOfLife, life_transition};
pub use majority::{MajorityCA, majority_transition};
pub use neighborhood::{
    MOORE_OFFSETS, count_moore, elementary_triple, moore, window, window_offsets, window_sum,
};
pub use stats::Census;
