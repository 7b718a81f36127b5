//! Schema module - Configuration and seeding types for automata.

mod config;
mod seed;

pub use config::*;
pub use seed::*;
