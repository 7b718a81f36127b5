//! Configuration types for automaton construction parameters.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Seed, SeedError};

/// Default history depth: only the live row.
fn default_history() -> usize {
    1
}

/// Construction parameters for every automaton the front end can run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuConfig {
    #[serde(default)]
    pub elementary: ElementaryConfig,
    #[serde(default)]
    pub forest_fire: ForestFireConfig,
    #[serde(default)]
    pub life: LifeConfig,
    #[serde(default)]
    pub majority: MajorityConfig,
    /// Seed for every automaton's random source. `None` draws from entropy.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

/// 1D binary-rule automaton parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementaryConfig {
    /// Cells per generation.
    pub cols: usize,
    /// Generations kept in the trace buffer, including the live one.
    #[serde(default = "default_history")]
    pub history: usize,
    /// Wolfram rule number.
    pub rule: u8,
    /// Values copied into the leading cells of the first generation.
    pub initial_state: Vec<u8>,
}

impl Default for ElementaryConfig {
    fn default() -> Self {
        Self {
            cols: 30,
            history: 1,
            rule: 30,
            initial_state: vec![1, 0, 1],
        }
    }
}

/// Forest-fire parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestFireConfig {
    pub rows: usize,
    pub cols: usize,
    /// Probability that a cell starts as a tree.
    pub tree_density: f64,
    /// Per-step probability that a tree ignites on its own.
    pub ignition_probability: f64,
}

impl Default for ForestFireConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            tree_density: 0.5,
            ignition_probability: 0.3,
        }
    }
}

/// Game of Life parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifeConfig {
    pub rows: usize,
    pub cols: usize,
    /// Starting patterns. Without one the grid is randomized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<Seed>,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            seed: None,
        }
    }
}

/// Majority-rule parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MajorityConfig {
    pub rows: usize,
    pub cols: usize,
    /// Side of the square voting window. Odd sizes are symmetric.
    pub neighborhood_size: usize,
}

impl Default for MajorityConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            neighborhood_size: 3,
        }
    }
}

impl MenuConfig {
    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: MenuConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let e = &self.elementary;
        if e.cols == 0 || e.history == 0 {
            return Err(ConfigError::InvalidDimensions("elementary"));
        }
        if e.initial_state.is_empty() || e.initial_state.len() > e.cols {
            return Err(ConfigError::InvalidInitialState {
                len: e.initial_state.len(),
                cols: e.cols,
            });
        }
        if e.initial_state.iter().any(|&v| v > 1) {
            return Err(ConfigError::InvalidCellValue("elementary"));
        }

        let f = &self.forest_fire;
        if f.rows == 0 || f.cols == 0 {
            return Err(ConfigError::InvalidDimensions("forest_fire"));
        }
        for (name, value) in [
            ("tree_density", f.tree_density),
            ("ignition_probability", f.ignition_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { name, value });
            }
        }

        let l = &self.life;
        if l.rows == 0 || l.cols == 0 || l.rows.checked_mul(l.cols).is_none() {
            return Err(ConfigError::InvalidDimensions("life"));
        }
        if let Some(seed) = &l.seed {
            seed.generate(l.rows, l.cols)?;
        }

        let m = &self.majority;
        if m.rows == 0 || m.cols == 0 {
            return Err(ConfigError::InvalidDimensions("majority"));
        }
        if m.neighborhood_size == 0 {
            return Err(ConfigError::InvalidNeighborhoodSize);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Grid dimensions for {0} must be non-zero")]
    InvalidDimensions(&'static str),
    #[error("Initial state must hold between 1 and {cols} cells (got {len})")]
    InvalidInitialState { len: usize, cols: usize },
    #[error("Cell values for {0} must be 0 or 1")]
    InvalidCellValue(&'static str),
    #[error("{name} must be within [0, 1] (got {value})")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("Neighborhood size must be at least 1")]
    InvalidNeighborhoodSize,
    #[error("Invalid life seed: {0}")]
    Seed(#[from] SeedError),
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
