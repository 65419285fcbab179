//! MCTS configuration parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::COLUMN_SIZE;

/// Largest accepted `max_nodes`.
///
/// Node ids are `u32`, and one expansion may add a child per column past
/// the cap.
pub const MAX_NODE_LIMIT: usize = u32::MAX as usize - COLUMN_SIZE as usize;

/// Rejected configuration values.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("expansion threshold must be at least 1")]
    ZeroExpansionThreshold,

    #[error("UCB constant must be finite and non-negative, got {0}")]
    InvalidUcbConstant(f64),

    #[error("epsilon must be finite and positive, got {0}")]
    InvalidEpsilon(f64),

    #[error("node cap must be at least 1")]
    ZeroMaxNodes,

    #[error("node cap {0} exceeds the node id range")]
    TooManyNodes(usize),
}

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MCTSConfig {
    /// Visits a node needs before it is expanded into children.
    pub to_expand: u32,

    /// UCB1 exploration constant.
    pub ucb_const: f64,

    /// Guard added to denominators to avoid division by zero.
    pub epsilon: f64,

    /// Seed for the engine's RNG.
    /// Same seed and key table produce identical searches.
    pub seed: u64,

    /// Arena capacity. Once reached, frontier nodes are no longer expanded.
    pub max_nodes: usize,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            to_expand: 15,
            ucb_const: 100.0,
            epsilon: 1e-8,
            seed: 42,
            max_nodes: 1_000_000,
        }
    }
}

impl MCTSConfig {
    /// Set the expansion threshold.
    pub fn with_to_expand(mut self, visits: u32) -> Self {
        self.to_expand = visits;
        self
    }

    /// Set the UCB1 exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.ucb_const = c;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the arena capacity.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Check that every parameter is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.to_expand == 0 {
            return Err(ConfigError::ZeroExpansionThreshold);
        }
        if !self.ucb_const.is_finite() || self.ucb_const < 0.0 {
            return Err(ConfigError::InvalidUcbConstant(self.ucb_const));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(ConfigError::InvalidEpsilon(self.epsilon));
        }
        if self.max_nodes == 0 {
            return Err(ConfigError::ZeroMaxNodes);
        }
        if self.max_nodes > MAX_NODE_LIMIT {
            return Err(ConfigError::TooManyNodes(self.max_nodes));
        }
        Ok(())
    }
}

/// Budget for one online search.
///
/// Search stops at whichever limit is hit first. The deadline is checked
/// between playouts, so a playout in progress always completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimits {
    /// Wall-clock budget in milliseconds.
    pub time_budget_ms: u64,

    /// Maximum playouts.
    pub max_playouts: u32,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            time_budget_ms: 1000,
            max_playouts: 10_000,
        }
    }
}

impl SearchLimits {
    /// Set the wall-clock budget.
    pub fn with_time_budget_ms(mut self, ms: u64) -> Self {
        self.time_budget_ms = ms;
        self
    }

    /// Set the playout cap.
    pub fn with_max_playouts(mut self, playouts: u32) -> Self {
        self.max_playouts = playouts;
        self
    }

    /// The wall-clock budget.
    #[must_use]
    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }
}
