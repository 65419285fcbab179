//! MCTS search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

use crate::core::PlayerMap;
use crate::game::GameResult;

/// Statistics accumulated over an engine's lifetime.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Playout cycles performed.
    pub playouts: u32,

    /// Nodes expanded into children.
    pub nodes_expanded: u32,

    /// Children that resolved to an already known position.
    pub transpositions: u32,

    /// Playout wins per player.
    pub wins: PlayerMap<u32>,

    /// Drawn playouts.
    pub draws: u32,

    /// Deepest selection descent.
    pub max_depth: u32,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record the outcome of one playout.
    pub fn record(&mut self, result: GameResult) {
        self.playouts += 1;
        match result {
            GameResult::Winner(player) => self.wins[player] += 1,
            GameResult::Draw => self.draws += 1,
        }
    }

    /// Calculate playouts per second.
    #[must_use]
    pub fn playouts_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.playouts as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }
}
