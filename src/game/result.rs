//! Move and game outcomes.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Effect of a single `advance` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveResult {
    /// The move was not a legal action; nothing changed.
    Invalid,
    /// The stone was placed and the turn passed to the opponent.
    Placed,
    /// The stone completed a line; the mover is still `turn()`.
    Won,
    /// No moves remain.
    Draw,
}

impl MoveResult {
    /// Whether the game is over after this result.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, MoveResult::Won | MoveResult::Draw)
    }

    /// Translate into a game result, given the player who moved.
    #[must_use]
    pub fn game_result(self, mover: PlayerId) -> Option<GameResult> {
        match self {
            MoveResult::Won => Some(GameResult::Winner(mover)),
            MoveResult::Draw => Some(GameResult::Draw),
            MoveResult::Placed | MoveResult::Invalid => None,
        }
    }
}

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Board filled with no line.
    Draw,
}

impl GameResult {
    /// The winning player, if any.
    #[must_use]
    pub fn winner(self) -> Option<PlayerId> {
        match self {
            GameResult::Winner(player) => Some(player),
            GameResult::Draw => None,
        }
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(self, player: PlayerId) -> bool {
        self.winner() == Some(player)
    }
}
