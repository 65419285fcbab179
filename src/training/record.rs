//! Game records produced by self-play.
//!
//! A record keeps the moves in the order they were played together with
//! the final outcome. Replaying the moves against the key table the game
//! was played with yields the final position again.

use serde::{Deserialize, Serialize};

use crate::board::{HashKeyTable, Point};
use crate::core::PlayerId;
use crate::game::{GameResult, GameState};

/// A complete (or truncated) game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Moves in play order; player 0 made the even-indexed ones.
    pub moves: Vec<Point>,

    /// Final outcome, or `None` if the game was cut short.
    pub result: Option<GameResult>,
}

impl GameRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a move.
    pub fn push(&mut self, point: Point) {
        self.moves.push(point);
    }

    /// Number of moves played.
    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Check if no move was played.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// The winner, if the game ended with one.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.result.and_then(GameResult::winner)
    }

    /// Rebuild the final position by re-applying every move.
    #[must_use]
    pub fn replay<'k>(&self, keys: &'k HashKeyTable) -> GameState<'k> {
        let mut state = GameState::new(keys);
        for point in &self.moves {
            state.advance(point.column, point.height);
        }
        state
    }
}
