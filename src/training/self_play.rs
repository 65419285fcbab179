//! Self-play loop driven by an `MctsEngine`.
//!
//! Each player is assigned a `Strategy`. Online strategies grow the
//! engine's graph while the game is played, so later games see the
//! positions explored by earlier ones.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::board::Point;
use crate::core::{PlayerId, PlayerMap};
use crate::game::{GameState, MoveResult};
use crate::mcts::{MctsEngine, SearchLimits};

use super::record::GameRecord;

/// How a player picks its moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Uniformly random legal move.
    Random,

    /// Best explored move in the current graph, without further search.
    Trained,

    /// Search from the current position first, then pick the best move.
    Online(SearchLimits),
}

/// Configuration for self-play.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelfPlayConfig {
    /// Maximum moves per game. A full board takes 42.
    pub max_moves: usize,

    /// Strategy of each player.
    pub strategies: PlayerMap<Strategy>,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            max_moves: 42,
            strategies: PlayerMap::from_array([Strategy::Trained, Strategy::Trained]),
        }
    }
}

impl SelfPlayConfig {
    /// Create a new self-play config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum moves per game.
    pub fn with_max_moves(mut self, max: usize) -> Self {
        self.max_moves = max;
        self
    }

    /// Set one player's strategy.
    pub fn with_strategy(mut self, player: PlayerId, strategy: Strategy) -> Self {
        self.strategies[player] = strategy;
        self
    }

    /// Set both strategies, player 0 first.
    pub fn with_strategies(mut self, first: Strategy, second: Strategy) -> Self {
        self.strategies = PlayerMap::from_array([first, second]);
        self
    }
}

/// Worker for running self-play games.
#[derive(Clone, Debug, Default)]
pub struct SelfPlayWorker {
    config: SelfPlayConfig,
}

impl SelfPlayWorker {
    /// Create a new self-play worker.
    pub fn new(config: SelfPlayConfig) -> Self {
        Self { config }
    }

    /// Play one game from the empty board.
    ///
    /// Stops on a win or draw, when the engine has no move, or after
    /// `max_moves` moves. In the last two cases the record has no result.
    pub fn play_game<'k>(&self, engine: &mut MctsEngine<'k>) -> GameRecord {
        let mut state = GameState::new(engine.keys());
        let mut record = GameRecord::new();

        while record.len() < self.config.max_moves {
            let mover = state.turn();
            let Some(point) = self.choose(engine, &state, mover) else {
                break;
            };

            let result = state.advance(point.column, point.height);
            if result == MoveResult::Invalid {
                warn!(%mover, %point, "engine proposed an illegal move");
                break;
            }

            record.push(point);
            if let Some(outcome) = result.game_result(mover) {
                record.result = Some(outcome);
                break;
            }
        }

        debug!(moves = record.len(), result = ?record.result, "self-play game finished");
        record
    }

    /// Play `count` games in sequence on the same engine.
    pub fn play_games(&self, engine: &mut MctsEngine<'_>, count: usize) -> Vec<GameRecord> {
        (0..count).map(|_| self.play_game(engine)).collect()
    }

    fn choose<'k>(
        &self,
        engine: &mut MctsEngine<'k>,
        state: &GameState<'k>,
        mover: PlayerId,
    ) -> Option<Point> {
        match self.config.strategies[mover] {
            Strategy::Random => engine.select_random(state),
            Strategy::Trained => engine.select(state),
            Strategy::Online(limits) => engine.search(state, limits),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &SelfPlayConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::HashKeyTable;
    use crate::mcts::MCTSConfig;

    #[test]
    fn test_self_play_config_default() {
        let config = SelfPlayConfig::default();
        assert_eq!(config.max_moves, 42);
        assert_eq!(config.strategies[PlayerId::FIRST], Strategy::Trained);
        assert_eq!(config.strategies[PlayerId::SECOND], Strategy::Trained);
    }

    #[test]
    fn test_self_play_config_builders() {
        let limits = SearchLimits::default().with_max_playouts(5);
        let config = SelfPlayConfig::new()
            .with_max_moves(10)
            .with_strategies(Strategy::Random, Strategy::Random)
            .with_strategy(PlayerId::SECOND, Strategy::Online(limits));

        assert_eq!(config.max_moves, 10);
        assert_eq!(config.strategies[PlayerId::FIRST], Strategy::Random);
        assert_eq!(config.strategies[PlayerId::SECOND], Strategy::Online(limits));
    }

    #[test]
    fn test_play_game_random() {
        let keys = HashKeyTable::new(4);
        let mut engine = MctsEngine::new(&keys, MCTSConfig::default()).unwrap();
        let worker = SelfPlayWorker::new(
            SelfPlayConfig::default().with_strategies(Strategy::Random, Strategy::Random),
        );

        let record = worker.play_game(&mut engine);

        assert!(record.len() >= 7);
        assert!(record.len() <= 42);
        assert!(record.result.is_some());
    }

    #[test]
    fn test_play_game_max_moves() {
        let keys = HashKeyTable::new(4);
        let mut engine = MctsEngine::new(&keys, MCTSConfig::default()).unwrap();
        let worker = SelfPlayWorker::new(
            SelfPlayConfig::default()
                .with_max_moves(3)
                .with_strategies(Strategy::Random, Strategy::Random),
        );

        let record = worker.play_game(&mut engine);

        assert_eq!(record.len(), 3);
        assert_eq!(record.result, None);
    }

    #[test]
    fn test_play_game_zero_moves() {
        let keys = HashKeyTable::new(4);
        let mut engine = MctsEngine::new(&keys, MCTSConfig::default()).unwrap();
        let worker = SelfPlayWorker::new(SelfPlayConfig::default().with_max_moves(0));

        let record = worker.play_game(&mut engine);
        assert!(record.is_empty());
    }

    #[test]
    fn test_play_games_count() {
        let keys = HashKeyTable::new(4);
        let mut engine = MctsEngine::new(&keys, MCTSConfig::default()).unwrap();
        engine.train(300);
        let worker = SelfPlayWorker::default();

        let records = worker.play_games(&mut engine, 3);

        assert_eq!(records.len(), 3);
        for record in &records {
            assert!(record.result.is_some());
        }
    }
}
