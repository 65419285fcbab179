//! Self-play on top of the search engine.
//!
//! ## Overview
//!
//! - **GameRecord**: the moves of one game and how it ended
//! - **SelfPlayWorker**: plays games with a `Strategy` per player
//!
//! ## Usage
//!
//! ```rust
//! use rust_connect4::board::HashKeyTable;
//! use rust_connect4::mcts::{MCTSConfig, MctsEngine};
//! use rust_connect4::training::{SelfPlayConfig, SelfPlayWorker, Strategy};
//!
//! let keys = HashKeyTable::new(1);
//! let mut engine = MctsEngine::new(&keys, MCTSConfig::default()).unwrap();
//! engine.train(1_000);
//!
//! let config = SelfPlayConfig::default().with_strategies(Strategy::Trained, Strategy::Random);
//! let record = SelfPlayWorker::new(config).play_game(&mut engine);
//! assert!(record.result.is_some());
//! ```

pub mod record;
pub mod self_play;

// Re-export main types
pub use record::GameRecord;
pub use self_play::{SelfPlayConfig, SelfPlayWorker, Strategy};
