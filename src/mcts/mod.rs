//! Monte Carlo Tree Search over a shared position graph.
//!
//! ## Overview
//!
//! - **Transpositions**: positions reached by different move orders share
//!   one node, so the search structure is a DAG rather than a tree
//! - **Arena storage**: nodes live in one `Vec` and link by `NodeId`
//! - **Persistent graph**: offline training and online search feed the
//!   same graph for the engine's lifetime
//! - **Configurable policies**: selection and simulation are traits
//!
//! ## Usage
//!
//! ```rust
//! use rust_connect4::board::HashKeyTable;
//! use rust_connect4::game::GameState;
//! use rust_connect4::mcts::{MCTSConfig, MctsEngine, SearchLimits};
//!
//! let keys = HashKeyTable::new(7);
//! let mut engine = MctsEngine::new(&keys, MCTSConfig::default()).unwrap();
//!
//! // Offline training from the empty board
//! engine.train(500);
//!
//! // Online search for the current position
//! let state = GameState::new(&keys);
//! let limits = SearchLimits::default().with_max_playouts(200);
//! let action = engine.search(&state, limits);
//! assert!(action.is_some());
//! ```
//!
//! ## Custom Policies
//!
//! ```rust,ignore
//! let engine = MctsEngine::new(&keys, config)?
//!     .with_simulation(MyHeuristicPlayout);
//! ```

pub mod config;
pub mod graph;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod transposition;

// Re-export main types
pub use config::{ConfigError, MCTSConfig, SearchLimits, MAX_NODE_LIMIT};
pub use graph::{GraphStats, SearchGraph};
pub use node::{NodeId, SearchNode};
pub use policy::{RandomPlayout, SelectionPolicy, SimulationPolicy, UCB1};
pub use search::MctsEngine;
pub use stats::SearchStats;
pub use transposition::TranspositionTable;
