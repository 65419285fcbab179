//! # rust-connect4
//!
//! A connect-four engine on bitboards with a Monte Carlo player that
//! shares positions across transpositions.
//!
//! ## Design Principles
//!
//! 1. **Value States**: Boards and states are `Copy`. Copying a position
//!    copies a few words and the key table borrows.
//!
//! 2. **Borrowed Keys**: A `HashKeyTable` is created once per match and
//!    every board borrows from it, so the table outlives every position
//!    built from it by construction.
//!
//! 3. **Result Values Over Errors**: Moves report a `MoveResult`; searches
//!    report `Option`. Only configuration can fail.
//!
//! ## Architecture
//!
//! - **Padded Bitboards**: 7x6 stones live in an 8x8 grid packed into a
//!   `u64`, so no line wraps from one edge to the other.
//!
//! - **Zobrist Digests**: Each board keeps its hash up to date on every
//!   placement. A state's digest identifies its position.
//!
//! - **Search DAG**: Nodes are unified by digest and stored in an arena,
//!   so a node may have several parents.
//!
//! ## Modules
//!
//! - `core`: Player identities and RNG
//! - `board`: Geometry, key tables and the bitboard
//! - `game`: Game state and move results
//! - `mcts`: Monte Carlo search over the position graph
//! - `training`: Self-play and game records

pub mod board;
pub mod core;
pub mod game;
pub mod mcts;
pub mod training;

// Re-export commonly used types
pub use crate::core::{GameRng, PlayerId, PlayerMap, PLAYER_COUNT};

pub use crate::board::{
    Actions, Board, Coordinate, HashKeyTable, LineKind, PlacementError, Point, ZobristKeys,
    COLUMN_SIZE, MAX_HEIGHT,
};

pub use crate::game::{GameResult, GameState, MoveResult};

pub use crate::mcts::{
    ConfigError, GraphStats, MCTSConfig, MctsEngine, NodeId, RandomPlayout, SearchGraph,
    SearchLimits, SearchNode, SearchStats, SelectionPolicy, SimulationPolicy,
    TranspositionTable, UCB1,
};

pub use crate::training::{GameRecord, SelfPlayConfig, SelfPlayWorker, Strategy};
