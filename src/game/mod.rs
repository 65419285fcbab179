//! Game state machine over two boards.

pub mod result;
pub mod state;

pub use result::{GameResult, MoveResult};
pub use state::{GameState, BLANK, MARKS};
