//! Bit-packed boards with incremental Zobrist hashing.
//!
//! - `geometry`: padded grid layout, coordinates and constant masks
//! - `keys`: per-player Zobrist key tables
//! - `bitboard`: one player's stones, win detection, legal moves

pub mod bitboard;
pub mod geometry;
pub mod keys;

pub use bitboard::{Actions, Board, PlacementError};
pub use geometry::{
    Coordinate, LineKind, Point, COLUMN_SIZE, FULL_HEIGHT, FULL_SIZE, FULL_WIDTH, MAX_HEIGHT,
    MIN_LEN, PLAYABLE_MASK,
};
pub use keys::{HashKeyTable, ZobristKeys};
