//! The authoritative position: two boards and whose turn it is.
//!
//! ## Turn handling
//!
//! `advance` only passes the turn on `Placed`. After `Won` the winner is
//! still `turn()`, and after `Draw` the turn is left as it was. Callers stop
//! issuing moves once a terminal result is seen.

use crate::board::{Actions, Board, Coordinate, HashKeyTable};
use crate::core::{PlayerId, PlayerMap};

use super::result::MoveResult;

/// Blank cell in the default rendering.
pub const BLANK: char = '_';

/// Player marks in the default rendering.
pub const MARKS: [char; 2] = ['+', '-'];

/// A position: one board per player, their merged board, and the mover.
///
/// States are plain values: copying one copies two `u64` pairs per board
/// and the key table borrows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameState<'k> {
    boards: PlayerMap<Board<'k>>,
    merged: Board<'k>,
    turn: PlayerId,
}

impl<'k> GameState<'k> {
    /// Empty position with player 0 to move.
    #[must_use]
    pub fn new(table: &'k HashKeyTable) -> Self {
        let boards = PlayerMap::new(|player| Board::new(table.keys(player)));
        let merged = boards[PlayerId::FIRST].merge(&boards[PlayerId::SECOND]);
        Self {
            boards,
            merged,
            turn: PlayerId::FIRST,
        }
    }

    /// Play `(column, height)` for the player to move.
    pub fn advance(&mut self, column: Coordinate, height: Coordinate) -> MoveResult {
        let actions = self.merged.legal_actions();
        if actions.is_empty() {
            return MoveResult::Draw;
        }

        if !actions.iter().any(|p| p.column == column && p.height == height) {
            return MoveResult::Invalid;
        }

        self.boards[self.turn].place(column, height);
        self.merged = self.boards[PlayerId::FIRST].merge(&self.boards[PlayerId::SECOND]);

        if self.boards[self.turn].check(column, height) {
            return MoveResult::Won;
        }

        if self.merged.full() {
            return MoveResult::Draw;
        }

        self.turn = self.turn.opponent();
        MoveResult::Placed
    }

    /// Legal moves, by increasing column.
    #[must_use]
    pub fn legal_actions(&self) -> Actions {
        self.merged.legal_actions()
    }

    /// Whether the board is full.
    #[must_use]
    pub fn full(&self) -> bool {
        self.merged.full()
    }

    /// Digest of the whole position.
    ///
    /// Equal to the XOR of both players' digests.
    #[must_use]
    pub fn digest(&self) -> u64 {
        self.merged.digest()
    }

    /// The player to move (or the winner, after `Won`).
    #[must_use]
    pub fn turn(&self) -> PlayerId {
        self.turn
    }

    /// One player's stones.
    #[must_use]
    pub fn board(&self, player: PlayerId) -> &Board<'k> {
        &self.boards[player]
    }

    /// Stones of both players.
    #[must_use]
    pub fn merged(&self) -> &Board<'k> {
        &self.merged
    }

    /// Number of stones on the board.
    #[must_use]
    pub fn stones(&self) -> u32 {
        self.merged.count()
    }

    /// Render blanks and both players' marks, top row first.
    ///
    /// A later player's mark only replaces blanks.
    #[must_use]
    pub fn render(&self, blank: char, marks: [char; 2]) -> String {
        let mut cells: Vec<char> = self.boards[PlayerId::FIRST]
            .render(blank, marks[0])
            .chars()
            .collect();

        let second = self.boards[PlayerId::SECOND].render(blank, marks[1]);
        for (cell, c) in cells.iter_mut().zip(second.chars()) {
            if *cell == blank && c != blank {
                *cell = c;
            }
        }

        cells.into_iter().collect()
    }
}

impl std::fmt::Display for GameState<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(BLANK, MARKS))
    }
}
