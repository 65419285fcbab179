//! Search graph nodes.
//!
//! Nodes live in the `SearchGraph` arena and refer to each other by
//! `NodeId`. Because transpositions give a node several predecessors, the
//! links form a DAG rather than a tree. Every edge adds one stone, so no
//! path returns to an earlier node.

use smallvec::SmallVec;

use crate::board::COLUMN_SIZE;
use crate::core::{PlayerId, PlayerMap};
use crate::game::{GameResult, GameState};

/// Index into the `SearchGraph` node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// A position in the search graph with its playout statistics.
#[derive(Clone, Debug)]
pub struct SearchNode<'k> {
    /// The node's own copy of the position.
    pub state: GameState<'k>,

    /// Playouts that passed through this node.
    pub visits: u32,

    /// Playouts won by each player after passing through this node.
    pub wins: PlayerMap<u32>,

    /// Outcome of the move that produced this position, if it ended the game.
    pub terminal: Option<GameResult>,

    /// Nodes with an edge into this one. Grows as transpositions are found.
    pub predecessors: SmallVec<[NodeId; 2]>,

    /// Children in creation order (column-ascending).
    pub successors: SmallVec<[NodeId; COLUMN_SIZE as usize]>,
}

impl<'k> SearchNode<'k> {
    /// Create an unvisited, non-terminal node.
    pub fn new(state: GameState<'k>) -> Self {
        Self {
            state,
            visits: 0,
            wins: PlayerMap::default(),
            terminal: None,
            predecessors: SmallVec::new(),
            successors: SmallVec::new(),
        }
    }

    /// Create a node for a position that ended the game with `result`.
    pub fn terminal(state: GameState<'k>, result: GameResult) -> Self {
        Self {
            terminal: Some(result),
            ..Self::new(state)
        }
    }

    /// Digest of the node's position.
    #[inline]
    #[must_use]
    pub fn digest(&self) -> u64 {
        self.state.digest()
    }

    /// Is this a finished game?
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.terminal.is_some()
    }

    /// Have children been created?
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        !self.successors.is_empty()
    }

    /// Decisive playouts through this node (draws excluded).
    #[must_use]
    pub fn decisive(&self) -> u32 {
        self.wins.total()
    }

    /// Fraction of visits won by `player`.
    ///
    /// `epsilon` keeps unvisited nodes at zero instead of dividing by zero.
    #[must_use]
    pub fn win_ratio(&self, player: PlayerId, epsilon: f64) -> f64 {
        self.wins[player] as f64 / (self.visits as f64 + epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::HashKeyTable;

    #[test]
    fn test_node_id() {
        let id = NodeId::new(5);
        assert_eq!(id.raw(), 5);
        assert_eq!(format!("{}", id), "NodeId(5)");
    }

    #[test]
    fn test_new_node() {
        let table = HashKeyTable::new(3);
        let node = SearchNode::new(GameState::new(&table));

        assert_eq!(node.visits, 0);
        assert_eq!(node.decisive(), 0);
        assert_eq!(node.digest(), 0);
        assert!(!node.is_terminal());
        assert!(!node.is_expanded());
        assert!(node.predecessors.is_empty());
    }

    #[test]
    fn test_terminal_node() {
        let table = HashKeyTable::new(3);
        let node = SearchNode::terminal(GameState::new(&table), GameResult::Draw);

        assert!(node.is_terminal());
        assert_eq!(node.terminal, Some(GameResult::Draw));
    }

    #[test]
    fn test_win_ratio() {
        let table = HashKeyTable::new(3);
        let mut node = SearchNode::new(GameState::new(&table));
        let epsilon = 1e-8;

        assert_eq!(node.win_ratio(PlayerId::FIRST, epsilon), 0.0);

        node.visits = 4;
        node.wins[PlayerId::FIRST] = 3;
        node.wins[PlayerId::SECOND] = 1;

        assert!((node.win_ratio(PlayerId::FIRST, epsilon) - 0.75).abs() < 1e-6);
        assert!((node.win_ratio(PlayerId::SECOND, epsilon) - 0.25).abs() < 1e-6);
        assert_eq!(node.decisive(), 4);
    }
}
