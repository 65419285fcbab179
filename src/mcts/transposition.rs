//! Digest-keyed index of canonical search nodes.
//!
//! Positions reached through different move orders share one digest, so
//! the table is the single point where the search graph merges them.

use rustc_hash::FxHashMap;

use super::node::NodeId;
use crate::game::GameState;

/// Maps a position digest to its canonical node.
#[derive(Clone, Debug, Default)]
pub struct TranspositionTable {
    index: FxHashMap<u64, NodeId>,
}

impl TranspositionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `candidate` under `digest` unless the digest is known.
    ///
    /// Returns the canonical node, which is `candidate` only when it was
    /// inserted.
    pub fn add(&mut self, digest: u64, candidate: NodeId) -> NodeId {
        *self.index.entry(digest).or_insert(candidate)
    }

    /// Canonical node of `state`, if it has been registered.
    #[must_use]
    pub fn find(&self, state: &GameState<'_>) -> Option<NodeId> {
        self.find_digest(state.digest())
    }

    /// Canonical node for a raw digest.
    #[inline]
    #[must_use]
    pub fn find_digest(&self, digest: u64) -> Option<NodeId> {
        self.index.get(&digest).copied()
    }

    /// Number of registered positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether no position is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
