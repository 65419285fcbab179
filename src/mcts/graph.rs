//! Arena-based search graph.
//!
//! Uses a flat `Vec<SearchNode>` with index-based references, so shared
//! children and multiple parents need no reference counting. The
//! transposition table lives beside the arena and decides whether a new
//! position gets a fresh slot.

use super::node::{NodeId, SearchNode};
use super::transposition::TranspositionTable;
use crate::game::GameState;

/// Arena of search nodes deduplicated by position digest.
#[derive(Clone, Debug)]
pub struct SearchGraph<'k> {
    /// All nodes in the graph.
    nodes: Vec<SearchNode<'k>>,

    /// Digest -> canonical node.
    table: TranspositionTable,

    /// The node the graph was created from.
    root: NodeId,
}

impl<'k> SearchGraph<'k> {
    /// Create a graph whose root holds `state`.
    pub fn new(state: GameState<'k>) -> Self {
        Self::with_capacity(state, 1024)
    }

    /// Create a graph with custom initial capacity.
    pub fn with_capacity(state: GameState<'k>, capacity: usize) -> Self {
        let mut graph = Self {
            nodes: Vec::with_capacity(capacity),
            table: TranspositionTable::new(),
            root: NodeId::new(0),
        };
        let (root, _) = graph.add(SearchNode::new(state));
        graph.root = root;
        graph
    }

    /// Get the root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &SearchNode<'k> {
        &self.nodes[id.index()]
    }

    /// Get a mutable node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode<'k> {
        &mut self.nodes[id.index()]
    }

    /// Register a node, unifying it with a known position.
    ///
    /// Returns the canonical id and whether `node` was newly allocated.
    /// When the digest is already known, `node` is dropped. The arena must
    /// stay below `u32::MAX` nodes, which `MCTSConfig::validate` ensures for
    /// engine-owned graphs.
    pub fn add(&mut self, node: SearchNode<'k>) -> (NodeId, bool) {
        let digest = node.digest();
        if let Some(existing) = self.table.find_digest(digest) {
            return (existing, false);
        }

        debug_assert!(self.nodes.len() < u32::MAX as usize);
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        self.table.add(digest, id);
        (id, true)
    }

    /// Record the edge `parent -> child` in both directions.
    ///
    /// Linking the same pair twice is a no-op.
    pub fn link(&mut self, parent: NodeId, child: NodeId) {
        let successors = &mut self.nodes[parent.index()].successors;
        if !successors.contains(&child) {
            successors.push(child);
        }
        let predecessors = &mut self.nodes[child.index()].predecessors;
        if !predecessors.contains(&parent) {
            predecessors.push(parent);
        }
    }

    /// Canonical node of `state`, if it has been explored.
    #[must_use]
    pub fn find(&self, state: &GameState<'_>) -> Option<NodeId> {
        self.table.find(state)
    }

    /// The transposition table.
    #[must_use]
    pub fn table(&self) -> &TranspositionTable {
        &self.table
    }

    /// Number of nodes in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the graph is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get statistics about the graph.
    #[must_use]
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            node_count: self.nodes.len(),
            edge_count: self.nodes.iter().map(|n| n.successors.len()).sum(),
            terminal_count: self.nodes.iter().filter(|n| n.is_terminal()).count(),
            transposed_nodes: self.nodes.iter().filter(|n| n.predecessors.len() > 1).count(),
            max_predecessors: self.nodes.iter().map(|n| n.predecessors.len()).max().unwrap_or(0),
        }
    }

    /// Iterate over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SearchNode<'k>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }
}

/// Statistics about the search graph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphStats {
    /// Total number of nodes.
    pub node_count: usize,

    /// Total number of parent -> child edges.
    pub edge_count: usize,

    /// Number of terminal nodes.
    pub terminal_count: usize,

    /// Nodes reached from more than one parent.
    pub transposed_nodes: usize,

    /// Largest predecessor list.
    pub max_predecessors: usize,
}

impl GraphStats {
    /// Average number of children per node.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.node_count == 0 {
            0.0
        } else {
            self.edge_count as f64 / self.node_count as f64
        }
    }
}
