//! Core MCTS search algorithm.
//!
//! The engine keeps one search graph for its whole lifetime. Offline
//! `train` grows it from the empty board; online `search` continues from
//! whatever position the game has reached, reusing every node already
//! explored. Both run the same cycle:
//!
//! 1. **Visit**: descend with the selection policy while nodes have enough
//!    visits, expanding a node the first time it reaches `to_expand`.
//! 2. **Playout**: simulate from the frontier, or reuse the frontier's
//!    recorded outcome if it ends the game.
//! 3. **Backpropagate**: credit every ancestor reachable through
//!    predecessor links, each exactly once.

use std::collections::VecDeque;
use std::time::Instant;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::board::{HashKeyTable, Point, COLUMN_SIZE};
use crate::core::GameRng;
use crate::game::{GameResult, GameState, MoveResult};

use super::config::{ConfigError, MCTSConfig, SearchLimits};
use super::graph::SearchGraph;
use super::node::{NodeId, SearchNode};
use super::policy::{RandomPlayout, SelectionPolicy, SimulationPolicy, UCB1};
use super::stats::SearchStats;

/// Monte Carlo search engine over a transposition-sharing graph.
///
/// Borrows the key table every state in the graph was built from.
pub struct MctsEngine<'k> {
    /// Key table shared by every position in the graph.
    keys: &'k HashKeyTable,

    /// Search configuration.
    config: MCTSConfig,

    /// The search graph, rooted at the empty board.
    graph: SearchGraph<'k>,

    /// RNG for playouts and random moves.
    rng: GameRng,

    /// Selection policy.
    selection: Box<dyn SelectionPolicy>,

    /// Simulation policy.
    simulation: Box<dyn SimulationPolicy>,

    /// Lifetime statistics.
    stats: SearchStats,

    /// Set once the node cap has been reported.
    capped: bool,
}

impl<'k> MctsEngine<'k> {
    /// Create an engine whose graph holds only the empty board.
    pub fn new(keys: &'k HashKeyTable, config: MCTSConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let capacity = config.max_nodes.min(1 << 16);
        Ok(Self {
            keys,
            graph: SearchGraph::with_capacity(GameState::new(keys), capacity),
            rng: GameRng::new(config.seed),
            config,
            selection: Box::new(UCB1),
            simulation: Box::new(RandomPlayout),
            stats: SearchStats::default(),
            capped: false,
        })
    }

    /// Set a custom selection policy.
    pub fn with_selection<S: SelectionPolicy + 'static>(mut self, selection: S) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Set a custom simulation policy.
    pub fn with_simulation<S: SimulationPolicy + 'static>(mut self, simulation: S) -> Self {
        self.simulation = Box::new(simulation);
        self
    }

    /// Run `iterations` playout cycles from the empty board.
    pub fn train(&mut self, iterations: u32) {
        let start = Instant::now();
        let root = self.graph.root();
        for _ in 0..iterations {
            self.playout_cycle_from(root);
        }
        self.stats.time_us += start.elapsed().as_micros() as u64;

        debug!(
            iterations,
            nodes = self.graph.len(),
            playouts = self.stats.playouts,
            transpositions = self.stats.transpositions,
            "training finished"
        );
    }

    /// Search from `state` within `limits`, then pick a trained move.
    ///
    /// Positions the graph has never seen get a fresh node without
    /// predecessors. The deadline is checked between cycles only.
    pub fn search(&mut self, state: &GameState<'k>, limits: SearchLimits) -> Option<Point> {
        if state.legal_actions().is_empty() {
            return None;
        }

        let start = Instant::now();
        let budget = limits.time_budget();
        let node = match self.graph.find(state) {
            Some(id) => id,
            None => self.graph.add(SearchNode::new(*state)).0,
        };

        let mut cycles = 0;
        while cycles < limits.max_playouts && start.elapsed() < budget {
            self.playout_cycle_from(node);
            cycles += 1;
        }
        self.stats.time_us += start.elapsed().as_micros() as u64;

        let choice = self.select(state);
        debug!(
            %node,
            cycles,
            nodes = self.graph.len(),
            choice = ?choice,
            "search finished"
        );
        choice
    }

    /// One cycle from the root.
    pub fn playout_cycle(&mut self) -> GameResult {
        self.playout_cycle_from(self.graph.root())
    }

    /// Visit from `start`, play out the frontier, and backpropagate.
    pub fn playout_cycle_from(&mut self, start: NodeId) -> GameResult {
        let (frontier, _) = self.visit(start);

        let node = self.graph.get(frontier);
        let (terminal, state) = (node.terminal, node.state);
        let result = match terminal {
            Some(result) => result,
            None => self.playout(state),
        };

        self.backpropagate(frontier, result);
        self.stats.record(result);
        result
    }

    /// Descend from `start` to a frontier node.
    ///
    /// Returns the frontier and how many edges were followed.
    pub fn visit(&mut self, start: NodeId) -> (NodeId, u32) {
        let mut current = start;
        let mut depth = 0;

        loop {
            let node = self.graph.get(current);
            if node.is_terminal() || node.visits < self.config.to_expand {
                break;
            }
            if node.visits == self.config.to_expand && !node.is_expanded() {
                self.expand(current);
            }

            match self.selection.select(&self.graph, current, &self.config) {
                Some(child) => {
                    current = child;
                    depth += 1;
                }
                None => break,
            }
        }

        self.stats.max_depth = self.stats.max_depth.max(depth);
        (current, depth)
    }

    /// Create the children of `parent`.
    ///
    /// A move that wins on the spot becomes the only child. Children are
    /// created column-ascending and unified with known positions.
    fn expand(&mut self, parent: NodeId) {
        if self.graph.len() >= self.config.max_nodes {
            if !self.capped {
                warn!(max_nodes = self.config.max_nodes, "node cap reached, expansion stopped");
                self.capped = true;
            }
            return;
        }

        let state = self.graph.get(parent).state;
        let mover = state.turn();

        let mut children: SmallVec<[SearchNode<'k>; COLUMN_SIZE as usize]> = SmallVec::new();
        for action in state.legal_actions() {
            let mut next = state;
            match next.advance(action.column, action.height) {
                MoveResult::Invalid => continue,
                MoveResult::Placed => children.push(SearchNode::new(next)),
                MoveResult::Won => {
                    children.clear();
                    children.push(SearchNode::terminal(next, GameResult::Winner(mover)));
                    break;
                }
                MoveResult::Draw => children.push(SearchNode::terminal(next, GameResult::Draw)),
            }
        }

        let count = children.len();
        for candidate in children {
            let (child, fresh) = self.graph.add(candidate);
            if !fresh {
                self.stats.transpositions += 1;
                trace!(%parent, %child, "transposition");
            }
            self.graph.link(parent, child);
        }

        self.stats.nodes_expanded += 1;
        trace!(%parent, children = count, "expanded");
    }

    /// Simulate `state` to the end with the simulation policy.
    pub fn playout(&mut self, state: GameState<'k>) -> GameResult {
        self.simulation.playout(state, &mut self.rng)
    }

    /// Credit `result` to `frontier` and every node above it.
    fn backpropagate(&mut self, frontier: NodeId, result: GameResult) {
        let winner = result.winner();
        let mut seen: FxHashSet<NodeId> = FxHashSet::default();
        let mut queue = VecDeque::new();
        seen.insert(frontier);
        queue.push_back(frontier);

        while let Some(id) = queue.pop_front() {
            let node = self.graph.get_mut(id);
            node.visits += 1;
            if let Some(player) = winner {
                node.wins[player] += 1;
            }

            for &parent in &node.predecessors {
                if seen.insert(parent) {
                    queue.push_back(parent);
                }
            }
        }
    }

    /// Best explored move for the player to move in `state`.
    ///
    /// Ranks the successors found in the graph by the mover's win ratio and
    /// takes the first maximum. Falls back to a random legal move when no
    /// successor has been explored.
    pub fn select(&mut self, state: &GameState<'k>) -> Option<Point> {
        let mover = state.turn();
        let actions = state.legal_actions();

        let mut best: Option<(Point, f64)> = None;
        for &action in &actions {
            let mut next = *state;
            if next.advance(action.column, action.height) == MoveResult::Invalid {
                continue;
            }
            let Some(id) = self.graph.find(&next) else {
                continue;
            };

            let ratio = self.graph.get(id).win_ratio(mover, self.config.epsilon);
            if best.map_or(true, |(_, top)| ratio > top) {
                best = Some((action, ratio));
            }
        }

        match best {
            Some((action, _)) => Some(action),
            None => self.rng.choose(&actions).copied(),
        }
    }

    /// Uniformly random legal move, or `None` when there is none.
    pub fn select_random(&mut self, state: &GameState<'k>) -> Option<Point> {
        let actions = state.legal_actions();
        self.rng.choose(&actions).copied()
    }

    /// The search graph.
    #[must_use]
    pub fn graph(&self) -> &SearchGraph<'k> {
        &self.graph
    }

    /// The empty-board node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.graph.root()
    }

    /// Lifetime statistics.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }

    /// The key table.
    #[must_use]
    pub fn keys(&self) -> &'k HashKeyTable {
        self.keys
    }
}
