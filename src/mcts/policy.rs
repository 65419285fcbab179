//! MCTS policies for selection and simulation.
//!
//! Policies are trait-based to allow customization:
//! - `SelectionPolicy`: How to choose which child to descend into (UCB1)
//! - `SimulationPolicy`: How to run rollouts (uniformly random)

use smallvec::SmallVec;

use crate::board::COLUMN_SIZE;
use crate::core::GameRng;
use crate::game::{GameResult, GameState, MoveResult};

use super::config::MCTSConfig;
use super::graph::SearchGraph;
use super::node::NodeId;

// =============================================================================
// Selection Policy
// =============================================================================

/// Policy for selecting which child node to explore.
pub trait SelectionPolicy {
    /// Pick a successor of `parent`, or `None` if it has no children.
    fn select(&self, graph: &SearchGraph<'_>, parent: NodeId, config: &MCTSConfig) -> Option<NodeId>;
}

/// UCB1 (Upper Confidence Bound) selection policy.
///
/// For the player `p` to move at the parent and a child `c`:
///
/// ```text
/// n        = wins_0(c) + wins_1(c) + epsilon
/// all      = sum of n over the parent's children
/// score(c) = wins_p(c) / n + C * sqrt(2 * ln(all) / n)
/// ```
///
/// A child with no visits is taken before any score is computed. Ties go
/// to the earliest child, so the result depends on creation order.
#[derive(Clone, Debug, Default)]
pub struct UCB1;

impl SelectionPolicy for UCB1 {
    fn select(&self, graph: &SearchGraph<'_>, parent: NodeId, config: &MCTSConfig) -> Option<NodeId> {
        let node = graph.get(parent);
        let player = node.state.turn();

        if let Some(&unvisited) = node.successors.iter().find(|&&c| graph.get(c).visits == 0) {
            return Some(unvisited);
        }

        let totals: SmallVec<[f64; COLUMN_SIZE as usize]> = node
            .successors
            .iter()
            .map(|&c| graph.get(c).decisive() as f64 + config.epsilon)
            .collect();
        // ln of a sub-unit total would make the bonus NaN
        let log_all = totals.iter().sum::<f64>().ln().max(0.0);

        let mut best: Option<(NodeId, f64)> = None;
        for (&child, &n) in node.successors.iter().zip(totals.iter()) {
            let exploitation = graph.get(child).wins[player] as f64 / n;
            let exploration = config.ucb_const * (2.0 * log_all / n).sqrt();
            let score = exploitation + exploration;
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((child, score));
            }
        }
        best.map(|(child, _)| child)
    }
}

// =============================================================================
// Simulation Policy
// =============================================================================

/// Policy for running simulations (rollouts) from a position.
pub trait SimulationPolicy {
    /// Play `state` out to the end and report the result.
    fn playout(&self, state: GameState<'_>, rng: &mut GameRng) -> GameResult;
}

/// Random simulation policy.
///
/// Plays uniformly random legal actions until a move ends the game.
#[derive(Clone, Debug, Default)]
pub struct RandomPlayout;

impl SimulationPolicy for RandomPlayout {
    fn playout(&self, mut state: GameState<'_>, rng: &mut GameRng) -> GameResult {
        loop {
            let actions = state.legal_actions();
            let Some(&action) = rng.choose(&actions) else {
                return GameResult::Draw;
            };

            let mover = state.turn();
            match state.advance(action.column, action.height) {
                MoveResult::Placed => continue,
                result => {
                    if let Some(outcome) = result.game_result(mover) {
                        return outcome;
                    }
                }
            }
        }
    }
}
