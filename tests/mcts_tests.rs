//! MCTS integration tests on the connect-four search graph.

use rust_connect4::board::{HashKeyTable, Point};
use rust_connect4::core::{GameRng, PlayerId};
use rust_connect4::game::{GameResult, GameState};
use rust_connect4::mcts::{
    ConfigError, MCTSConfig, MctsEngine, NodeId, SearchGraph, SearchLimits, SearchNode,
    SelectionPolicy, SimulationPolicy,
};

fn play<'k>(mut state: GameState<'k>, moves: &[(i32, i32)]) -> GameState<'k> {
    for &(column, height) in moves {
        state.advance(column, height);
    }
    state
}

fn unlimited(playouts: u32) -> SearchLimits {
    SearchLimits::default()
        .with_max_playouts(playouts)
        .with_time_budget_ms(60_000)
}

/// Always descends into the first child.
struct FirstChild;

impl SelectionPolicy for FirstChild {
    fn select(&self, graph: &SearchGraph<'_>, parent: NodeId, _config: &MCTSConfig) -> Option<NodeId> {
        graph.get(parent).successors.first().copied()
    }
}

/// Reports every simulated game as drawn.
struct AlwaysDraw;

impl SimulationPolicy for AlwaysDraw {
    fn playout(&self, _state: GameState<'_>, _rng: &mut GameRng) -> GameResult {
        GameResult::Draw
    }
}

// =============================================================================
// Configuration Tests
// =============================================================================

#[test]
fn test_engine_rejects_invalid_config() {
    let keys = HashKeyTable::new(1);

    let cases = [
        (MCTSConfig::default().with_to_expand(0), ConfigError::ZeroExpansionThreshold),
        (MCTSConfig::default().with_max_nodes(0), ConfigError::ZeroMaxNodes),
        (MCTSConfig::default().with_exploration(-1.0), ConfigError::InvalidUcbConstant(-1.0)),
        (MCTSConfig::default().with_max_nodes(usize::MAX), ConfigError::TooManyNodes(usize::MAX)),
    ];
    for (config, expected) in cases {
        assert_eq!(MctsEngine::new(&keys, config).err(), Some(expected));
    }
}

#[test]
fn test_config_serialization() {
    let config = MCTSConfig::default().with_seed(7).with_to_expand(3);
    let json = serde_json::to_string(&config).unwrap();
    let deserialized: MCTSConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(config, deserialized);
}

// =============================================================================
// Transposition Tests
// =============================================================================

#[test]
fn test_move_orders_share_one_node() {
    let keys = HashKeyTable::new(1);
    let empty = GameState::new(&keys);
    let mut graph = SearchGraph::new(empty);

    let a = play(empty, &[(0, 0), (6, 0), (3, 0), (5, 0), (1, 0)]);
    let b = play(empty, &[(1, 0), (5, 0), (0, 0), (6, 0), (3, 0)]);
    assert_eq!(a.digest(), b.digest());

    let (first, fresh_a) = graph.add(SearchNode::new(a));
    let (second, fresh_b) = graph.add(SearchNode::new(b));
    assert!(fresh_a);
    assert!(!fresh_b);
    assert_eq!(first, second);
    assert_eq!(graph.table().len(), 2);
}

#[test]
fn test_training_finds_transpositions() {
    let keys = HashKeyTable::new(1);
    let mut engine = MctsEngine::new(&keys, MCTSConfig::default().with_to_expand(1)).unwrap();

    engine.train(1_000);

    assert!(engine.stats().transpositions > 0);
    let stats = engine.graph().stats();
    assert!(stats.transposed_nodes > 0);
    assert!(stats.max_predecessors >= 2);
    assert_eq!(engine.graph().table().len(), engine.graph().len());
}

#[test]
fn test_graph_links_are_consistent() {
    let keys = HashKeyTable::new(1);
    let mut engine = MctsEngine::new(&keys, MCTSConfig::default().with_to_expand(2)).unwrap();

    engine.train(2_000);

    let graph = engine.graph();
    for (id, node) in graph.iter() {
        assert!(node.visits >= node.decisive());
        for &child in &node.successors {
            let child = graph.get(child);
            assert!(child.predecessors.contains(&id));
            assert_eq!(child.state.stones(), node.state.stones() + 1);
        }
        for &parent in &node.predecessors {
            assert!(graph.get(parent).successors.contains(&id));
        }
    }
}

// =============================================================================
// Training Tests
// =============================================================================

#[test]
fn test_root_counts_every_playout() {
    let keys = HashKeyTable::new(1);
    let mut engine = MctsEngine::new(&keys, MCTSConfig::default()).unwrap();

    engine.train(500);

    let root = engine.graph().get(engine.root());
    let stats = engine.stats();
    assert_eq!(stats.playouts, 500);
    assert_eq!(root.visits, 500);
    assert_eq!(root.wins[PlayerId::FIRST], stats.wins[PlayerId::FIRST]);
    assert_eq!(root.wins[PlayerId::SECOND], stats.wins[PlayerId::SECOND]);
    assert_eq!(root.decisive() + stats.draws, 500);
}

#[test]
fn test_first_player_advantage() {
    let keys = HashKeyTable::new(2024);
    let mut engine = MctsEngine::new(&keys, MCTSConfig::default()).unwrap();

    engine.train(4_000);

    let root = engine.graph().get(engine.root());
    assert!(
        root.wins[PlayerId::FIRST] > root.wins[PlayerId::SECOND],
        "first {} second {}",
        root.wins[PlayerId::FIRST],
        root.wins[PlayerId::SECOND]
    );
}

#[test]
fn test_deterministic_with_seed() {
    let keys = HashKeyTable::new(5);
    let config = MCTSConfig::default().with_seed(12345).with_to_expand(3);

    let mut engine1 = MctsEngine::new(&keys, config.clone()).unwrap();
    let mut engine2 = MctsEngine::new(&keys, config).unwrap();
    engine1.train(800);
    engine2.train(800);

    assert_eq!(engine1.graph().len(), engine2.graph().len());
    assert_eq!(engine1.stats().wins, engine2.stats().wins);
    assert_eq!(engine1.stats().transpositions, engine2.stats().transpositions);

    let empty = GameState::new(&keys);
    assert_eq!(engine1.select(&empty), engine2.select(&empty));
}

#[test]
fn test_custom_selection_policy() {
    let keys = HashKeyTable::new(1);
    let mut engine = MctsEngine::new(&keys, MCTSConfig::default().with_to_expand(1))
        .unwrap()
        .with_selection(FirstChild);

    engine.train(20);

    let root = engine.graph().get(engine.root());
    let children: Vec<u32> = root.successors.iter().map(|&c| engine.graph().get(c).visits).collect();
    assert_eq!(children[0], 19);
    assert!(children[1..].iter().all(|&v| v == 0));
}

#[test]
fn test_custom_simulation_policy() {
    let keys = HashKeyTable::new(1);
    let mut engine = MctsEngine::new(&keys, MCTSConfig::default())
        .unwrap()
        .with_simulation(AlwaysDraw);

    engine.train(100);

    let root = engine.graph().get(engine.root());
    assert_eq!(root.visits, 100);
    assert_eq!(root.decisive(), 0);
    assert_eq!(engine.stats().draws, 100);
}

// =============================================================================
// Move Selection Tests
// =============================================================================

#[test]
fn test_select_returns_legal_move() {
    let keys = HashKeyTable::new(1);
    let mut engine = MctsEngine::new(&keys, MCTSConfig::default()).unwrap();
    engine.train(1_000);

    let state = play(GameState::new(&keys), &[(3, 0), (3, 1)]);
    let choice = engine.select(&state).unwrap();
    assert!(state.legal_actions().contains(&choice));
}

#[test]
fn test_select_random_on_full_board() {
    let keys = HashKeyTable::new(1);
    let mut engine = MctsEngine::new(&keys, MCTSConfig::default()).unwrap();

    let mut state = GameState::new(&keys);
    let columns = [
        4, 2, 0, 3, 1, 1, 4, 4, 4, 1, 4, 2, 4, 5, 3, 2, 2, 0, 5, 2, 1, 1, 5, 5, 1, 5, 3, 5, 2, 0,
        0, 3, 0, 3, 0, 3, 6, 6, 6, 6, 6, 6,
    ];
    for column in columns {
        let action = state.legal_actions().into_iter().find(|p| p.column == column).unwrap();
        state.advance(action.column, action.height);
    }

    assert_eq!(engine.select_random(&state), None);
    assert_eq!(engine.select(&state), None);
    assert_eq!(engine.search(&state, unlimited(10)), None);
}

#[test]
fn test_select_random_covers_columns() {
    let keys = HashKeyTable::new(1);
    let mut engine = MctsEngine::new(&keys, MCTSConfig::default()).unwrap();
    let empty = GameState::new(&keys);

    let mut seen = [false; 7];
    for _ in 0..500 {
        let choice = engine.select_random(&empty).unwrap();
        assert_eq!(choice.height, 0);
        seen[choice.column as usize] = true;
    }
    assert!(seen.iter().all(|&s| s));
}

// =============================================================================
// Online Search Tests
// =============================================================================

#[test]
fn test_search_respects_playout_cap() {
    let keys = HashKeyTable::new(1);
    let mut engine = MctsEngine::new(&keys, MCTSConfig::default()).unwrap();
    let state = play(GameState::new(&keys), &[(3, 0)]);

    let choice = engine.search(&state, unlimited(50));

    assert!(choice.is_some());
    assert_eq!(engine.stats().playouts, 50);
    let node = engine.graph().find(&state).unwrap();
    assert_eq!(engine.graph().get(node).visits, 50);
}

#[test]
fn test_search_with_zero_budget() {
    let keys = HashKeyTable::new(1);
    let mut engine = MctsEngine::new(&keys, MCTSConfig::default()).unwrap();
    let state = GameState::new(&keys);

    let limits = SearchLimits::default().with_time_budget_ms(0);
    let choice = engine.search(&state, limits);

    assert!(choice.is_some());
    assert_eq!(engine.stats().playouts, 0);
}

#[test]
fn test_search_reuses_trained_graph() {
    let keys = HashKeyTable::new(1);
    let mut engine = MctsEngine::new(&keys, MCTSConfig::default().with_to_expand(1)).unwrap();
    engine.train(100);
    let nodes = engine.graph().len();

    let state = play(GameState::new(&keys), &[(2, 0)]);
    let known = engine.graph().find(&state).unwrap();
    let visits = engine.graph().get(known).visits;

    engine.search(&state, unlimited(20));

    assert_eq!(engine.graph().find(&state), Some(known));
    assert_eq!(engine.graph().get(known).visits, visits + 20);
    assert!(engine.graph().len() >= nodes);
}

#[test]
fn test_search_takes_immediate_win() {
    let keys = HashKeyTable::new(1);
    let mut engine = MctsEngine::new(&keys, MCTSConfig::default()).unwrap();
    // player 0 holds (2..=4, 0) and moves next
    let state = play(
        GameState::new(&keys),
        &[(2, 0), (2, 1), (3, 0), (3, 1), (4, 0), (4, 1)],
    );

    let choice = engine.search(&state, unlimited(200));
    let winning = [Point::new(1, 0), Point::new(5, 0)];
    assert!(winning.contains(&choice.unwrap()), "{choice:?}");
}
