//! MCTS integration tests on real cube positions.

use proptest::prelude::*;

use cube_ttt::core::{BoardState, GameRng, Player};
use cube_ttt::mcts::{get_next_move, MCTSConfig, MCTSSearch};

/// Full cube with no completed line.
const DRAWN_CUBE: [i8; 64] = [
    -1, 1, -1, -1, 1, 1, 1, -1, 1, -1, 1, 1, -1, 1, 1, -1,
    -1, -1, 1, 1, 1, 1, 1, -1, -1, 1, -1, -1, -1, 1, -1, -1,
    -1, -1, 1, 1, 1, 1, -1, 1, -1, -1, -1, 1, 1, -1, 1, -1,
    1, -1, 1, -1, -1, -1, 1, -1, 1, 1, 1, -1, 1, -1, -1, 1,
];

fn one_move_left(last: usize) -> BoardState {
    let mut values = DRAWN_CUBE;
    let player = Player::from_value(values[last]).unwrap();
    values[last] = 0;
    BoardState::from_values(&values, player).unwrap()
}

fn walk(choices: &[u8]) -> BoardState {
    let mut state = BoardState::new();
    for &choice in choices {
        let next = state.traverse(state.moves()[choice as usize % state.moves().len()] as usize);
        if next.is_terminal() {
            break;
        }
        state = next;
    }
    state
}

// =============================================================================
// Basic Search Tests
// =============================================================================

#[test]
fn test_search_from_empty_cube() {
    let state = BoardState::new();
    let mut search = MCTSSearch::new(MCTSConfig::default().with_iterations(300));

    let mv = search.search(&state);

    assert!(mv < 64);
    assert_eq!(search.root_children().len(), 64);
    assert_eq!(search.best_move(), Some(mv));
}

#[test]
fn test_single_legal_move_any_budget() {
    for last in [0, 27, 63] {
        let state = one_move_left(last);
        assert_eq!(state.moves(), &[last as u8]);

        for iterations in [0, 1, 10, 100] {
            let mut rng = GameRng::new(u64::from(iterations));
            assert_eq!(get_next_move(&state, iterations, &mut rng), last as u8);
        }
    }
}

#[test]
fn test_default_budget_is_five_thousand() {
    let state = BoardState::new().traverse(0);
    let mut search = MCTSSearch::new(MCTSConfig::default());

    search.search(&state);

    assert_eq!(search.stats().iterations, 5000);
    assert_eq!(search.tree().unwrap().root_node().visits(), 5000);
}

// =============================================================================
// Tree Invariants
// =============================================================================

#[test]
fn test_root_visits_equal_iterations() {
    let state = walk(&[3, 9, 27, 81]);
    for iterations in [1u32, 64, 65, 400] {
        let mut search = MCTSSearch::new(MCTSConfig::default());
        search.search_iterations(&state, iterations);

        let tree = search.tree().unwrap();
        assert_eq!(tree.root_node().visits(), iterations);
        assert!(tree.check_visit_invariant());

        let child_visits: u32 = search.root_children().iter().map(|c| c.visits).sum();
        assert_eq!(child_visits, iterations);
    }
}

#[test]
fn test_tree_stats_after_search() {
    let state = BoardState::new();
    let mut search = MCTSSearch::new(MCTSConfig::default().with_iterations(200));
    search.search(&state);

    let stats = search.tree().unwrap().stats();
    assert!(stats.node_count > 64);
    assert_eq!(stats.expanded_count as u32, search.stats().nodes_expanded);
    assert!(stats.unique_positions <= stats.node_count);
    assert!(stats.max_depth >= 1);
}

#[test]
fn test_win_ratios_are_fractions() {
    let state = walk(&[1, 2, 3]);
    let mut search = MCTSSearch::new(MCTSConfig::default().with_iterations(500));
    search.search(&state);

    for (_, node) in search.tree().unwrap().iter() {
        let ratio = node.win_ratio();
        assert!((0.0..=1.0).contains(&ratio), "ratio {ratio} out of range");
        assert!(node.score() <= f64::from(node.visits()));
    }
}

// =============================================================================
// Determinism Tests
// =============================================================================

#[test]
fn test_same_seed_same_move() {
    let state = walk(&[10, 20, 30, 40, 50]);

    let a = get_next_move(&state, 250, &mut GameRng::new(77));
    let b = get_next_move(&state, 250, &mut GameRng::new(77));

    assert_eq!(a, b);
}

#[test]
fn test_config_round_trip_json() {
    let config = MCTSConfig::default().with_iterations(123).with_time_limit_ms(50);
    let json = serde_json::to_string(&config).unwrap();
    let back: MCTSConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(back, config);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_next_move_is_legal(
        choices in prop::collection::vec(any::<u8>(), 0..40),
        seed in any::<u64>(),
        iterations in 0u32..60,
    ) {
        let state = walk(&choices);
        prop_assume!(!state.is_terminal());

        let mv = get_next_move(&state, iterations, &mut GameRng::new(seed));
        prop_assert!(state.is_legal(mv as usize));
    }
}
