//! Property-based tests for the MCTS implementation.
//!
//! Invariants checked over random tic-tac-toe positions:
//! - Unvisited children outrank visited siblings
//! - Playout accounting at the root and its children
//! - Children never exceed the legal moves of a node
//! - Each iteration bumps exactly one root-to-node path by one
//! - Determinism under a fixed seed

use playout_core::{GameState, Player};
use playout_mcts::{
    games::{TicTacToeMove, TicTacToeState},
    Mcts, MctsConfig, NodeId, RolloutEvaluator, Tree, Ucb1,
};
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

type Engine = Mcts<TicTacToeState, RolloutEvaluator<ChaCha8Rng>>;

fn create_mcts(state: TicTacToeState, seed: u64) -> Engine {
    let evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(seed));
    Mcts::new(state, MctsConfig::for_testing(), evaluator)
}

/// Every node id reachable from the root.
fn all_nodes(tree: &Tree<TicTacToeState>) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        out.push(id);
        stack.extend(tree.get(id).children().iter().copied());
    }
    out
}

// =============================================================================
// Strategies for generating test inputs
// =============================================================================

fn arb_seed() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Iteration budgets small enough to keep the suite fast
fn arb_iterations() -> impl Strategy<Value = usize> {
    1usize..150
}

/// A non-terminal tic-tac-toe position reached by random play
fn arb_position() -> impl Strategy<Value = TicTacToeState> {
    (0usize..8, arb_seed()).prop_map(|(num_moves, seed)| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut state = TicTacToeState::new();

        for _ in 0..num_moves {
            let moves = state.legal_moves(state.player()).unwrap();
            let next = state.apply_move(&moves[rng.gen_range(0..moves.len())]).unwrap();
            if next.is_terminal() {
                break;
            }
            state = next;
        }
        state
    })
}

// =============================================================================
// Selection
// =============================================================================

proptest! {
    /// An unvisited child is selected before any visited sibling.
    #[test]
    fn prop_unvisited_selected_first(
        seed in arb_seed(),
        state in arb_position(),
        exploration in 0.0f64..3.0,
    ) {
        let mut mcts = create_mcts(state, seed);
        mcts.run(1).unwrap();

        let tree = mcts.tree();
        let ucb = Ucb1::new(exploration);
        let root = tree.root_node();
        let unvisited: Vec<NodeId> = root
            .children()
            .iter()
            .copied()
            .filter(|&c| tree.get(c).playouts() == 0)
            .collect();

        for &fresh in &unvisited {
            for &other in root.children() {
                if tree.get(other).playouts() > 0 {
                    prop_assert!(ucb.score(tree, fresh) > ucb.score(tree, other));
                }
            }
        }
        if let Some(&first) = unvisited.first() {
            prop_assert_eq!(ucb.best_child(tree, tree.root()).unwrap(), first);
        }
    }
}

// =============================================================================
// Playout accounting
// =============================================================================

proptest! {
    /// After run(N) the root has N playouts; its children hold N plus the
    /// single seeded playout of each terminal child.
    #[test]
    fn prop_root_playouts_match_budget(
        seed in arb_seed(),
        iterations in arb_iterations(),
        state in arb_position(),
    ) {
        let mut mcts = create_mcts(state, seed);
        mcts.run(iterations).unwrap();

        let tree = mcts.tree();
        let root = tree.root_node();
        prop_assert_eq!(root.playouts() as usize, iterations);

        let seeded = root
            .children()
            .iter()
            .filter(|&&c| tree.get(c).is_leaf())
            .count();
        let children_sum: usize = root
            .children()
            .iter()
            .map(|&c| tree.get(c).playouts() as usize)
            .sum();
        prop_assert_eq!(children_sum, iterations + seeded);
    }

    /// No node has more children than its mover has legal moves.
    #[test]
    fn prop_children_bounded_by_legal_moves(
        seed in arb_seed(),
        iterations in arb_iterations(),
        state in arb_position(),
    ) {
        let mut mcts = create_mcts(state, seed);
        mcts.run(iterations).unwrap();

        let tree = mcts.tree();
        for id in all_nodes(tree) {
            let node = tree.get(id);
            let legal = node.state().legal_moves(node.state().player()).unwrap();
            prop_assert!(node.children().len() <= legal.len());
            if node.is_leaf() {
                prop_assert!(node.children().is_empty());
            }
        }
    }

    /// One more iteration adds exactly one playout along a single path
    /// from the root.
    #[test]
    fn prop_iteration_updates_one_path(
        seed in arb_seed(),
        iterations in arb_iterations(),
        state in arb_position(),
    ) {
        let mut mcts = create_mcts(state, seed);
        mcts.run(iterations).unwrap();

        let before: HashMap<usize, u32> = all_nodes(mcts.tree())
            .into_iter()
            .map(|id| (id.index(), mcts.tree().get(id).playouts()))
            .collect();

        mcts.run(1).unwrap();

        let tree = mcts.tree();
        // The arena only grows, so old indices still name the same nodes.
        let after: HashMap<usize, NodeId> = all_nodes(tree)
            .into_iter()
            .map(|id| (id.index(), id))
            .collect();

        let mut changed = Vec::new();
        for (&index, &old) in &before {
            let id = after[&index];
            let new = tree.get(id).playouts();
            prop_assert!(new == old || new == old + 1);
            if new == old + 1 {
                changed.push(id);
            }
        }

        prop_assert!(changed.contains(&tree.root()));
        for &id in &changed {
            if let Some(parent) = tree.get(id).parent() {
                prop_assert!(changed.contains(&parent));
            }
        }
        // A path has exactly one node per depth.
        let mut depths: Vec<usize> = changed
            .iter()
            .map(|&id| {
                let mut depth = 0;
                let mut cur = tree.get(id).parent();
                while let Some(p) = cur {
                    depth += 1;
                    cur = tree.get(p).parent();
                }
                depth
            })
            .collect();
        depths.sort_unstable();
        depths.dedup();
        prop_assert_eq!(depths.len(), changed.len());
    }
}

// =============================================================================
// Determinism
// =============================================================================

proptest! {
    #[test]
    fn prop_same_seed_same_search(
        seed in arb_seed(),
        state in arb_position(),
    ) {
        let mut a = create_mcts(state.clone(), seed);
        let mut b = create_mcts(state, seed);

        let ra = a.search().unwrap();
        let rb = b.search().unwrap();

        prop_assert_eq!(ra.best_move, rb.best_move);
        prop_assert_eq!(ra.visit_counts, rb.visit_counts);
        prop_assert_eq!(a.stats(), b.stats());
    }

    /// The recommended move is always a legal move for the root's mover.
    #[test]
    fn prop_recommended_move_is_legal(
        seed in arb_seed(),
        iterations in arb_iterations(),
        state in arb_position(),
    ) {
        let mut mcts = create_mcts(state.clone(), seed);
        mcts.run(iterations).unwrap();

        let mv: TicTacToeMove = mcts.recommended_move().unwrap();
        let legal = state.legal_moves(state.player()).unwrap();
        prop_assert!(legal.contains(&mv));
        prop_assert!(state.apply_move(&mv).is_ok());
    }
}

#[test]
fn test_first_iteration_expands_root() {
    let mut mcts = create_mcts(TicTacToeState::new(), 0);
    mcts.run(1).unwrap();

    let root = mcts.root();
    assert_eq!(root.children().len(), 9);
    assert_eq!(root.playouts(), 1);
    assert_eq!(root.state().player(), Player::X);

    let visited: Vec<u32> = root
        .children()
        .iter()
        .map(|&c| mcts.tree().get(c).playouts())
        .collect();
    // Ties on +inf go to the first child.
    assert_eq!(visited, vec![1, 0, 0, 0, 0, 0, 0, 0, 0]);
}
