//! Evaluation abstraction for MCTS.
//!
//! The `Evaluator` trait is the simulation step of the search: given the
//! state where a simulation starts, produce the outcome of the game. The
//! default strategy is `RolloutEvaluator`, which plays uniformly random
//! moves until the game ends.

use playout_core::{GameError, GameState, Outcome};
use rand::Rng;
use std::cell::RefCell;

/// Trait for evaluating game positions.
///
/// Implementations must not touch the search tree; they only walk transient
/// states derived from the one they are given.
pub trait Evaluator<S: GameState> {
    /// Play out `state` and report how the game ended.
    fn evaluate(&self, state: &S) -> Result<Outcome, GameError>;
}

/// Evaluator using uniformly random playouts.
///
/// The random source is injected so that a fixed seed reproduces a search
/// exactly.
pub struct RolloutEvaluator<R: Rng> {
    /// Random number generator (wrapped in RefCell for interior mutability).
    rng: RefCell<R>,
}

impl<R: Rng> RolloutEvaluator<R> {
    /// Create a new rollout evaluator drawing moves from `rng`.
    pub fn new(rng: R) -> Self {
        Self {
            rng: RefCell::new(rng),
        }
    }

    /// Play random moves from `initial` until a terminal state is reached.
    ///
    /// Returns the final state so callers can inspect more than the outcome.
    pub fn rollout<S: GameState>(&self, initial: &S) -> Result<S, GameError> {
        let mut state = initial.clone();

        while !state.is_terminal() {
            let moves = state.legal_moves(state.player())?;
            if moves.is_empty() {
                return Err(GameError::InvalidPosition(
                    "non-terminal state has no legal moves".to_string(),
                ));
            }

            // Random move
            let idx = self.rng.borrow_mut().gen_range(0..moves.len());
            state = state.apply_move(&moves[idx])?;
        }

        Ok(state)
    }
}

impl<S: GameState, R: Rng> Evaluator<S> for RolloutEvaluator<R> {
    fn evaluate(&self, state: &S) -> Result<Outcome, GameError> {
        let terminal = self.rollout(state)?;
        Ok(Outcome::from_winner(terminal.winner()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::{TicTacToeMove, TicTacToeState};
    use playout_core::Player;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn play(cells: &[u8]) -> TicTacToeState {
        let mut state = TicTacToeState::new();
        for &cell in cells {
            let mv = TicTacToeMove::new(state.player(), cell);
            state = state.apply_move(&mv).unwrap();
        }
        state
    }

    #[test]
    fn test_rollout_reaches_terminal() {
        let evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(42));
        let start = TicTacToeState::new();

        let end = evaluator.rollout(&start).unwrap();

        assert!(end.is_terminal());
        // The starting state is never mutated
        assert_eq!(start.moves_played(), 0);
    }

    #[test]
    fn test_evaluate_terminal_state() {
        let evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(7));
        let won = play(&[0, 3, 1, 4, 2]);

        assert_eq!(evaluator.evaluate(&won).unwrap(), Outcome::Win(Player::X));
    }

    #[test]
    fn test_evaluate_forced_line() {
        // Only cell 8 is left; X fills it and the board is a draw.
        // X O X
        // X O O
        // O X .
        let state = play(&[0, 1, 2, 4, 3, 5, 7, 6]);
        let evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(1));

        let outcome = evaluator.evaluate(&state).unwrap();
        assert_eq!(outcome, Outcome::Draw);
    }

    // A game that never ends and offers no moves.
    #[derive(Clone, Debug, PartialEq)]
    struct StuckState;

    #[derive(Clone, Debug, PartialEq)]
    struct StuckMove;

    impl playout_core::GameMove for StuckMove {
        fn player(&self) -> Player {
            Player::X
        }
    }

    impl GameState for StuckState {
        type Move = StuckMove;

        fn player(&self) -> Player {
            Player::X
        }

        fn is_terminal(&self) -> bool {
            false
        }

        fn winner(&self) -> Option<Player> {
            None
        }

        fn legal_moves(&self, _player: Player) -> Result<Vec<StuckMove>, GameError> {
            Ok(Vec::new())
        }

        fn apply_move(&self, _mv: &StuckMove) -> Result<Self, GameError> {
            Err(GameError::InvalidMove("no moves".to_string()))
        }
    }

    #[test]
    fn test_rollout_rejects_stuck_state() {
        let evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(3));

        assert!(matches!(
            evaluator.evaluate(&StuckState),
            Err(GameError::InvalidPosition(_))
        ));
    }

    #[test]
    fn test_rollout_is_seed_deterministic() {
        let start = play(&[4]);
        let a = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(99));
        let b = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(99));

        for _ in 0..20 {
            assert_eq!(a.rollout(&start).unwrap(), b.rollout(&start).unwrap());
        }
    }
}
