//! Monte Carlo Tree Search over any two-player game.
//!
//! This crate provides a generic MCTS engine that works with any game
//! implementing the `playout_core::GameState` trait.
//!
//! # Features
//!
//! - **Generic**: Works with any `GameState` implementation
//! - **UCB1 Selection**: Unvisited children first, then UCB1 with an injectable constant
//! - **Evaluator Abstraction**: Random rollouts by default, seeded for reproducibility
//! - **Robust Child**: The recommended move is the root child with the most playouts
//! - **Tree Reuse**: Optionally keep the played subtree when the game advances
//!
//! # Example
//!
//! ```
//! use playout_mcts::{Mcts, MctsConfig, RolloutEvaluator, games::TicTacToeState};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let config = MctsConfig::with_iterations(100);
//! let evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(42));
//! let mut mcts = Mcts::new(TicTacToeState::new(), config, evaluator);
//!
//! let result = mcts.search().unwrap();
//! println!("Best move: {}", result.best_move);
//! println!("Root win rate: {:.3}", result.root_win_rate);
//! assert_eq!(mcts.root().playouts(), 100);
//! ```

pub mod config;
pub mod evaluator;
pub mod games;
pub mod node;
pub mod search;
pub mod selection;
pub mod tree;

pub use config::{MctsConfig, RootPolicy};
pub use evaluator::{Evaluator, RolloutEvaluator};
pub use node::{Node, NodeId};
pub use search::{Mcts, SearchError, SearchResult};
pub use selection::Ucb1;
pub use tree::{Tree, TreeStats};
