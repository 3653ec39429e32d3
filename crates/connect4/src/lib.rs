//! Connect Four for the playout search engine.
//!
//! Connect Four is a two-player connection game where players drop discs
//! into a 7-column, 6-row vertically suspended grid. The first to form a
//! horizontal, vertical or diagonal line of four wins; a full board with no
//! line is a draw. X always moves first.
//!
//! # Usage
//!
//! ```rust
//! use playout_connect4::{ConnectFourMove, ConnectFourState};
//! use playout_core::{GameState, Player};
//!
//! let state = ConnectFourState::new();
//! let next = state.apply_move(&ConnectFourMove::new(Player::X, 3)).unwrap();
//! assert_eq!(next.player(), Player::O);
//! print!("{}", next);
//! ```

mod moves;
pub mod position;
mod state;

pub use moves::ConnectFourMove;
pub use position::{Position, BOARD_SIZE, COLS, CONNECT, ROWS};
pub use state::ConnectFourState;
