//! Small solved games used to validate the search.

pub mod tictactoe;

pub use tictactoe::{TicTacToeMove, TicTacToeState};
