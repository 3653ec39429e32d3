use thiserror::Error;

use crate::Player;

/// Errors raised by game implementations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid turn: {found} cannot act, {expected} is to move")]
    InvalidTurn { expected: Player, found: Player },

    #[error("Invalid move: {0}")]
    InvalidMove(String),

    #[error("Invalid position: {0}")]
    InvalidPosition(String),
}

/// Convenience Result type for game operations
pub type Result<T> = std::result::Result<T, GameError>;
