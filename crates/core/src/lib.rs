//! Playout Core - Game model abstractions shared by the search engine and games
//!
//! This crate provides the contract that any sequential, perfect-information,
//! two-player zero-sum game must fulfil to be searched by `playout-mcts`.
//!
//! # Types
//!
//! - [`GameState`] - Immutable position with the operations the engine calls
//! - [`GameMove`] - A legal action carrying the acting player
//! - [`Player`] - The two seats, `X` (opener) and `O`
//! - [`Outcome`] - Result of a finished game, scored in fixed-point units

mod error;
mod game;
mod types;

pub use error::{GameError, Result};
pub use game::{GameMove, GameState};
pub use types::{Outcome, Player, DRAW_POINTS, LOSS_POINTS, WIN_POINTS};
