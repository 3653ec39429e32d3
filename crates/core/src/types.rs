//! Domain types shared by every game.
//!
//! Outcomes are scored in fixed-point units so that node statistics stay
//! integral: a decisive result is worth [`WIN_POINTS`] to the winner, a draw
//! is worth [`DRAW_POINTS`] to both sides, and a loss is worth nothing.
//! A win rate is therefore `points / (WIN_POINTS * playouts)`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Points credited for a decisive result.
pub const WIN_POINTS: u32 = 2;

/// Points credited to each side for a draw.
pub const DRAW_POINTS: u32 = 1;

/// Points credited for a loss.
pub const LOSS_POINTS: u32 = 0;

/// One of the two players. `X` always opens.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opposing player.
    pub fn opposite(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// The result of a finished game.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win(Player),
    Draw,
}

impl Outcome {
    /// Build an outcome from a terminal state's winner.
    pub fn from_winner(winner: Option<Player>) -> Self {
        match winner {
            Some(player) => Outcome::Win(player),
            None => Outcome::Draw,
        }
    }

    /// The winner, if the game was decisive.
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Win(player) => Some(player),
            Outcome::Draw => None,
        }
    }

    /// Fixed-point score of this outcome for `player`.
    pub fn points_for(self, player: Player) -> u32 {
        match self {
            Outcome::Win(winner) if winner == player => WIN_POINTS,
            Outcome::Win(_) => LOSS_POINTS,
            Outcome::Draw => DRAW_POINTS,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win(player) => write!(f, "{} wins", player),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}
