use std::fmt::Debug;

use crate::{Player, Result};

/// A single action taken by one player.
pub trait GameMove: Clone + PartialEq + Debug {
    /// The player performing this move.
    fn player(&self) -> Player;
}

/// A game position for playout-based tree search.
///
/// States are immutable values: [`GameState::apply_move`] returns a new state
/// and never mutates the receiver. The search engine only ever talks to a game
/// through this trait, so it can be reused across unrelated games.
pub trait GameState: Clone + Debug {
    /// The move type accepted by this state.
    type Move: GameMove;

    /// The player whose turn it is.
    fn player(&self) -> Player;

    /// Returns true if the game has ended (decided or drawn).
    fn is_terminal(&self) -> bool;

    /// The winning player, or `None` for a draw or an unfinished game.
    fn winner(&self) -> Option<Player>;

    /// All moves available to `player` in this state.
    ///
    /// # Errors
    /// Returns [`GameError::InvalidTurn`](crate::GameError::InvalidTurn) if
    /// `player` is not the player to move.
    fn legal_moves(&self, player: Player) -> Result<Vec<Self::Move>>;

    /// Applies a move, returning the resulting state.
    ///
    /// # Errors
    /// Returns [`GameError::InvalidTurn`](crate::GameError::InvalidTurn) if the
    /// move belongs to the wrong player and
    /// [`GameError::InvalidMove`](crate::GameError::InvalidMove) if the action
    /// is not legal here.
    fn apply_move(&self, mv: &Self::Move) -> Result<Self>;
}
