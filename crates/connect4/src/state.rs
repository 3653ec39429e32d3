//! Connect Four rules on top of [`Position`].

use crate::moves::ConnectFourMove;
use crate::position::Position;
use playout_core::{GameError, GameMove, GameState, Player, Result};
use std::fmt;

/// A Connect Four game state: the board plus whose turn it is.
///
/// X always opens, so the mover follows from the disc counts. The winner is
/// cached when a disc is dropped.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ConnectFourState {
    position: Position,
    to_move: Player,
    winner: Option<Player>,
}

impl ConnectFourState {
    /// Create a new empty board with X to move.
    pub fn new() -> Self {
        Self {
            position: Position::new(),
            to_move: Player::X,
            winner: None,
        }
    }

    /// Build a state from an arbitrary position.
    ///
    /// # Errors
    /// [`GameError::InvalidPosition`] if the disc counts are not reachable
    /// with X opening, if both players have a line, or if the winner is not
    /// the player who moved last.
    pub fn from_position(position: Position) -> Result<Self> {
        let x = position.count(Player::X);
        let o = position.count(Player::O);
        let to_move = if x == o {
            Player::X
        } else if x == o + 1 {
            Player::O
        } else {
            return Err(GameError::InvalidPosition(format!(
                "{} X discs and {} O discs cannot occur with X opening",
                x, o
            )));
        };

        let winner = match (position.has_line(Player::X), position.has_line(Player::O)) {
            (true, true) => {
                return Err(GameError::InvalidPosition(
                    "both players have four in a row".into(),
                ))
            }
            (true, false) => Some(Player::X),
            (false, true) => Some(Player::O),
            (false, false) => None,
        };
        if winner == Some(to_move) {
            return Err(GameError::InvalidPosition(format!(
                "{} has won but is also to move",
                to_move
            )));
        }

        Ok(Self {
            position,
            to_move,
            winner,
        })
    }

    /// Parse a board (see [`Position::parse`]) and derive the mover.
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_position(Position::parse(text)?)
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Number of discs dropped so far.
    pub fn moves_played(&self) -> u8 {
        self.position.moves_played()
    }

    /// Left-right reflection; the mover and winner are unchanged.
    pub fn mirror(&self) -> Self {
        Self {
            position: self.position.mirror(),
            ..self.clone()
        }
    }

    fn check_turn(&self, player: Player) -> Result<()> {
        if player == self.to_move {
            Ok(())
        } else {
            Err(GameError::InvalidTurn {
                expected: self.to_move,
                found: player,
            })
        }
    }
}

impl Default for ConnectFourState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for ConnectFourState {
    type Move = ConnectFourMove;

    fn player(&self) -> Player {
        self.to_move
    }

    fn is_terminal(&self) -> bool {
        self.winner.is_some() || self.position.is_full()
    }

    fn winner(&self) -> Option<Player> {
        self.winner
    }

    fn legal_moves(&self, player: Player) -> Result<Vec<ConnectFourMove>> {
        self.check_turn(player)?;
        if self.is_terminal() {
            return Ok(Vec::new());
        }

        Ok(self
            .position
            .open_columns()
            .map(|column| ConnectFourMove::new(player, column))
            .collect())
    }

    fn apply_move(&self, mv: &ConnectFourMove) -> Result<Self> {
        let player = mv.player();
        self.check_turn(player)?;
        if self.is_terminal() {
            return Err(GameError::InvalidMove("game is over".into()));
        }

        let (position, row) = self.position.drop_disc(mv.column(), player)?;
        let winner = position
            .connects_at(row, mv.column())
            .then_some(player);

        Ok(Self {
            position,
            to_move: player.opposite(),
            winner,
        })
    }
}

impl fmt::Display for ConnectFourState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.position)?;
        match self.winner {
            Some(player) => writeln!(f, "{} wins", player),
            None if self.position.is_full() => writeln!(f, "draw"),
            None => writeln!(f, "{} to move", self.to_move),
        }
    }
}
