use playout_core::{GameMove, Player};
use std::fmt;

/// A disc dropped by `player` into a column (0-6, left to right).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ConnectFourMove {
    player: Player,
    column: usize,
}

impl ConnectFourMove {
    pub fn new(player: Player, column: usize) -> Self {
        Self { player, column }
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

impl GameMove for ConnectFourMove {
    fn player(&self) -> Player {
        self.player
    }
}

impl fmt::Display for ConnectFourMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.player, self.column)
    }
}
