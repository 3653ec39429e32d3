//! Tic-tac-toe implementation for MCTS validation.
//!
//! Tic-tac-toe is a solved game where perfect play always results in a draw.
//! This makes it ideal for validating MCTS correctness:
//! - MCTS should never lose against a random opponent
//! - MCTS should take an immediate win when one exists
//! - MCTS should block an immediate loss

use playout_core::{GameError, GameMove, GameState, Player, Result};
use std::fmt;

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2], // top row
    [3, 4, 5], // middle row
    [6, 7, 8], // bottom row
    [0, 3, 6], // left column
    [1, 4, 7], // center column
    [2, 5, 8], // right column
    [0, 4, 8], // main diagonal
    [2, 4, 6], // anti-diagonal
];

/// Tic-tac-toe move: a player claiming a cell (0-8, row-major).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TicTacToeMove {
    player: Player,
    cell: u8,
}

impl TicTacToeMove {
    pub fn new(player: Player, cell: u8) -> Self {
        Self { player, cell }
    }

    pub fn cell(self) -> u8 {
        self.cell
    }

    /// Get the row (0-2).
    pub fn row(self) -> u8 {
        self.cell / 3
    }

    /// Get the column (0-2).
    pub fn col(self) -> u8 {
        self.cell % 3
    }
}

impl GameMove for TicTacToeMove {
    fn player(&self) -> Player {
        self.player
    }
}

impl fmt::Display for TicTacToeMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@({}, {})", self.player, self.row(), self.col())
    }
}

/// Tic-tac-toe board state.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct TicTacToeState {
    /// Board: 9 cells, indexed 0-8 (row-major).
    /// ```text
    /// 0 | 1 | 2
    /// ---------
    /// 3 | 4 | 5
    /// ---------
    /// 6 | 7 | 8
    /// ```
    board: [Option<Player>; 9],

    /// Current player to move.
    current: Player,

    /// Number of pieces on the board.
    moves_played: u8,

    /// Cached winner (if any).
    winner: Option<Player>,
}

impl TicTacToeState {
    /// Create a new empty board with X to move.
    pub fn new() -> Self {
        Self {
            board: [None; 9],
            current: Player::X,
            moves_played: 0,
            winner: None,
        }
    }

    /// Get the piece at a cell, if any.
    pub fn get(&self, cell: usize) -> Option<Player> {
        self.board.get(cell).copied().flatten()
    }

    pub fn moves_played(&self) -> u8 {
        self.moves_played
    }

    fn check_winner(&self) -> Option<Player> {
        LINES.iter().find_map(|line| {
            let player = self.board[line[0]]?;
            (self.board[line[1]] == Some(player) && self.board[line[2]] == Some(player))
                .then_some(player)
        })
    }

    /// Check if the board is full (draw if no winner).
    fn is_full(&self) -> bool {
        self.moves_played as usize == self.board.len()
    }
}

impl Default for TicTacToeState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for TicTacToeState {
    type Move = TicTacToeMove;

    fn player(&self) -> Player {
        self.current
    }

    fn is_terminal(&self) -> bool {
        self.winner.is_some() || self.is_full()
    }

    fn winner(&self) -> Option<Player> {
        self.winner
    }

    fn legal_moves(&self, player: Player) -> Result<Vec<TicTacToeMove>> {
        if player != self.current {
            return Err(GameError::InvalidTurn {
                expected: self.current,
                found: player,
            });
        }
        if self.is_terminal() {
            return Ok(Vec::new());
        }

        Ok(self
            .board
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| TicTacToeMove::new(player, i as u8))
            .collect())
    }

    fn apply_move(&self, mv: &TicTacToeMove) -> Result<Self> {
        if mv.player != self.current {
            return Err(GameError::InvalidTurn {
                expected: self.current,
                found: mv.player,
            });
        }
        if self.is_terminal() {
            return Err(GameError::InvalidMove("game is over".into()));
        }
        let cell = mv.cell as usize;
        match self.board.get(cell) {
            None => return Err(GameError::InvalidMove(format!("cell {} out of range", cell))),
            Some(Some(_)) => return Err(GameError::InvalidMove(format!("cell {} is taken", cell))),
            Some(None) => {}
        }

        let mut next = self.clone();
        next.board[cell] = Some(mv.player);
        next.current = mv.player.opposite();
        next.moves_played += 1;
        next.winner = next.check_winner();
        Ok(next)
    }
}

impl fmt::Display for TicTacToeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            if row > 0 {
                writeln!(f, "-----------")?;
            }
            for col in 0..3 {
                if col > 0 {
                    write!(f, "|")?;
                }
                match self.board[row * 3 + col] {
                    Some(player) => write!(f, " {} ", player)?,
                    None => write!(f, "   ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
