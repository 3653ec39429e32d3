//! Connect Four board geometry.
//!
//! The grid is stored top row first, so row 0 is the top of the board and a
//! dropped disc lands in the highest-numbered empty row of its column:
//! ```text
//! row 0  . . . . . . .   <- top
//! row 1  . . . . . . .
//! ...
//! row 5  . . . . . . .   <- bottom
//!  col   0 1 2 3 4 5 6
//! ```

use playout_core::{GameError, Player, Result};
use std::fmt;

/// Board dimensions
pub const ROWS: usize = 6;
pub const COLS: usize = 7;
pub const BOARD_SIZE: usize = ROWS * COLS; // 42

/// Discs in a row needed to win.
pub const CONNECT: usize = 4;

// Direction vectors: horizontal, vertical, diagonal \, diagonal /
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Disc placement on a 6x7 grid, without any notion of whose turn it is.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Position {
    grid: [[Option<Player>; COLS]; ROWS],
    moves_played: u8,
}

impl Position {
    /// An empty board.
    pub fn new() -> Self {
        Self {
            grid: [[None; COLS]; ROWS],
            moves_played: 0,
        }
    }

    /// Parse a board from text, top row first.
    ///
    /// Each non-blank line is one row of seven whitespace-separated cells.
    /// `X` or `1` is an X disc, `O` or `0` an O disc, anything else is empty.
    ///
    /// # Errors
    /// [`GameError::InvalidPosition`] if the shape is wrong or a disc floats
    /// above an empty cell.
    pub fn parse(text: &str) -> Result<Self> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != ROWS {
            return Err(GameError::InvalidPosition(format!(
                "expected {} rows, found {}",
                ROWS,
                rows.len()
            )));
        }

        let mut position = Self::new();
        for (row, line) in rows.iter().enumerate() {
            let cells: Vec<&str> = line.split_whitespace().collect();
            if cells.len() != COLS {
                return Err(GameError::InvalidPosition(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    cells.len(),
                    COLS
                )));
            }
            for (col, cell) in cells.into_iter().enumerate() {
                position.grid[row][col] = parse_cell(cell);
            }
        }

        for col in 0..COLS {
            for row in 1..ROWS {
                if position.grid[row - 1][col].is_some() && position.grid[row][col].is_none() {
                    return Err(GameError::InvalidPosition(format!(
                        "disc floating in column {}",
                        col
                    )));
                }
            }
        }

        position.moves_played = position.grid.iter().flatten().flatten().count() as u8;
        Ok(position)
    }

    /// Get the disc at a cell, if any.
    pub fn get(&self, row: usize, col: usize) -> Option<Player> {
        self.grid.get(row)?.get(col).copied().flatten()
    }

    /// Number of discs on the board.
    pub fn moves_played(&self) -> u8 {
        self.moves_played
    }

    /// Number of discs belonging to `player`.
    pub fn count(&self, player: Player) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|&&cell| cell == Some(player))
            .count()
    }

    pub fn is_full(&self) -> bool {
        self.moves_played as usize == BOARD_SIZE
    }

    /// Row a disc dropped into `col` would land in, or None if the column is
    /// full or out of range.
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.grid[row][col].is_none())
    }

    /// Columns that can still take a disc, left to right.
    pub fn open_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..COLS).filter(move |&col| self.grid[0][col].is_none())
    }

    /// Drop a disc for `player` into `col`, returning the new position and
    /// the row it landed in.
    ///
    /// # Errors
    /// [`GameError::InvalidMove`] if the column is out of range or full.
    pub fn drop_disc(&self, col: usize, player: Player) -> Result<(Self, usize)> {
        if col >= COLS {
            return Err(GameError::InvalidMove(format!("invalid column {}", col)));
        }
        let row = self
            .landing_row(col)
            .ok_or_else(|| GameError::InvalidMove(format!("column {} is full", col)))?;

        let mut next = self.clone();
        next.grid[row][col] = Some(player);
        next.moves_played += 1;
        Ok((next, row))
    }

    /// Whether the disc at (row, col) is part of a line of four.
    pub fn connects_at(&self, row: usize, col: usize) -> bool {
        let Some(player) = self.get(row, col) else {
            return false;
        };

        DIRECTIONS.iter().any(|&(dr, dc)| {
            let run = 1 + self.run_length(row, col, dr, dc, player)
                + self.run_length(row, col, -dr, -dc, player);
            run >= CONNECT
        })
    }

    /// Count consecutive `player` discs from (row, col), exclusive, along
    /// one direction.
    fn run_length(&self, row: usize, col: usize, dr: isize, dc: isize, player: Player) -> usize {
        let mut length = 0;
        let (mut r, mut c) = (row as isize + dr, col as isize + dc);
        while r >= 0 && c >= 0 && self.get(r as usize, c as usize) == Some(player) {
            length += 1;
            r += dr;
            c += dc;
        }
        length
    }

    /// Whether `player` has four in a row anywhere on the board.
    pub fn has_line(&self, player: Player) -> bool {
        (0..ROWS).any(|row| {
            (0..COLS).any(|col| self.get(row, col) == Some(player) && self.connects_at(row, col))
        })
    }

    /// The player with four in a row, checking X first.
    pub fn winner(&self) -> Option<Player> {
        [Player::X, Player::O]
            .into_iter()
            .find(|&player| self.has_line(player))
    }

    /// Left-right reflection of the board.
    pub fn mirror(&self) -> Self {
        let mut mirrored = self.clone();
        for row in mirrored.grid.iter_mut() {
            row.reverse();
        }
        mirrored
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_cell(cell: &str) -> Option<Player> {
    match cell {
        "X" | "x" | "1" => Some(Player::X),
        "O" | "o" | "0" => Some(Player::O),
        _ => None,
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.grid {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| match cell {
                    Some(player) => player.to_string(),
                    None => ".".to_string(),
                })
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY: &str = "
        . . . . . . .
        . . . . . . .
        . . . . . . .
        . . . . . . .
        . . . . . . .
        . . . . . . .
    ";

    #[test]
    fn test_empty_board() {
        let position = Position::new();
        assert_eq!(position.moves_played(), 0);
        assert!(!position.is_full());
        assert_eq!(position.winner(), None);
        assert_eq!(position.open_columns().collect::<Vec<_>>(), (0..COLS).collect::<Vec<_>>());
        assert_eq!(Position::parse(EMPTY).unwrap(), position);
    }

    #[test]
    fn test_drop_lands_at_bottom() {
        let (position, row) = Position::new().drop_disc(3, Player::X).unwrap();
        assert_eq!(row, ROWS - 1);
        assert_eq!(position.get(ROWS - 1, 3), Some(Player::X));
        assert_eq!(position.moves_played(), 1);

        let (position, row) = position.drop_disc(3, Player::O).unwrap();
        assert_eq!(row, ROWS - 2);
        assert_eq!(position.get(ROWS - 2, 3), Some(Player::O));
    }

    #[test]
    fn test_drop_errors() {
        let mut position = Position::new();
        for i in 0..ROWS {
            let player = if i % 2 == 0 { Player::X } else { Player::O };
            position = position.drop_disc(0, player).unwrap().0;
        }

        assert_eq!(position.landing_row(0), None);
        assert!(!position.open_columns().any(|c| c == 0));
        assert_eq!(
            position.drop_disc(0, Player::X),
            Err(GameError::InvalidMove("column 0 is full".into()))
        );
        assert_eq!(
            position.drop_disc(7, Player::X),
            Err(GameError::InvalidMove("invalid column 7".into()))
        );
    }

    #[test]
    fn test_parse_cells_and_display() {
        let position = Position::parse(
            "
            . . . . . . .
            . . . . . . .
            . . . . . . .
            . . . . . . .
            . . . 0 . . .
            . . 1 X O x -
            ",
        )
        .unwrap();

        assert_eq!(position.moves_played(), 5);
        assert_eq!(position.count(Player::X), 3);
        assert_eq!(position.count(Player::O), 2);
        assert_eq!(position.get(4, 3), Some(Player::O));
        assert_eq!(position.get(5, 6), None);

        let rendered = position.to_string();
        assert_eq!(rendered.lines().last(), Some(". . X X O X ."));
        assert_eq!(Position::parse(&rendered).unwrap(), position);
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        assert!(matches!(
            Position::parse(". . . . . . ."),
            Err(GameError::InvalidPosition(_))
        ));

        let short_row = EMPTY.replacen(". . . . . . .", ". . .", 1);
        assert!(matches!(
            Position::parse(&short_row),
            Err(GameError::InvalidPosition(_))
        ));

        let floating = EMPTY.replacen(". . . . . . .", "X . . . . . .", 1);
        assert!(matches!(
            Position::parse(&floating),
            Err(GameError::InvalidPosition(_))
        ));
    }

    #[test]
    fn test_horizontal_win() {
        let mut position = Position::new();
        for col in 0..3 {
            position = position.drop_disc(col, Player::O).unwrap().0;
        }
        assert_eq!(position.winner(), None);

        let (position, row) = position.drop_disc(3, Player::O).unwrap();
        assert!(position.connects_at(row, 3));
        assert!(position.connects_at(row, 0));
        assert_eq!(position.winner(), Some(Player::O));
    }

    #[test]
    fn test_vertical_and_diagonal_wins() {
        let vertical = Position::parse(
            "
            . . . . . . .
            . . . . . . .
            . X . . . . .
            . X . . . . .
            . X O . . . .
            . X O O . . .
            ",
        )
        .unwrap();
        assert_eq!(vertical.winner(), Some(Player::X));

        let diagonal = Position::parse(
            "
            . . . . . . .
            . . . . . . .
            . . . O . . .
            . . O X . . .
            . O X X . . .
            O X X X O . .
            ",
        )
        .unwrap();
        assert_eq!(diagonal.winner(), Some(Player::O));
        assert_eq!(diagonal.mirror().winner(), Some(Player::O));
    }

    #[test]
    fn test_mirror() {
        let (position, _) = Position::new().drop_disc(0, Player::X).unwrap();
        let mirrored = position.mirror();

        assert_eq!(mirrored.get(ROWS - 1, COLS - 1), Some(Player::X));
        assert_eq!(mirrored.get(ROWS - 1, 0), None);
        assert_eq!(mirrored.moves_played(), 1);
        assert_eq!(mirrored.mirror(), position);
    }
}
