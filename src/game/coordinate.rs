use std::fmt;
use std::str::FromStr;

use super::board::{COLS, ROWS};
use crate::error::GameError;

/// A validated board position. Row 0 is rank "1", column 0 is file "A".
///
/// Only in-bounds values can be constructed, so holders of a `Coordinate`
/// never need to re-check bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinate {
    row: usize,
    column: usize,
}

impl Coordinate {
    /// Create a coordinate, rejecting anything outside the 4x4 board.
    pub fn new(row: i32, column: i32) -> Result<Self, GameError> {
        if !(0..ROWS as i32).contains(&row) || !(0..COLS as i32).contains(&column) {
            return Err(GameError::OutOfRange { row, column });
        }
        Ok(Coordinate {
            row: row as usize,
            column: column as usize,
        })
    }

    pub fn row(self) -> usize {
        self.row
    }

    pub fn column(self) -> usize {
        self.column
    }

    /// Offset by a (row, column) delta, `None` if that leaves the board.
    pub fn offset(self, delta_row: i32, delta_column: i32) -> Option<Coordinate> {
        Coordinate::new(
            self.row as i32 + delta_row,
            self.column as i32 + delta_column,
        )
        .ok()
    }

    /// Parse notation such as "A1" or " c4 ".
    pub fn from_notation(notation: &str) -> Result<Self, GameError> {
        let notation = notation.trim();
        let mut chars = notation.chars();
        let letter = chars
            .next()
            .ok_or_else(|| GameError::Format("notation is empty".into()))?
            .to_ascii_uppercase();

        let rank: i32 = chars.as_str().parse().map_err(|_| {
            GameError::Format(format!("cannot read a row number from '{notation}'"))
        })?;

        if !letter.is_ascii_uppercase() {
            return Err(GameError::Format(format!(
                "'{notation}' does not start with a column letter"
            )));
        }

        let column = letter as i32 - 'A' as i32;
        Coordinate::new(rank - 1, column)
    }

    /// Render as notation, e.g. row 0 / column 0 is "A1".
    pub fn to_notation(self) -> String {
        self.to_string()
    }

    /// Every board position in row-major order.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..ROWS).flat_map(|row| (0..COLS).map(move |column| Coordinate { row, column }))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = (b'A' + self.column as u8) as char;
        write!(f, "{}{}", letter, self.row + 1)
    }
}

impl FromStr for Coordinate {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Coordinate::from_notation(s)
    }
}
