//! Move legality checks. Everything here is pure: no function mutates the board.

use std::fmt;
use std::str::FromStr;

use super::{Board, CellState, Coordinate};
use crate::error::GameError;

/// One orthogonal step. Deltas are in (row, column) index space, where row 0
/// is rank "1".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

impl FromStr for Direction {
    type Err = GameError;

    /// Accepts the w/a/s/d keys or the full word, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "w" | "up" => Ok(Direction::Up),
            "s" | "down" => Ok(Direction::Down),
            "a" | "left" => Ok(Direction::Left),
            "d" | "right" => Ok(Direction::Right),
            other => Err(GameError::Format(format!("unknown direction '{other}'"))),
        }
    }
}

/// True iff the cell at `coord` holds exactly `expected`.
pub fn can_select_piece(board: &Board, coord: Coordinate, expected: CellState) -> bool {
    board.get(coord) == expected
}

/// Destination of a one-step slide, or `None` if it is off the board or occupied.
pub fn can_move_in_direction(
    board: &Board,
    from: Coordinate,
    direction: Direction,
) -> Option<Coordinate> {
    let (delta_row, delta_column) = direction.delta();
    from.offset(delta_row, delta_column)
        .filter(|&target| board.get(target) == CellState::Empty)
}

/// Combined selection and destination check. Advisory only; the engine
/// re-derives the destination before it mutates anything.
pub fn validate_move(
    board: &Board,
    from: Coordinate,
    direction: Direction,
    color: CellState,
) -> Result<Coordinate, GameError> {
    if !can_select_piece(board, from, color) {
        return Err(GameError::InvalidSelection {
            at: from,
            expected: color,
            found: board.get(from),
        });
    }

    can_move_in_direction(board, from, direction)
        .ok_or(GameError::IllegalDestination { from, direction })
}
