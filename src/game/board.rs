use std::fmt;

use super::Coordinate;
use crate::error::GameError;

pub const ROWS: usize = 4;
pub const COLS: usize = 4;
pub const CELLS: usize = ROWS * COLS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    Empty,
    White,
    Black,
}

impl CellState {
    /// Integer code used by save files.
    pub fn code(self) -> u8 {
        match self {
            CellState::Empty => 0,
            CellState::Black => 1,
            CellState::White => 2,
        }
    }

    pub fn from_code(code: i64) -> Result<Self, GameError> {
        match code {
            0 => Ok(CellState::Empty),
            1 => Ok(CellState::Black),
            2 => Ok(CellState::White),
            other => Err(GameError::StateMismatch(format!(
                "unknown cell code {other}"
            ))),
        }
    }

    fn symbol(self) -> char {
        match self {
            CellState::Empty => '\u{b7}',
            CellState::White => '\u{25cb}',
            CellState::Black => '\u{25cf}',
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellState::Empty => "empty",
            CellState::White => "white",
            CellState::Black => "black",
        };
        f.write_str(name)
    }
}

/// Starting layout: rank 4 and rank 1 alternate colors, offset by one.
const INITIAL_LAYOUT: [(&str, CellState); 8] = [
    ("A4", CellState::Black),
    ("B4", CellState::White),
    ("C4", CellState::Black),
    ("D4", CellState::White),
    ("A1", CellState::White),
    ("B1", CellState::Black),
    ("C1", CellState::White),
    ("D1", CellState::Black),
];

/// The 4x4 grid, stored row-major. Row 0 is rank "1".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [CellState; CELLS],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Board {
            cells: [CellState::Empty; CELLS],
        }
    }

    /// Create a board already set to the starting layout
    pub fn initial() -> Self {
        let mut board = Board::new();
        board.initialize();
        board
    }

    /// Clear the board and place the eight starting pieces
    pub fn initialize(&mut self) {
        self.cells = [CellState::Empty; CELLS];
        for (notation, state) in INITIAL_LAYOUT {
            // The layout table only holds valid notation.
            if let Ok(coord) = Coordinate::from_notation(notation) {
                self.set(coord, state);
            }
        }
    }

    /// Single bounds-checked translation from (row, column) to storage.
    fn index(row: i32, column: i32) -> Result<usize, GameError> {
        let coord = Coordinate::new(row, column)?;
        Ok(coord.row() * COLS + coord.column())
    }

    pub fn get(&self, coord: Coordinate) -> CellState {
        self.cells[coord.row() * COLS + coord.column()]
    }

    pub fn set(&mut self, coord: Coordinate, state: CellState) {
        self.cells[coord.row() * COLS + coord.column()] = state;
    }

    /// Read by raw indices, failing with `OutOfRange` off the board.
    pub fn cell(&self, row: i32, column: i32) -> Result<CellState, GameError> {
        Ok(self.cells[Self::index(row, column)?])
    }

    /// Write by raw indices, failing with `OutOfRange` off the board.
    pub fn set_cell(&mut self, row: i32, column: i32, state: CellState) -> Result<(), GameError> {
        self.cells[Self::index(row, column)?] = state;
        Ok(())
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[CellState; CELLS] {
        &self.cells
    }

    /// Replace every cell. The input must hold exactly 16 cells.
    pub fn restore(&mut self, cells: &[CellState]) -> Result<(), GameError> {
        let cells: [CellState; CELLS] = cells.try_into().map_err(|_| {
            GameError::StateMismatch(format!(
                "board needs {CELLS} cells, got {}",
                cells.len()
            ))
        })?;
        self.cells = cells;
        Ok(())
    }

    /// Export as save-file codes, row-major.
    pub fn to_codes(&self) -> Vec<u8> {
        self.cells.iter().map(|cell| cell.code()).collect()
    }

    /// Rebuild from save-file codes. Anything other than 16 known codes fails.
    pub fn from_codes(codes: &[i64]) -> Result<Board, GameError> {
        let cells = codes
            .iter()
            .map(|&code| CellState::from_code(code))
            .collect::<Result<Vec<_>, _>>()?;
        let mut board = Board::new();
        board.restore(&cells)?;
        Ok(board)
    }

    /// Number of cells holding `state`
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for column in 0..COLS {
            write!(f, " {}", (b'A' + column as u8) as char)?;
        }
        writeln!(f)?;
        for row in 0..ROWS {
            write!(f, "{} ", row + 1)?;
            for column in 0..COLS {
                write!(f, " {}", self.cells[row * COLS + column].symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
