//! Terminal-state detection: three in a row and the move-limit draw.

use super::board::{COLS, ROWS};
use super::{Board, CellState};

/// Contiguous pieces needed to win.
pub const WIN_LENGTH: usize = 3;

/// Total moves after which the game is drawn.
pub const MAX_MOVES: u32 = 30;

/// True if `color` has three contiguous pieces on any row, column or main diagonal.
pub fn check_win(board: &Board, color: CellState) -> bool {
    let rows = (0..ROWS).any(|row| check_line(board, (row as i32, 0), (0, 1), color));
    let columns = (0..COLS).any(|column| check_line(board, (0, column as i32), (1, 0), color));
    let diagonal = check_line(board, (0, 0), (1, 1), color);
    let anti_diagonal = check_line(board, (0, COLS as i32 - 1), (1, -1), color);

    rows || columns || diagonal || anti_diagonal
}

/// True once `move_count` reaches the move limit.
pub fn check_draw(move_count: u32) -> bool {
    move_count >= MAX_MOVES
}

/// Rules as shown by `tactickle rules`, with the starting layout drawn in.
pub fn rules_text() -> String {
    format!(
        "TacTickle rules

White (○) and Black (●) each start with four pieces on the edge ranks:

{board}
On your turn pick one of your pieces by its cell (e.g. A1), then slide it one
step with w (up), s (down), a (left) or d (right). The target cell must be
empty and on the board. Pieces never jump or capture.

The first player with {WIN_LENGTH} pieces in a row wins. A row, a column or one of
the two main diagonals counts.

The game is a draw once {MAX_MOVES} moves have been made without a winner.
",
        board = Board::initial()
    )
}

/// Walk from `start` by `step` until leaving the board, counting the current
/// run of `color`.
fn check_line(board: &Board, start: (i32, i32), step: (i32, i32), color: CellState) -> bool {
    let (mut row, mut column) = start;
    let mut run = 0;

    while let Ok(cell) = board.cell(row, column) {
        if cell == color {
            run += 1;
            if run >= WIN_LENGTH {
                return true;
            }
        } else {
            run = 0;
        }
        row += step.0;
        column += step.1;
    }

    false
}
