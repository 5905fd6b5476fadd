use super::board::CellState;

/// The two sides. Seat 0 always plays White and seat 1 always plays Black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    /// Side owned by the player at `index` (0 or 1)
    pub fn from_index(index: u8) -> Option<Side> {
        match index {
            0 => Some(Side::White),
            1 => Some(Side::Black),
            _ => None,
        }
    }

    /// Seat index of this side
    pub fn index(self) -> u8 {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }

    /// Get the other side
    pub fn other(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Convert side to the cell its pieces occupy
    pub fn to_cell(self) -> CellState {
        match self {
            Side::White => CellState::White,
            Side::Black => CellState::Black,
        }
    }

    /// Get side name for display
    pub fn name(self) -> &'static str {
        match self {
            Side::White => "White",
            Side::Black => "Black",
        }
    }
}
