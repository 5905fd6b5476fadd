use super::board::CELLS;
use super::{Board, Side};
use crate::error::GameError;

/// Flat, storage-agnostic export of a game: 16 cell codes row-major plus the
/// turn bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub players: [String; 2],
    pub cells: Vec<i64>,
    pub current_player_index: i64,
    pub move_count: i64,
}

/// Everything needed to resume a game: board, seats, whose turn, move counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    players: [String; 2],
    current_player_index: u8,
    move_count: u32,
}

impl GameState {
    /// Create a game on the starting layout with seat 0 (White) to move.
    pub fn new(player1: &str, player2: &str) -> Result<Self, GameError> {
        Self::with_starting_player(player1, player2, 0)
    }

    /// Create a game on the starting layout with the given seat to move.
    pub fn with_starting_player(
        player1: &str,
        player2: &str,
        starting_index: u8,
    ) -> Result<Self, GameError> {
        let mut state = GameState {
            board: Board::initial(),
            players: [clean_name(player1)?, clean_name(player2)?],
            current_player_index: 0,
            move_count: 0,
        };
        state.set_current_player(starting_index)?;
        Ok(state)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub(super) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn players(&self) -> &[String; 2] {
        &self.players
    }

    pub fn current_player_index(&self) -> u8 {
        self.current_player_index
    }

    /// Name of the player to move
    pub fn current_player(&self) -> &str {
        &self.players[self.current_player_index as usize]
    }

    /// Name of the player waiting
    pub fn opponent(&self) -> &str {
        &self.players[1 - self.current_player_index as usize]
    }

    /// Side of the player to move; fixed by seat index.
    pub fn current_side(&self) -> Side {
        Side::from_index(self.current_player_index).unwrap_or(Side::White)
    }

    /// Completed moves so far
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Count the move just made and hand the turn to the other seat.
    pub fn next_turn(&mut self) {
        self.move_count = self.move_count.saturating_add(1);
        self.current_player_index = (self.current_player_index + 1) % 2;
    }

    pub fn set_current_player(&mut self, index: u8) -> Result<(), GameError> {
        if index > 1 {
            return Err(GameError::StateMismatch(format!(
                "player index {index} is not 0 or 1"
            )));
        }
        self.current_player_index = index;
        Ok(())
    }

    pub fn set_move_count(&mut self, count: u32) {
        self.move_count = count;
    }

    /// Back to the starting layout; player names are kept.
    pub fn reset(&mut self) {
        self.board.initialize();
        self.move_count = 0;
        self.current_player_index = 0;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            players: self.players.clone(),
            cells: self.board.to_codes().into_iter().map(i64::from).collect(),
            current_player_index: i64::from(self.current_player_index),
            move_count: i64::from(self.move_count),
        }
    }

    /// Rebuild a game from a snapshot, validating every field first.
    pub fn from_snapshot(snapshot: &GameSnapshot) -> Result<Self, GameError> {
        if snapshot.cells.len() != CELLS {
            return Err(GameError::StateMismatch(format!(
                "board needs {CELLS} cells, got {}",
                snapshot.cells.len()
            )));
        }
        let index = u8::try_from(snapshot.current_player_index)
            .ok()
            .filter(|&index| index <= 1)
            .ok_or_else(|| {
                GameError::StateMismatch(format!(
                    "player index {} is not 0 or 1",
                    snapshot.current_player_index
                ))
            })?;
        let move_count = u32::try_from(snapshot.move_count).map_err(|_| {
            GameError::StateMismatch(format!("invalid move count {}", snapshot.move_count))
        })?;
        let board = Board::from_codes(&snapshot.cells)?;

        let [player1, player2] = &snapshot.players;
        let mut state = GameState::new(player1, player2)
            .map_err(|_| GameError::StateMismatch("missing player name".into()))?;
        state.board = board;
        state.set_current_player(index)?;
        state.set_move_count(move_count);
        Ok(state)
    }

    /// Pieces belonging to `side`
    pub fn pieces(&self, side: Side) -> usize {
        self.board.count(side.to_cell())
    }
}

fn clean_name(name: &str) -> Result<String, GameError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(GameError::InvalidPlayerName);
    }
    Ok(name.to_string())
}
