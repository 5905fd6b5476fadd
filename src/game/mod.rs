//! Core TacTickle rules: coordinates, the 4x4 board, move validation,
//! win/draw detection, game state, and the engine that applies moves.

mod board;
mod coordinate;
mod engine;
mod player;
pub mod rules;
mod state;
pub mod validator;

pub use board::{Board, CellState, CELLS, COLS, ROWS};
pub use coordinate::Coordinate;
pub use engine::{GameEngine, GameResult, MoveOutcome, WinRecord};
pub use player::Side;
pub use state::{GameSnapshot, GameState};
pub use validator::Direction;
