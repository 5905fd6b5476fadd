use std::path::PathBuf;

use crate::game::{CellState, Coordinate, Direction};

/// Errors raised by the rule engine.
///
/// `InvalidSelection`, `IllegalDestination`, `Format` and `GameOver` are
/// recoverable at the interaction boundary: the caller re-prompts and the game
/// state is untouched. `OutOfRange` and `StateMismatch` signal bad data, which
/// fails the operation (typically a restore) that produced it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("position (row {row}, column {column}) is outside the 4x4 board")]
    OutOfRange { row: i32, column: i32 },

    #[error("malformed notation: {0}")]
    Format(String),

    #[error("{at} holds {found}, not a {expected} piece")]
    InvalidSelection {
        at: Coordinate,
        expected: CellState,
        found: CellState,
    },

    #[error("cannot move {from} {direction}: the target cell is occupied or off the board")]
    IllegalDestination { from: Coordinate, direction: Direction },

    #[error("state mismatch: {0}")]
    StateMismatch(String),

    #[error("player name cannot be empty")]
    InvalidPlayerName,

    #[error("the game is already over")]
    GameOver,
}

/// Errors that can occur while saving or loading a game.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("save file not found: {0}")]
    NotFound(PathBuf),

    #[error("save format version {found} is too old (minimum supported: {min})")]
    TooOld { found: i32, min: i32 },

    #[error("save format version {found} is newer than supported (current: {current})")]
    TooNew { found: i32, current: i32 },

    #[error("failed to read save file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse save file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid saved game: {0}")]
    State(#[from] GameError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur while writing match records.
#[derive(Debug, thiserror::Error)]
pub enum RecordsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
