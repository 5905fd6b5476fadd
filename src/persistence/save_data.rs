use serde::{Deserialize, Serialize};

use crate::error::SaveError;
use crate::game::{GameSnapshot, GameState};

/// Save format written by this build; bump on incompatible schema changes.
pub const CURRENT_FORMAT_VERSION: i32 = 1;

/// Oldest save format this build can still read.
pub const MIN_COMPATIBLE_FORMAT_VERSION: i32 = 1;

/// One move in a save file's history. Current builds write an empty history
/// but keep the shape so older or richer files still decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveEntry {
    pub player_name: String,
    pub player_color: String,
    pub from_row: i32,
    pub from_column: i32,
    pub to_row: i32,
    pub to_column: i32,
    pub move_number: i32,
    pub timestamp: u64,
}

/// On-disk save record. Counters are signed so that corrupt negative values
/// are reported as state mismatches instead of parse failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveGameData {
    pub format_version: i32,
    pub min_compatible_version: i32,
    pub timestamp: u64,
    #[serde(default)]
    pub save_name: String,
    pub player1_name: String,
    pub player2_name: String,
    pub current_player_index: i64,
    pub move_count: i64,
    pub board_state: Vec<i64>,
    #[serde(default)]
    pub move_history: Vec<MoveEntry>,
}

impl SaveGameData {
    /// Capture `state` at the current format version.
    pub fn from_state(state: &GameState, save_name: &str, timestamp: u64) -> Self {
        let GameSnapshot {
            players: [player1_name, player2_name],
            cells,
            current_player_index,
            move_count,
        } = state.snapshot();

        SaveGameData {
            format_version: CURRENT_FORMAT_VERSION,
            min_compatible_version: MIN_COMPATIBLE_FORMAT_VERSION,
            timestamp,
            save_name: save_name.to_string(),
            player1_name,
            player2_name,
            current_player_index,
            move_count,
            board_state: cells,
            move_history: Vec::new(),
        }
    }

    /// Reject versions this build cannot read.
    pub fn check_compatibility(&self) -> Result<(), SaveError> {
        if self.format_version < MIN_COMPATIBLE_FORMAT_VERSION {
            return Err(SaveError::TooOld {
                found: self.format_version,
                min: MIN_COMPATIBLE_FORMAT_VERSION,
            });
        }
        if self.format_version > CURRENT_FORMAT_VERSION {
            return Err(SaveError::TooNew {
                found: self.format_version,
                current: CURRENT_FORMAT_VERSION,
            });
        }
        Ok(())
    }

    /// Version-check, validate and rebuild the game.
    pub fn into_state(self) -> Result<GameState, SaveError> {
        self.check_compatibility()?;

        let snapshot = GameSnapshot {
            players: [self.player1_name, self.player2_name],
            cells: self.board_state,
            current_player_index: self.current_player_index,
            move_count: self.move_count,
        };
        Ok(GameState::from_snapshot(&snapshot)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;

    fn sample() -> SaveGameData {
        let state = GameState::new("Alice", "Bob").unwrap();
        SaveGameData::from_state(&state, "friday", 1_700_000_000)
    }

    #[test]
    fn test_json_uses_camel_case_keys() {
        let json = serde_json::to_string_pretty(&sample()).unwrap();
        for key in [
            "\"formatVersion\"",
            "\"minCompatibleVersion\"",
            "\"player1Name\"",
            "\"currentPlayerIndex\"",
            "\"moveCount\"",
            "\"boardState\"",
            "\"moveHistory\"",
        ] {
            assert!(json.contains(key), "missing {key} in {json}");
        }
    }

    #[test]
    fn test_serde_roundtrip_restores_state() {
        let data = sample();
        let json = serde_json::to_string(&data).unwrap();
        let decoded: SaveGameData = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, data);

        let state = decoded.into_state().unwrap();
        assert_eq!(state, GameState::new("Alice", "Bob").unwrap());
    }

    #[test]
    fn test_rejects_older_format() {
        let mut data = sample();
        data.format_version = 0;
        assert!(matches!(
            data.into_state(),
            Err(SaveError::TooOld { found: 0, min: 1 })
        ));
    }

    #[test]
    fn test_rejects_newer_format() {
        let mut data = sample();
        data.format_version = CURRENT_FORMAT_VERSION + 1;
        assert!(matches!(data.into_state(), Err(SaveError::TooNew { .. })));
    }

    #[test]
    fn test_rejects_bad_board_and_counters() {
        let mut short = sample();
        short.board_state.truncate(15);
        assert!(matches!(
            short.into_state(),
            Err(SaveError::State(GameError::StateMismatch(_)))
        ));

        let mut index = sample();
        index.current_player_index = 5;
        assert!(matches!(
            index.into_state(),
            Err(SaveError::State(GameError::StateMismatch(_)))
        ));

        let mut moves = sample();
        moves.move_count = -1;
        assert!(matches!(
            moves.into_state(),
            Err(SaveError::State(GameError::StateMismatch(_)))
        ));
    }

    #[test]
    fn test_minimal_file_without_optional_fields() {
        let json = r#"{
            "formatVersion": 1,
            "minCompatibleVersion": 1,
            "timestamp": 1700000000,
            "player1Name": "Alice",
            "player2Name": "Bob",
            "currentPlayerIndex": 1,
            "moveCount": 3,
            "boardState": [2, 1, 2, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 1, 2]
        }"#;

        let data: SaveGameData = serde_json::from_str(json).unwrap();
        assert!(data.move_history.is_empty());
        assert!(data.save_name.is_empty());

        let state = data.into_state().unwrap();
        assert_eq!(state.current_player(), "Bob");
        assert_eq!(state.move_count(), 3);
    }
}
