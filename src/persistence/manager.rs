use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, info};

use crate::error::SaveError;
use crate::game::GameState;
use crate::persistence::save_data::SaveGameData;

const EXTENSION: &str = ".json";

/// Directory-backed store of save files, one JSON file per save.
pub struct SaveManager {
    dir: PathBuf,
}

impl SaveManager {
    /// Open (creating if needed) the saves directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, SaveError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(SaveManager { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `state` under `name`, returning the file path. A blank name gets a
    /// generated one.
    pub fn save(&self, state: &GameState, name: &str) -> Result<PathBuf, SaveError> {
        let timestamp = unix_now();
        let name = name.trim();
        let save_name = if name.is_empty() {
            format!("save_{timestamp}")
        } else {
            name.to_string()
        };

        let file_name = file_name_for(&save_name);
        let final_path = self.dir.join(&file_name);
        let tmp_path = self.dir.join(format!("{file_name}.tmp"));

        let data = SaveGameData::from_state(state, &save_name, timestamp);
        let json = serde_json::to_string_pretty(&data)?;

        // Write then rename so a crash never leaves a half-written save
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &final_path)?;

        info!(path = %final_path.display(), moves = state.move_count(), "game saved");
        Ok(final_path)
    }

    /// Load and validate the save called `name` (".json" optional).
    pub fn load(&self, name: &str) -> Result<GameState, SaveError> {
        let path = self.dir.join(file_name_for(name.trim()));
        if !path.exists() {
            return Err(SaveError::NotFound(path));
        }

        let json = fs::read_to_string(&path).map_err(|e| SaveError::Read {
            path: path.clone(),
            source: e,
        })?;
        let data: SaveGameData = serde_json::from_str(&json).map_err(|e| SaveError::Parse {
            path: path.clone(),
            source: e,
        })?;

        debug!(
            path = %path.display(),
            format_version = data.format_version,
            "decoding save"
        );
        let state = data.into_state()?;
        info!(path = %path.display(), "game loaded");
        Ok(state)
    }

    /// Save file names, newest name first.
    pub fn list(&self) -> Result<Vec<String>, SaveError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.path().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(EXTENSION) {
                names.push(name);
            }
        }
        names.sort_by(|a, b| b.cmp(a));
        Ok(names)
    }

    /// Remove a save. Deleting a save that does not exist is not an error.
    pub fn delete(&self, name: &str) -> Result<(), SaveError> {
        let path = self.dir.join(file_name_for(name.trim()));
        if path.exists() {
            fs::remove_file(&path)?;
            info!(path = %path.display(), "save deleted");
        }
        Ok(())
    }
}

/// Sanitized file name with the ".json" extension.
fn file_name_for(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    if safe.ends_with(EXTENSION) {
        safe
    } else {
        format!("{safe}{EXTENSION}")
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Coordinate, Direction, GameEngine};
    use crate::persistence::save_data::CURRENT_FORMAT_VERSION;

    fn mid_game() -> GameState {
        let mut engine = GameEngine::new(GameState::new("Alice", "Bob").unwrap());
        engine.make_move(Coordinate::from_notation("A1").unwrap(), Direction::Down);
        engine.make_move(Coordinate::from_notation("A4").unwrap(), Direction::Up);
        engine.make_move(Coordinate::from_notation("C1").unwrap(), Direction::Down);
        engine.into_state()
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SaveManager::new(dir.path()).unwrap();
        let state = mid_game();

        let path = manager.save(&state, "evening").unwrap();
        assert_eq!(path, dir.path().join("evening.json"));
        assert!(path.exists());
        assert!(!dir.path().join("evening.json.tmp").exists());

        let loaded = manager.load("evening").unwrap();
        assert_eq!(loaded, state);
        assert_eq!(manager.load("evening.json").unwrap(), state);
    }

    #[test]
    fn test_blank_name_is_generated() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SaveManager::new(dir.path()).unwrap();

        let path = manager.save(&mid_game(), "   ").unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("save_"), "{name}");
        assert!(name.ends_with(".json"), "{name}");
    }

    #[test]
    fn test_names_are_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SaveManager::new(dir.path()).unwrap();

        let path = manager.save(&mid_game(), "../a/b:c").unwrap();
        assert_eq!(path, dir.path().join(".._a_b_c.json"));
        assert!(manager.load("../a/b:c").is_ok());
    }

    #[test]
    fn test_list_sorted_descending() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SaveManager::new(dir.path()).unwrap();
        let state = mid_game();
        for name in ["b_game", "a_game", "c_game"] {
            manager.save(&state, name).unwrap();
        }
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        assert_eq!(
            manager.list().unwrap(),
            vec!["c_game.json", "b_game.json", "a_game.json"]
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SaveManager::new(dir.path()).unwrap();

        let err = manager.load("nothing").unwrap_err();
        assert!(
            matches!(err, SaveError::NotFound(_)),
            "expected NotFound, got: {err}"
        );
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SaveManager::new(dir.path()).unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

        assert!(matches!(
            manager.load("broken"),
            Err(SaveError::Parse { .. })
        ));
    }

    #[test]
    fn test_load_rejects_future_format() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SaveManager::new(dir.path()).unwrap();
        let mut data = SaveGameData::from_state(&mid_game(), "future", 1);
        data.format_version = CURRENT_FORMAT_VERSION + 1;
        fs::write(
            dir.path().join("future.json"),
            serde_json::to_string(&data).unwrap(),
        )
        .unwrap();

        assert!(matches!(
            manager.load("future"),
            Err(SaveError::TooNew { .. })
        ));
    }

    #[test]
    fn test_delete() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SaveManager::new(dir.path()).unwrap();
        manager.save(&mid_game(), "gone").unwrap();

        manager.delete("gone").unwrap();
        assert!(manager.list().unwrap().is_empty());
        manager.delete("gone").unwrap();
    }
}
