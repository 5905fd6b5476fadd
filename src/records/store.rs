use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::RecordsError;
use crate::game::WinRecord;

/// One finished, won game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub winner: String,
    pub loser: String,
    /// Unix seconds
    pub played_at: u64,
    /// Moves including the winning one
    pub move_count: u32,
}

/// Receives the result of every won game.
pub trait RecordSink {
    fn record_win(&mut self, record: &WinRecord) -> Result<(), RecordsError>;
}

/// JSON file holding every match record.
pub struct RecordsStore {
    path: PathBuf,
}

impl RecordsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        RecordsStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a record, rewriting the file.
    pub fn add(&self, record: MatchRecord) -> Result<(), RecordsError> {
        let mut records = self.all();
        records.push(record);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&records)?;

        // Write then rename so a torn write never replaces the history
        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Every stored record. A missing or unreadable file reads as empty.
    pub fn all(&self) -> Vec<MatchRecord> {
        if !self.path.exists() {
            return Vec::new();
        }
        let parsed: Result<Vec<MatchRecord>, RecordsError> = fs::read_to_string(&self.path)
            .map_err(RecordsError::from)
            .and_then(|json| Ok(serde_json::from_str(&json)?));
        match parsed {
            Ok(records) => records,
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "ignoring unreadable records file"
                );
                Vec::new()
            }
        }
    }

    /// Best `count` records: fewest moves first, newest first on ties.
    pub fn top(&self, count: usize) -> Vec<MatchRecord> {
        let mut records = self.all();
        records.sort_by(|a, b| {
            a.move_count
                .cmp(&b.move_count)
                .then_with(|| b.played_at.cmp(&a.played_at))
        });
        records.truncate(count);
        records
    }
}

impl RecordSink for RecordsStore {
    fn record_win(&mut self, record: &WinRecord) -> Result<(), RecordsError> {
        let played_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        self.add(MatchRecord {
            winner: record.winner.clone(),
            loser: record.loser.clone(),
            played_at,
            move_count: record.move_count,
        })?;
        info!(
            winner = %record.winner,
            loser = %record.loser,
            moves = record.move_count,
            "match recorded"
        );
        Ok(())
    }
}
