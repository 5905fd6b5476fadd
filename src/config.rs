use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::ConfigError;

/// Where save files and match records live.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub saves_dir: PathBuf,
    pub records_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            saves_dir: PathBuf::from("saves"),
            records_file: PathBuf::from("records.json"),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RecordsConfig {
    /// How many entries the records table shows
    pub top_count: usize,
}

impl Default for RecordsConfig {
    fn default() -> Self {
        RecordsConfig { top_count: 10 }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub records: RecordsConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.saves_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "storage.saves_dir must not be empty".into(),
            ));
        }
        if self.storage.records_file.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "storage.records_file must not be empty".into(),
            ));
        }
        if self.records.top_count == 0 {
            return Err(ConfigError::Validation(
                "records.top_count must be > 0".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}
