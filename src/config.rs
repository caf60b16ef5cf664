//! Configuration for the engagement-prep toolkit.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Archive index the raw feature files are mirrored from.
pub const DEFAULT_DATASET_URL: &str =
    "https://sigmedia.tcd.ie/room_reader_corpus_db/features/OpenFace_Features/";

/// Main configuration for the toolkit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory-index URL of the remote feature archive
    pub dataset_url: String,

    /// Accept the archive host's invalid TLS certificate chain
    pub accept_invalid_certs: bool,

    /// Where mirrored feature files land
    pub features_path: PathBuf,

    /// Root of the raw per-session annotation CSVs
    pub annotations_path: PathBuf,

    /// Where aggregated interval-mean CSVs are written
    pub aggregated_path: PathBuf,

    /// Directory of session WAV recordings to segment
    pub recordings_path: PathBuf,

    /// Where audio segments are written
    pub segments_path: PathBuf,

    /// Ratings per aggregation window
    pub window_size: usize,

    /// Length of each audio segment in seconds
    pub segment_seconds: u32,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("engagement-prep");

        Self {
            dataset_url: DEFAULT_DATASET_URL.to_string(),
            accept_invalid_certs: false,
            features_path: data_dir.join("features"),
            annotations_path: data_dir.join("annotations"),
            aggregated_path: data_dir.join("aggregated"),
            recordings_path: data_dir.join("recordings"),
            segments_path: data_dir.join("segments"),
            window_size: 2,
            segment_seconds: 7,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::IoError(e.to_string()))?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path();

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(&config_path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("engagement-prep")
            .join("config.json")
    }

    /// Ensure all dataset directories exist.
    pub fn ensure_directories(&self) -> Result<(), ConfigError> {
        for dir in [
            &self.features_path,
            &self.annotations_path,
            &self.aggregated_path,
            &self.recordings_path,
            &self.segments_path,
        ] {
            std::fs::create_dir_all(dir).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::ParseError(e) => write!(f, "Parse error: {e}"),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}
