//! Player settings and preferences
//!
//! Stored as JSON next to the leaderboard, separate from game balance
//! (see `tuning`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::tuning::ConfigError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name recorded with leaderboard entries
    pub player_name: String,
    /// Fixed RNG seed; a fresh seed per run when unset
    pub seed: Option<u64>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Leaderboard ===
    pub leaderboard_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_name: "player".to_string(),
            seed: None,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,

            leaderboard_path: PathBuf::from("valo_dash_scores.json"),
        }
    }
}

impl Settings {
    /// Read settings from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load settings, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::info!("Using default settings ({e})");
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        };
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        std::fs::write(path, json).map_err(io_err)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
