//! Editor settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::guard::DEFAULT_TOLERANCE;
use super::undo::DEFAULT_MAX_DEPTH;
use crate::error::EditorError;

/// Undo history settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySettings {
    /// Maximum number of undoable commands kept
    pub max_depth: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Property editing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditingSettings {
    /// Numeric values closer than this count as unchanged
    pub tolerance: f64,
}

impl Default for EditingSettings {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// All editor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EditorSettings {
    #[serde(default)]
    pub history: HistorySettings,
    #[serde(default)]
    pub editing: EditingSettings,
}

impl EditorSettings {
    /// Default location of the settings file
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "solar-designer", "solar-designer")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from the config dir, or return default if not found
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load settings from `path`; missing or invalid files give defaults
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&json) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring invalid settings file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Save settings to the config dir
    pub fn save(&self) -> Result<(), EditorError> {
        let path = Self::config_path().ok_or(EditorError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save settings to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), EditorError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
