use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::utils::paths::AppPaths;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Preferences {
    #[serde(default)]
    pub storage: StoragePreferences,

    #[serde(default)]
    pub display: DisplayPreferences,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StoragePreferences {
    /// Directory holding the stored lists; overrides the platform data dir.
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayPreferences {
    #[serde(default = "default_urgent_marker")]
    pub urgent_marker: String,
    #[serde(default)]
    pub show_ids: bool,
}

fn default_urgent_marker() -> String {
    "!".to_string()
}

impl Default for DisplayPreferences {
    fn default() -> Self {
        Self {
            urgent_marker: default_urgent_marker(),
            show_ids: false,
        }
    }
}

impl Preferences {
    /// Get the path to the preferences file
    pub fn config_path() -> Result<PathBuf, crate::error::Error> {
        let config_dir = AppPaths::user_config_dir().ok_or_else(|| {
            crate::error::Error::Configuration("Could not determine config directory".to_string())
        })?;
        Ok(config_dir.join("preferences.toml"))
    }

    /// Load preferences from disk, or return defaults if not found
    pub fn load() -> Result<Self, crate::error::Error> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, crate::error::Error> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        match toml::from_str(&contents) {
            Ok(prefs) => Ok(prefs),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse preferences file at {:?}: {}. Using defaults.",
                    path,
                    e
                );
                Ok(Self::default())
            }
        }
    }

    /// Save preferences to disk
    pub fn save(&self) -> Result<(), crate::error::Error> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), crate::error::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self).map_err(|e| {
            crate::error::Error::Configuration(format!("Failed to serialize preferences: {e}"))
        })?;

        std::fs::write(path, contents)?;

        Ok(())
    }
}
