use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::preferences::Preferences;

/// Standardized application directories for Jot.
///
/// - User-level config: uses OS-specific dirs
/// - User-level data: uses OS-specific dirs
pub struct AppPaths;

impl AppPaths {
    /// Return the user-level config directory (platform-specific)
    pub fn user_config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "jot").map(|d| d.config_dir().to_path_buf())
    }

    /// Return the user-level data directory (platform-specific)
    pub fn user_data_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "jot").map(|d| d.data_dir().to_path_buf())
    }

    /// Where the to-do lists live unless configured otherwise
    pub fn default_todo_dir() -> Option<PathBuf> {
        Self::user_data_dir().map(|d| d.join("todos"))
    }

    pub fn log_dir() -> Option<PathBuf> {
        Self::user_data_dir().map(|d| d.join("logs"))
    }

    /// Pick the storage directory: explicit override first, then
    /// preferences, then the platform default.
    pub fn resolve_todo_dir(
        override_dir: Option<&Path>,
        prefs: &Preferences,
    ) -> Result<PathBuf, Error> {
        if let Some(dir) = override_dir {
            return Ok(dir.to_path_buf());
        }
        if let Some(dir) = &prefs.storage.data_dir {
            return Ok(dir.clone());
        }
        Self::default_todo_dir().ok_or_else(|| {
            Error::Configuration("Could not determine data directory".to_string())
        })
    }
}
