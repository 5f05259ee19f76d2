use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use super::{KeyValueStore, StorageError};

/// Directory-backed storage: each key lives in `<dir>/<key>.json`.
///
/// Writes go through a temp file in the same directory and are renamed into
/// place, so a reader never observes a half-written value.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Wraps `dir` without touching the filesystem. Operations report
    /// [`StorageError::Unavailable`] while the directory does not exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Creates `dir` (and parents) if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            StorageError::unavailable(format!("cannot create {}: {e}", dir.display()))
        })?;
        debug!(target: "jot::storage", dir = %dir.display(), "Opened file storage");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::invalid_key(key));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }

    fn ensure_available(&self) -> Result<(), StorageError> {
        if self.dir.is_dir() {
            Ok(())
        } else {
            Err(StorageError::unavailable(format!(
                "{} is not a directory",
                self.dir.display()
            )))
        }
    }
}

impl KeyValueStore for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        self.ensure_available()?;

        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        self.ensure_available()?;

        let mut temp = NamedTempFile::new_in(&self.dir).map_err(|e| StorageError::io(key, e))?;
        temp.write_all(value.as_bytes())
            .map_err(|e| StorageError::io(key, e))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| StorageError::io(key, e))?;
        temp.persist(&path)
            .map_err(|e| StorageError::io(key, e.error))?;

        debug!(target: "jot::storage", key, bytes = value.len(), "Wrote value");
        Ok(())
    }
}
