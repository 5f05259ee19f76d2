//! Key-value persistence used by [`TodoStore`](crate::todo::TodoStore).
//!
//! Values are opaque strings; the store decides what goes in them. Backends
//! report failures through [`StorageError`] and leave recovery to the caller.

use thiserror::Error;

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage unavailable: {message}")]
    Unavailable { message: String },

    #[error("Invalid storage key: {key:?}")]
    InvalidKey { key: String },

    #[error("I/O error for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("In-memory storage lock poisoned: {message}")]
    LockPoisoned { message: String },
}

impl StorageError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn invalid_key(key: impl Into<String>) -> Self {
        Self::InvalidKey { key: key.into() }
    }

    pub fn io(key: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            key: key.into(),
            source,
        }
    }

    pub fn lock_poisoned(message: impl Into<String>) -> Self {
        Self::LockPoisoned {
            message: message.into(),
        }
    }
}

/// A string-keyed, string-valued persistent store.
pub trait KeyValueStore: Send + Sync {
    /// Returns `Ok(None)` when nothing has been written under `key`.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
