use jot_core::todo::TodoStoreError;
use jot_core::todo::layout::LayoutError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize preferences: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("Process execution failed: {0}")]
    Process(String),

    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Store(#[from] TodoStoreError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Core(#[from] jot_core::error::Error),
}
