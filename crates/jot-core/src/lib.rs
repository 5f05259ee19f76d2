// Core jot functionality without CLI dependencies

pub mod error;
pub mod preferences;
pub mod storage;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod todo;
pub mod utils;

pub use storage::{FileStorage, KeyValueStore, MemoryStorage, StorageError};
pub use todo::{HydrateOutcome, TodoId, TodoItem, TodoStore, TodoStoreError};
