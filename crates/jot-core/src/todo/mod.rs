use std::fmt;

use serde::{Deserialize, Serialize};

mod clock;
pub mod layout;
mod store;

pub use clock::{Clock, SystemClock};
pub use store::{HydrateOutcome, TodoStore, TodoStoreError};

/// Identifier of a to-do item: its creation time in Unix milliseconds,
/// bumped forward when needed so that no two items share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(i64);

impl TodoId {
    pub const fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl From<i64> for TodoId {
    fn from(millis: i64) -> Self {
        Self(millis)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: TodoId,
    pub content: String,
}

impl TodoItem {
    pub fn new(id: TodoId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
        }
    }
}
