//! Stored layout of the two lists.
//!
//! - `todos` → `{"todos": [{"id": 1, "content": "..."}, ...]}`
//! - `urgentTodos` → `{"urgentTodos": [{"id": 1, "content": "..."}, ...]}`

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{TodoId, TodoItem};

pub const TODOS_KEY: &str = "todos";
pub const URGENT_TODOS_KEY: &str = "urgentTodos";

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Malformed stored data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed stored data: duplicate id {0}")]
    DuplicateId(TodoId),
}

#[derive(Serialize)]
struct TodosEnvelope<'a> {
    todos: &'a [TodoItem],
}

#[derive(Deserialize)]
struct OwnedTodosEnvelope {
    todos: Vec<TodoItem>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UrgentEnvelope<'a> {
    urgent_todos: &'a [TodoItem],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OwnedUrgentEnvelope {
    urgent_todos: Vec<TodoItem>,
}

pub fn encode_todos(todos: &[TodoItem]) -> Result<String, LayoutError> {
    Ok(serde_json::to_string(&TodosEnvelope { todos })?)
}

pub fn encode_urgent(urgent: &[TodoItem]) -> Result<String, LayoutError> {
    Ok(serde_json::to_string(&UrgentEnvelope {
        urgent_todos: urgent,
    })?)
}

/// Parses the `todos` value. Duplicate ids reject the whole list.
pub fn decode_todos(raw: &str) -> Result<Vec<TodoItem>, LayoutError> {
    let envelope: OwnedTodosEnvelope = serde_json::from_str(raw)?;

    let mut seen = HashSet::with_capacity(envelope.todos.len());
    for item in &envelope.todos {
        if !seen.insert(item.id) {
            return Err(LayoutError::DuplicateId(item.id));
        }
    }

    Ok(envelope.todos)
}

/// Parses the `urgentTodos` value. Only shape is checked here; membership in
/// the main list is the store's concern.
pub fn decode_urgent(raw: &str) -> Result<Vec<TodoItem>, LayoutError> {
    let envelope: OwnedUrgentEnvelope = serde_json::from_str(raw)?;
    Ok(envelope.urgent_todos)
}
