use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use colored::Colorize;
use eyre::Result;
use jot_core::preferences::{DisplayPreferences, Preferences};
use jot_core::storage::{FileStorage, KeyValueStore, MemoryStorage};
use jot_core::todo::layout;
use jot_core::todo::{TodoItem, TodoStore};
use jot_core::utils::paths::AppPaths;
use tracing::warn;

use super::Command;
use super::editor;
use crate::cli::args::{TodoCommands, join_words};
use crate::error::Error;

/// Where the lists are read from and written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageTarget {
    Ephemeral,
    Directory(PathBuf),
}

impl StorageTarget {
    pub fn resolve(
        data_dir: Option<&Path>,
        ephemeral: bool,
        prefs: &Preferences,
    ) -> std::result::Result<Self, Error> {
        if ephemeral {
            return Ok(Self::Ephemeral);
        }
        Ok(Self::Directory(AppPaths::resolve_todo_dir(data_dir, prefs)?))
    }

    /// Never fails: an unusable directory still yields a backend, whose
    /// reads and writes then report the storage as unavailable.
    pub fn open(&self) -> Arc<dyn KeyValueStore> {
        match self {
            Self::Ephemeral => Arc::new(MemoryStorage::new()),
            Self::Directory(dir) => match FileStorage::open(dir) {
                Ok(storage) => Arc::new(storage),
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "Storage directory unusable; changes will not be saved");
                    Arc::new(FileStorage::new(dir.clone()))
                }
            },
        }
    }
}

/// What `edit` does when no replacement text is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// Open the user's editor on the staged text.
    Editor,
    /// Leave the text staged for a later `add`.
    Stage,
}

/// The list surface: applies [`TodoCommands`] to a store and renders results.
pub struct TodoSession {
    store: TodoStore,
    display: DisplayPreferences,
    color: bool,
    // Falls back to $VISUAL/$EDITOR when unset.
    editor: Option<String>,
}

impl TodoSession {
    pub fn new(store: TodoStore, display: DisplayPreferences, color: bool) -> Self {
        Self {
            store,
            display,
            color,
            editor: None,
        }
    }

    /// Uses `editor` (a shell-style command line) instead of the environment.
    pub fn with_editor(mut self, editor: impl Into<String>) -> Self {
        self.editor = Some(editor.into());
        self
    }

    pub fn open(target: &StorageTarget, display: DisplayPreferences, color: bool) -> Self {
        Self::new(TodoStore::open(target.open()), display, color)
    }

    pub fn store(&self) -> &TodoStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TodoStore {
        &mut self.store
    }

    pub fn handle(
        &mut self,
        action: &TodoCommands,
        mode: EditMode,
        out: &mut dyn Write,
    ) -> std::result::Result<(), Error> {
        match action {
            TodoCommands::Add { content } => {
                let item = match join_words(content) {
                    Some(text) => self.store.add(text),
                    None => self.store.resubmit_pending_edit().ok_or_else(|| {
                        Error::Usage("Nothing to add: give the item text".to_string())
                    })?,
                };
                self.report("Added", &item, out)?;
            }
            TodoCommands::List { urgent, json } => {
                if *json {
                    self.write_json(*urgent, out)?;
                } else {
                    self.write_list(*urgent, out)?;
                }
            }
            TodoCommands::Delete { index } => {
                let removed = self.store.delete(*index)?;
                writeln!(out, "Deleted: {}", removed.content)?;
            }
            TodoCommands::Edit { index, content } => {
                self.edit(*index, join_words(content), mode, out)?;
            }
            TodoCommands::Urgent { index } => {
                let now_urgent = self.store.toggle_urgent(*index)?;
                let content = self
                    .store
                    .get(*index)
                    .map(|item| item.content.as_str())
                    .unwrap_or_default();
                if now_urgent {
                    writeln!(out, "Marked urgent: {content}")?;
                } else {
                    writeln!(out, "No longer urgent: {content}")?;
                }
            }
        }
        Ok(())
    }

    fn edit(
        &mut self,
        index: usize,
        replacement: Option<String>,
        mode: EditMode,
        out: &mut dyn Write,
    ) -> std::result::Result<(), Error> {
        let staged = self.store.begin_edit(index)?;

        let text = match (replacement, mode) {
            (Some(text), _) => text,
            (None, EditMode::Stage) => {
                writeln!(out, "Editing: {staged}")?;
                writeln!(out, "Run `add` to put it back, or `add <text>` to replace it.")?;
                return Ok(());
            }
            (None, EditMode::Editor) => {
                let command = self
                    .editor
                    .clone()
                    .unwrap_or_else(editor::configured_editor);
                match editor::edit_text(&command, &staged) {
                    Ok(text) => text,
                    Err(e) => {
                        writeln!(out, "Edit aborted; the removed item was: {staged}")?;
                        return Err(e);
                    }
                }
            }
        };

        let item = self.store.add(text);
        self.report("Updated", &item, out)?;
        Ok(())
    }

    fn report(&self, verb: &str, item: &TodoItem, out: &mut dyn Write) -> std::io::Result<()> {
        let index = self.store.len().saturating_sub(1);
        writeln!(out, "{verb} [{index}] {}", item.content)
    }

    fn write_json(&self, urgent_only: bool, out: &mut dyn Write) -> std::result::Result<(), Error> {
        let raw = if urgent_only {
            let urgent: Vec<TodoItem> = self.store.urgent_items().into_iter().cloned().collect();
            layout::encode_urgent(&urgent)?
        } else {
            layout::encode_todos(self.store.items())?
        };
        writeln!(out, "{raw}")?;
        Ok(())
    }

    fn write_list(&self, urgent_only: bool, out: &mut dyn Write) -> std::result::Result<(), Error> {
        if self.store.is_empty() {
            writeln!(out, "Nothing to do. Add an item with `jot add <text>`.")?;
            return Ok(());
        }

        for (index, item) in self.store.items().iter().enumerate() {
            let urgent = self.store.is_urgent(index)?;
            if urgent_only && !urgent {
                continue;
            }
            writeln!(out, "{}", self.render_line(index, item, urgent))?;
        }
        Ok(())
    }

    fn render_line(&self, index: usize, item: &TodoItem, urgent: bool) -> String {
        let marker_width = self.display.urgent_marker.chars().count();
        let marker = if urgent {
            self.display.urgent_marker.clone()
        } else {
            " ".repeat(marker_width)
        };

        let mut line = format!("{index:>3} {marker} {}", item.content);
        if self.display.show_ids {
            line.push_str(&format!(" ({})", item.id));
        }

        if urgent && self.color {
            line.as_str().yellow().bold().to_string()
        } else {
            line
        }
    }
}

/// One list operation against the configured storage.
pub struct TodoCommand {
    pub action: TodoCommands,
    pub storage: StorageTarget,
    pub display: DisplayPreferences,
}

impl Command for TodoCommand {
    fn execute(&self) -> Result<()> {
        let mut stdout = std::io::stdout();
        let color = stdout.is_terminal();
        let mut session = TodoSession::open(&self.storage, self.display.clone(), color);
        session
            .handle(&self.action, EditMode::Editor, &mut stdout)
            .map_err(Into::into)
    }
}
