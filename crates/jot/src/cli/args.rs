use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// A small to-do list with urgent flags, kept on local disk.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, author)]
pub struct Cli {
    /// Directory holding the stored lists (defaults to the platform data directory)
    #[arg(long, env = "JOT_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Keep everything in memory; nothing is read from or written to disk
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Subcommands (defaults to `list`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum Commands {
    #[command(flatten)]
    Todo(TodoCommands),
    /// Work on the list interactively
    Shell,
    /// Manage user preferences
    Preferences {
        #[command(subcommand)]
        action: PreferencesCommands,
    },
}

/// Operations on the list. Indices are the ones shown by `list`.
#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum TodoCommands {
    /// Add an item. Without text, re-adds the item being edited (shell only)
    Add {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        content: Vec<String>,
    },
    /// Show the list
    #[command(alias = "ls")]
    List {
        /// Only show urgent items
        #[arg(long)]
        urgent: bool,
        /// Print the stored JSON instead of a listing
        #[arg(long)]
        json: bool,
    },
    /// Delete the item at INDEX
    #[command(alias = "rm")]
    Delete { index: usize },
    /// Replace the item at INDEX. Without text, opens $VISUAL/$EDITOR
    /// (in the shell, stages the text for `add` instead)
    Edit {
        index: usize,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        content: Vec<String>,
    },
    /// Toggle the urgent flag of the item at INDEX
    Urgent { index: usize },
}

impl Default for TodoCommands {
    fn default() -> Self {
        Self::List {
            urgent: false,
            json: false,
        }
    }
}

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum PreferencesCommands {
    /// Show current preferences
    Show,
    /// Edit preferences file in your editor
    Edit,
    /// Reset preferences to defaults
    Reset,
}

/// Joins positional words into one item text; `None` when no words were given.
pub fn join_words(words: &[String]) -> Option<String> {
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}
