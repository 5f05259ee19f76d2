use std::io::{BufRead, IsTerminal, Write};

use clap::{Parser, Subcommand};
use eyre::Result;
use jot_core::preferences::DisplayPreferences;

use super::Command;
use super::todo::{EditMode, StorageTarget, TodoSession};
use crate::cli::args::TodoCommands;
use crate::error::Error;

const PROMPT: &str = "jot> ";

#[derive(Parser, Debug)]
#[command(no_binary_name = true, name = "jot", disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommands,
}

#[derive(Subcommand, Debug)]
enum ShellCommands {
    #[command(flatten)]
    Todo(TodoCommands),
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

/// Interactive session over one store, so an `edit` can be followed by an
/// `add` that puts the staged text back.
pub struct ShellCommand {
    pub storage: StorageTarget,
    pub display: DisplayPreferences,
}

impl Command for ShellCommand {
    fn execute(&self) -> Result<()> {
        let stdout = std::io::stdout();
        let color = stdout.is_terminal();
        let mut session = TodoSession::open(&self.storage, self.display.clone(), color);

        let stdin = std::io::stdin();
        run_shell(&mut session, stdin.lock(), &mut stdout.lock()).map_err(Into::into)
    }
}

pub fn run_shell(
    session: &mut TodoSession,
    mut input: impl BufRead,
    out: &mut dyn Write,
) -> std::result::Result<(), Error> {
    let mut line = String::new();

    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        let words = match shell_words::split(line.trim()) {
            Ok(words) if words.is_empty() => continue,
            Ok(words) => words,
            Err(e) => {
                writeln!(out, "error: {e}")?;
                continue;
            }
        };

        let command = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                write!(out, "{}", e.render())?;
                continue;
            }
        };

        match command {
            ShellCommands::Quit => break,
            ShellCommands::Todo(action) => {
                if let Err(e) = session.handle(&action, EditMode::Stage, out) {
                    writeln!(out, "error: {e}")?;
                }
            }
        }
    }

    if let Some(abandoned) = session.store_mut().take_pending_edit() {
        writeln!(out, "Discarded unfinished edit: {abandoned}")?;
    }
    Ok(())
}
