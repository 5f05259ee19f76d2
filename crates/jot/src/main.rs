use clap::Parser;
use eyre::Result;

use jot::cli::{Cli, Commands, PreferencesCommands};
use jot::commands::Command;
use jot::commands::preferences::{PreferencesAction, PreferencesCommand};
use jot::commands::shell::ShellCommand;
use jot::commands::todo::{StorageTarget, TodoCommand};
use jot_core::preferences::Preferences;
use tracing::debug;

fn main() -> Result<()> {
    // Install color-eyre for better error reports
    color_eyre::install()?;

    // Load .env first so JOT_DATA_DIR can come from it
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing (level configured via RUST_LOG env var); an unusable
    // log directory falls back to stderr
    jot_core::utils::tracing::init_tracing()?;

    let preferences = Preferences::load().unwrap_or_default();
    let cmd = cli.command.unwrap_or(Commands::Todo(Default::default()));

    match cmd {
        Commands::Preferences { action } => {
            let cmd = PreferencesCommand {
                action: match action {
                    PreferencesCommands::Show => PreferencesAction::Show,
                    PreferencesCommands::Edit => PreferencesAction::Edit,
                    PreferencesCommands::Reset => PreferencesAction::Reset,
                },
            };
            cmd.execute()
        }
        Commands::Shell => {
            let storage =
                StorageTarget::resolve(cli.data_dir.as_deref(), cli.ephemeral, &preferences)?;
            debug!(?storage, "Starting shell");
            ShellCommand {
                storage,
                display: preferences.display,
            }
            .execute()
        }
        Commands::Todo(action) => {
            let storage =
                StorageTarget::resolve(cli.data_dir.as_deref(), cli.ephemeral, &preferences)?;
            debug!(?storage, ?action, "Running command");
            TodoCommand {
                action,
                storage,
                display: preferences.display,
            }
            .execute()
        }
    }
}
