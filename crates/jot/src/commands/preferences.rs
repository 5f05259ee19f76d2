use super::Command;
use super::editor::open_in_editor;
use crate::error::Error;
use eyre::Result;
use jot_core::preferences::Preferences;
use std::io::Write;

pub struct PreferencesCommand {
    pub action: PreferencesAction,
}

pub enum PreferencesAction {
    Show,
    Edit,
    Reset,
}

impl Command for PreferencesCommand {
    fn execute(&self) -> Result<()> {
        match &self.action {
            PreferencesAction::Show => self.show().map_err(Into::into),
            PreferencesAction::Edit => self.edit().map_err(Into::into),
            PreferencesAction::Reset => self.reset().map_err(Into::into),
        }
    }
}

impl PreferencesCommand {
    fn show(&self) -> std::result::Result<(), Error> {
        let prefs = Preferences::load()?;
        let path = Preferences::config_path()?;

        let mut stdout = std::io::stdout();
        writeln!(stdout, "Preferences file: {}", path.display())?;
        writeln!(stdout, "\n{}", toml::to_string_pretty(&prefs)?)?;
        Ok(())
    }

    fn edit(&self) -> std::result::Result<(), Error> {
        let path = Preferences::config_path()?;

        // Ensure the file exists
        if !path.exists() {
            Preferences::default().save()?;
        }

        open_in_editor(&path)
    }

    fn reset(&self) -> std::result::Result<(), Error> {
        let path = Preferences::config_path()?;

        let mut stdout = std::io::stdout();
        if path.exists() {
            std::fs::remove_file(&path)?;
            writeln!(stdout, "Preferences reset to defaults")?;
        } else {
            writeln!(stdout, "No preferences file found")?;
        }
        Ok(())
    }
}
