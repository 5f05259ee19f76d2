//! Launching the user's editor.

use std::io::Write;
use std::path::Path;
use std::process::Command as ProcessCommand;

use shell_words::split;

use crate::error::Error;

/// The editor command line: `$VISUAL`, then `$EDITOR`, then a platform default.
pub fn configured_editor() -> String {
    std::env::var("VISUAL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(|| {
            std::env::var("EDITOR")
                .ok()
                .filter(|v| !v.trim().is_empty())
        })
        .unwrap_or_else(|| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "vi".to_string()
            }
        })
}

pub fn parse_editor_command_str(editor: &str) -> Result<(String, Vec<String>), Error> {
    let parts = split(editor).map_err(|err| {
        Error::Process(format!(
            "Failed to parse editor command '{editor}': {err}. Set $VISUAL or $EDITOR to a valid editor."
        ))
    })?;

    let Some((command, args)) = parts.split_first() else {
        return Err(Error::Process(
            "Editor command is empty. Set $VISUAL or $EDITOR to a valid editor.".to_string(),
        ));
    };

    Ok((command.to_string(), args.to_vec()))
}

/// Opens `path` in the editor and waits for it to exit successfully.
pub fn open_in_editor(path: &Path) -> Result<(), Error> {
    open_with(&configured_editor(), path)
}

/// Like [`open_in_editor`], with an explicit editor command line.
pub fn open_with(editor: &str, path: &Path) -> Result<(), Error> {
    let (editor, mut args) = parse_editor_command_str(editor)?;
    args.push(path.to_string_lossy().to_string());

    let status = ProcessCommand::new(&editor)
        .args(&args)
        .status()
        .map_err(|err| {
            Error::Process(format!(
                "Failed to launch editor '{editor}': {err}. Set $VISUAL or $EDITOR to a valid editor."
            ))
        })?;

    if !status.success() {
        return Err(Error::Process(format!(
            "Editor '{editor}' exited with status: {status}"
        )));
    }

    Ok(())
}

/// Lets the user edit `initial` in a scratch file using `editor`, and
/// returns the result minus the trailing newline most editors add.
pub fn edit_text(editor: &str, initial: &str) -> Result<String, Error> {
    let mut scratch = tempfile::Builder::new()
        .prefix("jot-edit-")
        .suffix(".txt")
        .tempfile()?;
    scratch.write_all(initial.as_bytes())?;
    scratch.flush()?;

    open_with(editor, scratch.path())?;

    let edited = std::fs::read_to_string(scratch.path())?;
    Ok(edited.trim_end_matches(['\n', '\r']).to_string())
}
