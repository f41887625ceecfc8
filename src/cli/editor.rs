//! Open a file in the user's editor and wait for it to close.

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Editor command: `$VISUAL`, then `$EDITOR`, then a platform default.
pub fn editor_command() -> String {
    pick_editor(std::env::var("VISUAL").ok(), std::env::var("EDITOR").ok())
}

fn pick_editor(visual: Option<String>, editor: Option<String>) -> String {
    visual
        .into_iter()
        .chain(editor)
        .find(|e| !e.trim().is_empty())
        .unwrap_or_else(|| {
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "vi".to_string()
            }
        })
}

/// Process that opens `path` with `editor`.
///
/// On unix the editor value goes through the shell, so it may carry arguments
/// (`code --wait`) or a quoted path with spaces. The file path is passed as a
/// positional parameter and never re-parsed.
fn editor_process(editor: &str, path: &Path) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new(editor);
        cmd.arg(path);
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.arg("-c")
            .arg(format!("{} \"$@\"", editor))
            .arg("sh")
            .arg(path);
        cmd
    }
}

/// Open `path` in the editor and block until it exits.
pub fn open_in_editor(path: &Path) -> Result<()> {
    let editor = editor_command();

    debug!("Opening {:?} with {}", path, editor);
    let status = editor_process(&editor, path)
        .status()
        .with_context(|| format!("Cannot launch editor '{}'", editor))?;

    if !status.success() {
        bail!("Editor exited with code: {:?}", status.code());
    }

    Ok(())
}
