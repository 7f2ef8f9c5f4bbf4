// ABOUTME: Creates a new timestamped migration file
// ABOUTME: Optionally opens it in $EDITOR, blocking until the editor exits

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context, Result};
use chrono::Local;
use tracing::debug;
use which::which;

use crate::migrations;

/// Create an empty migration file named after the current local time.
///
/// Refuses to overwrite an existing file. No database connection is
/// needed.
pub fn create(dir: &Path, name: Option<&str>, open: bool, editor: &str) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let filename = migrations::generate_filename(Local::now().naive_local(), name);
    let path = dir.join(&filename);

    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    println!("Migration created in {}", path.display());

    if open {
        if which(editor).is_err() {
            bail!(
                "Editor '{}' not found in PATH.\n\
                 Set EDITOR to nano, vim, nvim, or code.",
                editor
            );
        }
        debug!("opening {} with {}", path.display(), editor);
        let status = Command::new(editor)
            .arg(&path)
            .status()
            .with_context(|| format!("Failed to launch editor '{}'", editor))?;
        if !status.success() {
            bail!("Editor '{}' exited with {}", editor, status);
        }
    }

    Ok(())
}
