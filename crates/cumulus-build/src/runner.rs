//! Shell command runner for pre-deploy build steps
//!
//! Commands run through the shell in a given working directory with
//! stdout/stderr inherited, so build output reaches the operator
//! directly. The first non-zero exit stops the sequence and surfaces
//! the child's exit code.

use crate::error::{BuildError, Result};
use std::path::Path;
use tokio::process::Command;

/// Run `commands` in order inside `dir`, stopping at the first failure.
pub async fn run_commands(dir: &Path, commands: &[&str]) -> Result<()> {
    for command in commands {
        run_command(dir, command).await?;
    }
    Ok(())
}

/// Run one shell command inside `dir`.
pub async fn run_command(dir: &Path, command: &str) -> Result<()> {
    tracing::info!(dir = %dir.display(), %command, "running build command");

    let status = Command::new("sh")
        .arg("-c")
        .arg(command)
        .current_dir(dir)
        .status()
        .await?;

    if status.success() {
        return Ok(());
    }

    match status.code() {
        Some(code) => Err(BuildError::CommandFailed {
            command: command.to_string(),
            code,
        }),
        None => Err(BuildError::CommandKilled {
            command: command.to_string(),
        }),
    }
}
