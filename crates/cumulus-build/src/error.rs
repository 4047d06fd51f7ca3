use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("command '{command}' exited with code {code}")]
    CommandFailed { command: String, code: i32 },

    #[error("command '{command}' was terminated by a signal")]
    CommandKilled { command: String },

    #[error("artifact not found: {0}")]
    ArtifactNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BuildError>;
