//! Deployment error types

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CloudError {
    #[error("unknown stack '{0}'")]
    StackNotRegistered(String),

    #[error("Template serialization failed: {0}")]
    Template(String),

    #[error("Build command '{command}' failed with exit code {code}")]
    CommandExit { command: String, code: i32 },

    #[error("Artifact store error: {0}")]
    ArtifactStore(String),

    #[error("Artifact not found: {0}")]
    ArtifactNotFound(String),

    #[error("Provisioning service error: {0}")]
    Service(String),

    #[error("Change set {name} failed: {reason}")]
    ChangeSetFailed { name: String, reason: String },

    #[error("Timed out after {elapsed:?} waiting for change set {name}")]
    WaitTimeout { name: String, elapsed: Duration },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CloudError {
    /// Exit code the process should terminate with, when the failure came
    /// from a shelled build command.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            CloudError::CommandExit { code, .. } => Some(*code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;
