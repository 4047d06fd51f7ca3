//! Template model error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("duplicate logical id: {0}")]
    DuplicateLogicalId(String),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TemplateError>;
