use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while scaffolding an application.
#[derive(Debug, Error)]
pub enum TendrilError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unknown application `{name}`: {} does not exist", .path.display())]
    UnknownApplication { name: String, path: PathBuf },

    #[error("Template not found: {id}")]
    TemplateNotFound { id: String },

    #[error("Template error: {message}")]
    Template { message: String },

    #[error("Filesystem error at {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl TendrilError {
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }
}

pub type TendrilResult<T> = Result<T, TendrilError>;
