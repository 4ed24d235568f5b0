use thiserror::Error;
use watchlog_lib::{CatalogError, ValidationError};

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Catalog operation failed
    #[error("{0}")]
    Catalog(#[from] CatalogError),

    /// Output serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Bad combination of arguments
    #[error("{0}")]
    Usage(String),
}

impl From<ValidationError> for CliError {
    fn from(e: ValidationError) -> Self {
        Self::Catalog(CatalogError::Validation(e))
    }
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }
}
