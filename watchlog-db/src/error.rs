use thiserror::Error;
use watchlog_catalog::{MediaKind, ValidationError};

/// Errors raised by the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The connection could not be opened, or was already closed.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound { entity_type: String, id: String },

    /// The entity already carries a stored identity.
    #[error("'{0}' is already stored")]
    AlreadyPersisted(String),

    #[error("Media {id} is a {actual}, not a {expected}")]
    KindMismatch {
        id: i64,
        expected: MediaKind,
        actual: MediaKind,
    },

    /// A stored row (or a requested change) violates an entity invariant.
    #[error("Invalid entity: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to encode cast list: {0}")]
    Cast(#[from] serde_json::Error),
}

impl StoreError {
    pub fn not_found(entity_type: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
