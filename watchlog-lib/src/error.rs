use thiserror::Error;
use watchlog_catalog::ValidationError;
use watchlog_db::StoreError;

/// Errors surfaced by [`Catalog`](crate::Catalog) operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A field value was rejected; nothing was written.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The referenced media, series or season does not exist.
    #[error("{entity_type} {id} not found")]
    NotFound { entity_type: String, id: String },

    /// The store failed or is unavailable.
    #[error("{0}")]
    Store(StoreError),
}

impl CatalogError {
    pub(crate) fn not_found(entity_type: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }

    /// True when the store cannot be reached; no persistence call will succeed.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Store(e) if e.is_unavailable())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<StoreError> for CatalogError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Validation(v) => Self::Validation(v),
            StoreError::NotFound { entity_type, id } => Self::NotFound { entity_type, id },
            other => Self::Store(other),
        }
    }
}
