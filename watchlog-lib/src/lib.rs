//! Media catalog: the in-memory collection backed by a [`MediaStore`].
//!
//! Frontends (the CLI today) talk to [`Catalog`] only. It keeps its mirror
//! of every media entry consistent with the store and computes the
//! collection statistics.

pub mod catalog;
pub mod error;
pub mod settings;
pub mod stats;

pub use catalog::Catalog;
pub use error::CatalogError;
pub use stats::{CatalogStatistics, GenreCount, TOP_N};

// Re-export the entity model and store so frontends need a single dependency.
pub use watchlog_catalog::{
    Episode, Identity, Media, MediaDetails, MediaKind, RatingOutcome, Season, ValidationError,
    ViewingStatus,
};
pub use watchlog_db::{MediaStore, SqliteStore, StoreError};
