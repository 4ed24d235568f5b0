//! Media catalog data model: movies, series, seasons and episodes.
//!
//! This crate defines the validated entity types without any database
//! dependencies. Consumers build entries here and hand them to
//! `watchlog-db` for persistence; every field check happens at
//! construction or mutation time so invalid values never reach storage.

pub mod error;
pub mod media;
pub mod types;

pub use error::ValidationError;
pub use media::{Episode, Media, MediaDetails, RatingOutcome, Season};
pub use types::*;
