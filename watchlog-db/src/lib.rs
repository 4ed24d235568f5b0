//! SQLite persistence layer for the media catalog.
//!
//! Maps the `watchlog-catalog` object graph (media → seasons → episodes)
//! onto three normalized tables and back. The [`MediaStore`] trait is the
//! seam the in-memory catalog talks to; [`SqliteStore`] is the production
//! implementation backed by rusqlite with the bundled feature.

pub mod error;
pub mod operations;
pub mod queries;
pub mod schema;
pub mod store;

pub use error::StoreError;
pub use operations::{
    InsertedIds, SeasonIds, delete_media, insert_episode, insert_media, insert_season,
    update_viewing,
};
pub use queries::{RowCounts, find_media, load_all, row_counts};
pub use schema::{create_schema, open_database, open_memory};
pub use store::{MediaStore, SqliteStore};
