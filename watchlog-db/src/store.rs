//! The store handle the catalog is built on.

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use watchlog_catalog::{Episode, Media, MediaKind, Season, ValidationError};

use crate::error::StoreError;
use crate::operations::{self, InsertedIds, SeasonIds};
use crate::{queries, schema};

/// Durable storage for media entries.
///
/// Implementors provide the row-level primitives; the provided methods do
/// the in-memory checks and write generated identities back into the
/// entities only after the primitive succeeded, so a failed write leaves the
/// entities untouched.
pub trait MediaStore {
    /// Create the tables if they don't exist. Idempotent.
    fn initialize_schema(&mut self) -> Result<(), StoreError>;

    /// Every stored entry, sorted by title, with children in number order.
    fn load_all(&self) -> Result<Vec<Media>, StoreError>;

    /// Write the media row and, for a series, every season and episode row
    /// as one unit.
    fn insert_rows(&mut self, media: &Media) -> Result<InsertedIds, StoreError>;

    /// Write a season row and its episode rows under a stored series.
    fn insert_season_rows(&mut self, media_id: i64, season: &Season)
    -> Result<SeasonIds, StoreError>;

    /// Write one episode row under a stored season.
    fn insert_episode_row(&mut self, season_id: i64, episode: &Episode)
    -> Result<i64, StoreError>;

    /// Persist the status and rating of a stored media entry.
    fn update(&mut self, media: &Media) -> Result<(), StoreError>;

    /// Delete a media entry, children first for a series.
    fn delete(&mut self, media_id: i64, kind: MediaKind) -> Result<(), StoreError>;

    /// Release the connection. Every later call fails with
    /// [`StoreError::Unavailable`].
    fn close(&mut self) -> Result<(), StoreError>;

    /// Insert a new media entry and assign its identities.
    fn insert(&mut self, media: &mut Media) -> Result<i64, StoreError> {
        if media.id().is_saved() {
            return Err(StoreError::AlreadyPersisted(media.title().to_string()));
        }
        let ids = self.insert_rows(media)?;
        ids.apply(media);
        Ok(ids.media)
    }

    /// Add a new season (with any episodes it already holds) to a stored series.
    fn insert_season(&mut self, series: &mut Media, mut season: Season) -> Result<i64, StoreError> {
        let series_id = stored_series_id(series)?;
        if series.season(season.number()).is_some() {
            return Err(ValidationError::DuplicateSeason(season.number()).into());
        }
        let ids = self.insert_season_rows(series_id, &season)?;
        ids.apply(&mut season);
        series.add_season(season)?;
        Ok(ids.season)
    }

    /// Append an episode to an existing season of a stored series.
    ///
    /// Fails with [`StoreError::NotFound`] when the series is not stored or
    /// has no season with that number; nothing is written in that case.
    fn append_episode(
        &mut self,
        series: &mut Media,
        season_number: u32,
        episode: Episode,
    ) -> Result<i64, StoreError> {
        let series_id = stored_series_id(series)?;
        let season = series.season_mut(season_number).ok_or_else(|| {
            StoreError::not_found("season", format!("{season_number} of series {series_id}"))
        })?;
        if season.has_episode(episode.number()) {
            return Err(ValidationError::DuplicateEpisode(episode.number()).into());
        }
        let season_id = season.id().id().ok_or_else(|| {
            StoreError::not_found("season", format!("{season_number} of series {series_id}"))
        })?;
        let id = self.insert_episode_row(season_id, &episode)?;
        season.add_episode(episode.with_id(id))?;
        Ok(id)
    }
}

fn stored_series_id(series: &Media) -> Result<i64, StoreError> {
    let id = series
        .id()
        .id()
        .ok_or_else(|| StoreError::not_found("series", series.title()))?;
    if !series.is_series() {
        return Err(StoreError::KindMismatch {
            id,
            expected: MediaKind::Series,
            actual: series.kind(),
        });
    }
    Ok(id)
}

// ── SQLite Store ────────────────────────────────────────────────────────────

/// [`MediaStore`] backed by a single SQLite connection.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Option<Connection>,
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Open (or create) the database file and make sure the schema exists.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = schema::open_database(path)?;
        log::debug!("Opened catalog database at {}", path.display());
        Ok(Self {
            conn: Some(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database with the full schema. Useful for testing.
    pub fn open_memory() -> Result<Self, StoreError> {
        Ok(Self {
            conn: Some(schema::open_memory()?),
            path: None,
        })
    }

    /// The live connection, or [`StoreError::Unavailable`] once closed.
    pub fn connection(&self) -> Result<&Connection, StoreError> {
        self.conn
            .as_ref()
            .ok_or_else(|| StoreError::unavailable("the catalog database is closed"))
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Database file path; `None` for an in-memory store.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn row_counts(&self) -> Result<queries::RowCounts, StoreError> {
        queries::row_counts(self.connection()?)
    }
}

impl MediaStore for SqliteStore {
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        schema::create_schema(self.connection()?)
    }

    fn load_all(&self) -> Result<Vec<Media>, StoreError> {
        queries::load_all(self.connection()?)
    }

    fn insert_rows(&mut self, media: &Media) -> Result<InsertedIds, StoreError> {
        operations::insert_media(self.connection()?, media)
    }

    fn insert_season_rows(
        &mut self,
        media_id: i64,
        season: &Season,
    ) -> Result<SeasonIds, StoreError> {
        operations::insert_season(self.connection()?, media_id, season)
    }

    fn insert_episode_row(&mut self, season_id: i64, episode: &Episode) -> Result<i64, StoreError> {
        operations::insert_episode(self.connection()?, season_id, episode)
    }

    fn update(&mut self, media: &Media) -> Result<(), StoreError> {
        operations::update_viewing(self.connection()?, media)
    }

    fn delete(&mut self, media_id: i64, kind: MediaKind) -> Result<(), StoreError> {
        operations::delete_media(self.connection()?, media_id, kind)
    }

    fn close(&mut self) -> Result<(), StoreError> {
        let conn = self
            .conn
            .take()
            .ok_or_else(|| StoreError::unavailable("the catalog database is already closed"))?;
        conn.close().map_err(|(_, e)| StoreError::Sqlite(e))?;
        log::debug!("Closed catalog database");
        Ok(())
    }
}
