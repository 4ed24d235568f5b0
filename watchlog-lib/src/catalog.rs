//! The in-memory catalog mirror.
//!
//! Every mutation goes to the store first and touches the mirror only once
//! the store reported success, so a failed call leaves memory and storage
//! agreeing with each other.

use std::path::Path;

use watchlog_catalog::{Episode, Identity, Media, MediaKind, RatingOutcome, Season, ViewingStatus};
use watchlog_db::{MediaStore, SqliteStore};

use crate::error::CatalogError;
use crate::stats::CatalogStatistics;

/// All media entries, backed by a [`MediaStore`].
///
/// Single-threaded: the catalog owns its store and is not meant to be
/// shared between threads.
#[derive(Debug)]
pub struct Catalog<S: MediaStore = SqliteStore> {
    store: S,
    media: Vec<Media>,
}

impl Catalog<SqliteStore> {
    /// Open the SQLite catalog at `path`, creating it if needed.
    pub fn open_path(path: &Path) -> Result<Self, CatalogError> {
        Self::open(SqliteStore::open(path)?)
    }
}

impl<S: MediaStore> Catalog<S> {
    /// Build a catalog on top of `store`: ensure the schema, then load.
    pub fn open(mut store: S) -> Result<Self, CatalogError> {
        store.initialize_schema()?;
        let mut catalog = Self {
            store,
            media: Vec::new(),
        };
        catalog.reload()?;
        Ok(catalog)
    }

    /// Replace the mirror with the store's current contents.
    pub fn reload(&mut self) -> Result<(), CatalogError> {
        self.media = self.store.load_all()?;
        log::info!("Loaded {} catalog entries", self.media.len());
        Ok(())
    }

    /// Entries in catalog order: sorted by title at load, additions appended.
    pub fn media(&self) -> &[Media] {
        &self.media
    }

    pub fn len(&self) -> usize {
        self.media.len()
    }

    pub fn is_empty(&self) -> bool {
        self.media.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn find(&self, id: i64) -> Option<&Media> {
        self.media.iter().find(|m| m.id() == Identity::Saved(id))
    }

    /// The series with this id; `None` if absent or a movie.
    pub fn find_series(&self, id: i64) -> Option<&Media> {
        self.find(id).filter(|m| m.is_series())
    }

    /// An existing entry describing the same release as `media`.
    pub fn find_duplicate(&self, media: &Media) -> Option<&Media> {
        self.media.iter().find(|m| m.same_work(media))
    }

    /// Entries with the given status, in catalog order.
    pub fn by_status(&self, status: ViewingStatus) -> Vec<&Media> {
        self.media.iter().filter(|m| m.status() == status).collect()
    }

    pub fn statistics(&self) -> CatalogStatistics {
        CatalogStatistics::compute(&self.media)
    }

    /// Store a new entry and append it to the catalog. Returns its id.
    pub fn add(&mut self, mut media: Media) -> Result<i64, CatalogError> {
        let id = self.store.insert(&mut media)?;
        log::info!("Added {} '{}' with id {}", media.kind(), media.title(), id);
        self.media.push(media);
        Ok(id)
    }

    /// Persist the status and rating of `media` and mirror them.
    ///
    /// Only those two fields are written; other differences between `media`
    /// and the catalog entry with the same id are ignored.
    pub fn update(&mut self, media: &Media) -> Result<(), CatalogError> {
        let index = media
            .id()
            .id()
            .and_then(|id| self.position(id))
            .ok_or_else(|| CatalogError::not_found("media", media.title()))?;

        self.store.update(media)?;

        let entry = &mut self.media[index];
        entry.set_status(media.status());
        entry.set_rating(media.rating())?;
        Ok(())
    }

    /// Change status and/or rating of an entry in one step.
    ///
    /// The status is applied first, so a rating given together with
    /// [`ViewingStatus::Done`] sticks. Returns what happened to the rating,
    /// if one was given.
    pub fn set_viewing(
        &mut self,
        id: i64,
        status: Option<ViewingStatus>,
        rating: Option<f64>,
    ) -> Result<Option<RatingOutcome>, CatalogError> {
        let mut updated = self
            .find(id)
            .cloned()
            .ok_or_else(|| CatalogError::not_found("media", id))?;

        if let Some(status) = status {
            updated.set_status(status);
        }
        let outcome = rating.map(|r| updated.set_rating(r)).transpose()?;
        if let Some(RatingOutcome::ResetNotDone { requested }) = outcome {
            log::warn!(
                "'{}' is not done; rating {:.1} was reset to 0.0",
                updated.title(),
                requested
            );
        }

        self.update(&updated)?;
        Ok(outcome)
    }

    /// Delete an entry (and, for a series, all its seasons and episodes).
    pub fn remove(&mut self, id: i64, kind: MediaKind) -> Result<Media, CatalogError> {
        let index = self
            .position(id)
            .filter(|&i| self.media[i].kind() == kind)
            .ok_or_else(|| CatalogError::not_found(kind.display_name(), id))?;

        self.store.delete(id, kind)?;

        let removed = self.media.remove(index);
        log::info!("Removed {} '{}' (id {})", kind, removed.title(), id);
        Ok(removed)
    }

    /// Store a new season under an existing series. Returns the season id.
    pub fn add_season(&mut self, series_id: i64, season: Season) -> Result<i64, CatalogError> {
        let series = self
            .media
            .iter_mut()
            .find(|m| m.id() == Identity::Saved(series_id) && m.is_series())
            .ok_or_else(|| CatalogError::not_found("series", series_id))?;
        let id = self.store.insert_season(series, season)?;
        log::info!("Added season {} to '{}'", id, series.title());
        Ok(id)
    }

    /// Append an episode to an existing season of a series. Returns the episode id.
    pub fn append_episode(
        &mut self,
        series_id: i64,
        season_number: u32,
        episode: Episode,
    ) -> Result<i64, CatalogError> {
        let series = self
            .media
            .iter_mut()
            .find(|m| m.id() == Identity::Saved(series_id) && m.is_series())
            .ok_or_else(|| CatalogError::not_found("series", series_id))?;
        let number = episode.number();
        let id = self.store.append_episode(series, season_number, episode)?;
        log::info!(
            "Added S{:02}E{:02} to '{}'",
            season_number,
            number,
            series.title()
        );
        Ok(id)
    }

    /// Close the store. The catalog is consumed; nothing is valid afterwards.
    pub fn close(mut self) -> Result<(), CatalogError> {
        self.store.close()?;
        Ok(())
    }

    fn position(&self, id: i64) -> Option<usize> {
        self.media.iter().position(|m| m.id() == Identity::Saved(id))
    }
}
