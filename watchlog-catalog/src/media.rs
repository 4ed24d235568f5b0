//! Movies, series, seasons and episodes.
//!
//! A [`Media`] is a tagged variant over movie and series data. Series own
//! their seasons, seasons own their episodes; children never point back at
//! their parent in memory. All constructors validate their inputs and every
//! mutator keeps the invariants below:
//!
//! - titles are trimmed and non-empty,
//! - numbers and durations are strictly positive,
//! - season numbers are unique within a series and kept in ascending order,
//! - episode numbers are unique within a season and kept in ascending order,
//! - the rating lies in `[0.0, 10.0]` and is `0.0` unless the status is
//!   [`ViewingStatus::Done`].

use chrono::Datelike;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::error::ValidationError;
use crate::types::{Identity, MediaKind, ViewingStatus};

/// First year a release may carry.
pub const EARLIEST_YEAR: i32 = 1888;

/// How many years past the current one a release year may lie.
pub const YEAR_LOOKAHEAD: i32 = 5;

pub const MAX_RATING: f64 = 10.0;

/// Latest release year accepted right now.
pub fn latest_year() -> i32 {
    chrono::Local::now().year() + YEAR_LOOKAHEAD
}

fn clean_title(title: &str) -> Result<String, ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}

fn check_positive(field: &'static str, value: u32) -> Result<u32, ValidationError> {
    if value == 0 {
        return Err(ValidationError::not_positive(field, value));
    }
    Ok(value)
}

fn check_year(year: i32) -> Result<i32, ValidationError> {
    let max = latest_year();
    if !(EARLIEST_YEAR..=max).contains(&year) {
        return Err(ValidationError::YearOutOfRange {
            year,
            min: EARLIEST_YEAR,
            max,
        });
    }
    Ok(year)
}

fn clean_cast(cast: Vec<String>) -> Vec<String> {
    cast.into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

// ── Episode ─────────────────────────────────────────────────────────────────

/// The smallest unit of a series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Episode {
    id: Identity,
    number: u32,
    title: String,
    duration_minutes: u32,
}

impl Episode {
    /// Build an unsaved episode. The title may be empty.
    pub fn new(
        number: u32,
        title: impl Into<String>,
        duration_minutes: u32,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: Identity::Unsaved,
            number: check_positive("Episode number", number)?,
            title: title.into().trim().to_string(),
            duration_minutes: check_positive("Episode duration", duration_minutes)?,
        })
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Identity::Saved(id);
        self
    }

    /// Record the identity assigned by the store.
    pub fn assign_id(&mut self, id: i64) {
        self.id = Identity::Saved(id);
    }

    pub fn id(&self) -> Identity {
        self.id
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }
}

impl std::fmt::Display for Episode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "E{} - {} ({} min)",
            self.number, self.title, self.duration_minutes
        )
    }
}

// ── Season ──────────────────────────────────────────────────────────────────

/// An ordered group of episodes inside one series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Season {
    id: Identity,
    number: u32,
    title: String,
    episodes: Vec<Episode>,
}

impl Season {
    /// Build an empty, unsaved season. The title may be empty.
    pub fn new(number: u32, title: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            id: Identity::Unsaved,
            number: check_positive("Season number", number)?,
            title: title.into().trim().to_string(),
            episodes: Vec::new(),
        })
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Identity::Saved(id);
        self
    }

    /// Record the identity assigned by the store.
    pub fn assign_id(&mut self, id: i64) {
        self.id = Identity::Saved(id);
    }

    /// Insert an episode at its ordered position.
    ///
    /// Fails with [`ValidationError::DuplicateEpisode`] if the number is taken.
    pub fn add_episode(&mut self, episode: Episode) -> Result<(), ValidationError> {
        match self
            .episodes
            .binary_search_by_key(&episode.number, Episode::number)
        {
            Ok(_) => Err(ValidationError::DuplicateEpisode(episode.number)),
            Err(pos) => {
                self.episodes.insert(pos, episode);
                Ok(())
            }
        }
    }

    pub fn has_episode(&self, number: u32) -> bool {
        self.episodes
            .binary_search_by_key(&number, Episode::number)
            .is_ok()
    }

    pub fn id(&self) -> Identity {
        self.id
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    /// Mutable access for identity write-back. Episode numbers cannot be
    /// changed through this, so ordering is preserved.
    pub fn episodes_mut(&mut self) -> std::slice::IterMut<'_, Episode> {
        self.episodes.iter_mut()
    }

    pub fn episode_count(&self) -> usize {
        self.episodes.len()
    }

    pub fn total_minutes(&self) -> u64 {
        self.episodes
            .iter()
            .map(|e| u64::from(e.duration_minutes))
            .sum()
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Season {}", self.number)?;
        if !self.title.is_empty() {
            write!(f, ": {}", self.title)?;
        }
        write!(f, " ({} episodes)", self.episodes.len())
    }
}

// ── Media ───────────────────────────────────────────────────────────────────

/// Kind-specific data of a catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaDetails {
    Movie { duration_minutes: u32 },
    Series { seasons: Vec<Season> },
}

/// What happened to a requested rating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RatingOutcome {
    /// The (clamped) value was stored.
    Applied(f64),
    /// The entry is not done, so the rating was forced to 0.0.
    ResetNotDone { requested: f64 },
}

/// A movie or series in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Media {
    id: Identity,
    title: String,
    genre: String,
    year: i32,
    cast: Vec<String>,
    status: ViewingStatus,
    rating: f64,
    details: MediaDetails,
}

impl Media {
    /// Build an unsaved, pending movie.
    pub fn movie(
        title: &str,
        genre: &str,
        year: i32,
        duration_minutes: u32,
        cast: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let duration_minutes = check_positive("Movie duration", duration_minutes)?;
        Self::build(
            title,
            genre,
            year,
            cast,
            MediaDetails::Movie { duration_minutes },
        )
    }

    /// Build an unsaved, pending series with no seasons.
    pub fn series(
        title: &str,
        genre: &str,
        year: i32,
        cast: Vec<String>,
    ) -> Result<Self, ValidationError> {
        Self::build(
            title,
            genre,
            year,
            cast,
            MediaDetails::Series {
                seasons: Vec::new(),
            },
        )
    }

    fn build(
        title: &str,
        genre: &str,
        year: i32,
        cast: Vec<String>,
        details: MediaDetails,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: Identity::Unsaved,
            title: clean_title(title)?,
            genre: genre.trim().to_string(),
            year: check_year(year)?,
            cast: clean_cast(cast),
            status: ViewingStatus::Pending,
            rating: 0.0,
            details,
        })
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Identity::Saved(id);
        self
    }

    pub fn with_status(mut self, status: ViewingStatus) -> Self {
        self.set_status(status);
        self
    }

    /// Set the initial rating. Unlike [`Media::set_rating`] this rejects
    /// out-of-range values instead of clamping them. The reset-to-zero rule
    /// for entries that are not done still applies.
    pub fn with_rating(mut self, rating: f64) -> Result<Self, ValidationError> {
        if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
            return Err(ValidationError::InvalidRating(rating));
        }
        self.rating = if self.status == ViewingStatus::Done {
            rating
        } else {
            0.0
        };
        Ok(self)
    }

    /// Record the identity assigned by the store.
    pub fn assign_id(&mut self, id: i64) {
        self.id = Identity::Saved(id);
    }

    /// Change the viewing status. Leaving [`ViewingStatus::Done`] drops the rating.
    pub fn set_status(&mut self, status: ViewingStatus) {
        self.status = status;
        if status != ViewingStatus::Done {
            self.rating = 0.0;
        }
    }

    /// Change the rating, clamping it into `[0.0, 10.0]`.
    ///
    /// A rating only sticks once the entry is done; otherwise the stored
    /// rating becomes 0.0 and [`RatingOutcome::ResetNotDone`] is returned.
    pub fn set_rating(&mut self, rating: f64) -> Result<RatingOutcome, ValidationError> {
        if !rating.is_finite() {
            return Err(ValidationError::InvalidRating(rating));
        }
        let clamped = rating.clamp(0.0, MAX_RATING);
        if self.status != ViewingStatus::Done {
            self.rating = 0.0;
            return Ok(RatingOutcome::ResetNotDone { requested: clamped });
        }
        self.rating = clamped;
        Ok(RatingOutcome::Applied(clamped))
    }

    /// Add a season at its ordered position.
    pub fn add_season(&mut self, season: Season) -> Result<(), ValidationError> {
        let MediaDetails::Series { seasons } = &mut self.details else {
            return Err(ValidationError::NotASeries(self.title.clone()));
        };
        match seasons.binary_search_by_key(&season.number, Season::number) {
            Ok(_) => Err(ValidationError::DuplicateSeason(season.number)),
            Err(pos) => {
                seasons.insert(pos, season);
                Ok(())
            }
        }
    }

    pub fn id(&self) -> Identity {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn cast(&self) -> &[String] {
        &self.cast
    }

    pub fn status(&self) -> ViewingStatus {
        self.status
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn details(&self) -> &MediaDetails {
        &self.details
    }

    pub fn kind(&self) -> MediaKind {
        match self.details {
            MediaDetails::Movie { .. } => MediaKind::Movie,
            MediaDetails::Series { .. } => MediaKind::Series,
        }
    }

    pub fn is_series(&self) -> bool {
        self.kind() == MediaKind::Series
    }

    /// Movie runtime; `None` for a series.
    pub fn duration_minutes(&self) -> Option<u32> {
        match self.details {
            MediaDetails::Movie { duration_minutes } => Some(duration_minutes),
            MediaDetails::Series { .. } => None,
        }
    }

    /// Seasons in ascending order; empty for a movie.
    pub fn seasons(&self) -> &[Season] {
        match &self.details {
            MediaDetails::Series { seasons } => seasons,
            MediaDetails::Movie { .. } => &[],
        }
    }

    pub fn seasons_mut(&mut self) -> std::slice::IterMut<'_, Season> {
        match &mut self.details {
            MediaDetails::Series { seasons } => seasons.iter_mut(),
            MediaDetails::Movie { .. } => Default::default(),
        }
    }

    pub fn season(&self, number: u32) -> Option<&Season> {
        self.seasons().iter().find(|s| s.number == number)
    }

    pub fn season_mut(&mut self, number: u32) -> Option<&mut Season> {
        self.seasons_mut().find(|s| s.number == number)
    }

    /// Runtime in minutes: the movie duration, or every episode of a series.
    pub fn total_minutes(&self) -> u64 {
        match &self.details {
            MediaDetails::Movie { duration_minutes } => u64::from(*duration_minutes),
            MediaDetails::Series { seasons } => seasons.iter().map(Season::total_minutes).sum(),
        }
    }

    pub fn episode_count(&self) -> usize {
        self.seasons().iter().map(Season::episode_count).sum()
    }

    /// True when both entries describe the same release (title, kind and year).
    pub fn same_work(&self, other: &Media) -> bool {
        self.title == other.title && self.kind() == other.kind() && self.year == other.year
    }
}

impl std::fmt::Display for Media {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} ({}) - Status: {}",
            self.kind(),
            self.title,
            self.year,
            self.status
        )
    }
}

impl Serialize for Media {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Media", 9)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("title", &self.title)?;
        state.serialize_field("genre", &self.genre)?;
        state.serialize_field("year", &self.year)?;
        state.serialize_field("cast", &self.cast)?;
        state.serialize_field("kind", &self.kind())?;
        state.serialize_field("status", &self.status)?;
        state.serialize_field("rating", &self.rating)?;
        match &self.details {
            MediaDetails::Movie { duration_minutes } => {
                state.serialize_field("duration_minutes", duration_minutes)?;
            }
            MediaDetails::Series { seasons } => {
                state.serialize_field("seasons", seasons)?;
            }
        }
        state.end()
    }
}

#[cfg(test)]
#[path = "tests/media_tests.rs"]
mod tests;
