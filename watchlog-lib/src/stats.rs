//! Collection statistics.
//!
//! Computed in one pass over the in-memory catalog. Rounding goes through
//! decimal formatting so results match round-half-even on the exact binary
//! value: the mean rating has 2 decimals, watched hours have 1.

use std::collections::BTreeMap;

use serde::Serialize;
use watchlog_catalog::{Media, MediaKind, ViewingStatus};

/// Length of the top-rated lists.
pub const TOP_N: usize = 10;

/// Movie/series split for one genre.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenreCount {
    #[serde(rename = "filmes")]
    pub movies: usize,
    pub series: usize,
}

impl GenreCount {
    pub fn total(&self) -> usize {
        self.movies + self.series
    }
}

/// Aggregates over the whole catalog.
///
/// Serializes with the report keys used by the stored catalog format
/// (`filmes`, `media_avaliacao`, `top10_series`, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogStatistics {
    pub total: usize,
    #[serde(rename = "filmes")]
    pub movies: usize,
    pub series: usize,
    /// Every status is present, zero when unused.
    pub status: BTreeMap<ViewingStatus, usize>,
    /// Mean over entries with a rating above zero; 0.0 when none.
    #[serde(rename = "media_avaliacao")]
    pub average_rating: f64,
    /// Number of ratings that went into the mean.
    #[serde(rename = "total_avaliacoes")]
    pub rated: usize,
    /// Runtime of entries marked done, in hours.
    #[serde(rename = "total_horas_assistidas")]
    pub watched_hours: f64,
    #[serde(rename = "top10_filmes")]
    pub top_movies: Vec<Media>,
    #[serde(rename = "top10_series")]
    pub top_series: Vec<Media>,
    #[serde(rename = "generos")]
    pub genres: BTreeMap<String, GenreCount>,
}

impl CatalogStatistics {
    /// Compute statistics for a collection, in collection order.
    pub fn compute(media: &[Media]) -> Self {
        let mut movies = 0;
        let mut series = 0;
        let mut status: BTreeMap<ViewingStatus, usize> =
            ViewingStatus::ALL.iter().map(|s| (*s, 0)).collect();
        let mut rating_sum = 0.0;
        let mut rated = 0;
        let mut watched_minutes: u64 = 0;
        let mut genres: BTreeMap<String, GenreCount> = BTreeMap::new();

        for m in media {
            let genre = genres.entry(m.genre().to_string()).or_default();
            match m.kind() {
                MediaKind::Movie => {
                    movies += 1;
                    genre.movies += 1;
                }
                MediaKind::Series => {
                    series += 1;
                    genre.series += 1;
                }
            }
            *status.entry(m.status()).or_insert(0) += 1;
            if m.rating() > 0.0 {
                rating_sum += m.rating();
                rated += 1;
            }
            if m.status() == ViewingStatus::Done {
                watched_minutes += m.total_minutes();
            }
        }

        let average_rating = if rated > 0 {
            round_to(rating_sum / rated as f64, 2)
        } else {
            0.0
        };

        Self {
            total: media.len(),
            movies,
            series,
            status,
            average_rating,
            rated,
            watched_hours: round_to(watched_minutes as f64 / 60.0, 1),
            top_movies: top_rated(media, MediaKind::Movie),
            top_series: top_rated(media, MediaKind::Series),
            genres,
        }
    }

    pub fn status_count(&self, status: ViewingStatus) -> usize {
        self.status.get(&status).copied().unwrap_or(0)
    }
}

/// Highest rated entries of one kind, ties kept in collection order.
fn top_rated(media: &[Media], kind: MediaKind) -> Vec<Media> {
    let mut rated: Vec<&Media> = media
        .iter()
        .filter(|m| m.kind() == kind && m.rating() > 0.0)
        .collect();
    // sort_by is stable
    rated.sort_by(|a, b| b.rating().total_cmp(&a.rating()));
    rated.into_iter().take(TOP_N).cloned().collect()
}

/// Round to `places` decimals, half to even on the exact binary value.
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}

#[cfg(test)]
#[path = "tests/stats_tests.rs"]
mod tests;
