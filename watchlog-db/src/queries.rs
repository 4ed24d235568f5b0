//! Read queries: rebuilding the object graph from rows, and row counts.

use rusqlite::{Connection, params};
use watchlog_catalog::{Episode, Media, MediaKind, Season, ViewingStatus};

use crate::error::StoreError;
use crate::operations::decode_cast;

// ── Media Loading ───────────────────────────────────────────────────────────

/// Load every media entry ordered by title, with seasons and episodes for
/// series ordered by number.
pub fn load_all(conn: &Connection) -> Result<Vec<Media>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, titulo, genero, ano, elenco, duracao, tipo, status, avaliacao
         FROM Media ORDER BY titulo, id",
    )?;
    let rows = stmt
        .query_map([], row_to_media_row)?
        .collect::<Result<Vec<_>, _>>()?;

    let mut all = Vec::with_capacity(rows.len());
    for row in rows {
        all.push(build_media(conn, row)?);
    }
    Ok(all)
}

/// Load a single media entry by id.
pub fn find_media(conn: &Connection, id: i64) -> Result<Option<Media>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, titulo, genero, ano, elenco, duracao, tipo, status, avaliacao
         FROM Media WHERE id = ?1",
    )?;
    let result = stmt.query_row(params![id], row_to_media_row);
    match result {
        Ok(row) => Ok(Some(build_media(conn, row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn load_seasons(conn: &Connection, media_id: i64) -> Result<Vec<Season>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, numero, titulo FROM Season WHERE media_id = ?1 ORDER BY numero",
    )?;
    let rows = stmt
        .query_map(params![media_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, u32>(1)?,
                row.get::<_, Option<String>>(2)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut seasons = Vec::with_capacity(rows.len());
    for (id, number, title) in rows {
        let mut season = Season::new(number, title.unwrap_or_default())?.with_id(id);
        for episode in load_episodes(conn, id)? {
            season.add_episode(episode)?;
        }
        seasons.push(season);
    }
    Ok(seasons)
}

fn load_episodes(conn: &Connection, season_id: i64) -> Result<Vec<Episode>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, numero, titulo, duracao FROM Episode WHERE season_id = ?1 ORDER BY numero",
    )?;
    let rows = stmt
        .query_map(params![season_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, u32>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, u32>(3)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(id, number, title, duration)| {
            Ok(Episode::new(number, title.unwrap_or_default(), duration)?.with_id(id))
        })
        .collect()
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Number of rows in each table.
pub fn row_counts(conn: &Connection) -> Result<RowCounts, StoreError> {
    let media: i64 = conn.query_row("SELECT COUNT(*) FROM Media", [], |r| r.get(0))?;
    let seasons: i64 = conn.query_row("SELECT COUNT(*) FROM Season", [], |r| r.get(0))?;
    let episodes: i64 = conn.query_row("SELECT COUNT(*) FROM Episode", [], |r| r.get(0))?;
    Ok(RowCounts {
        media,
        seasons,
        episodes,
    })
}

/// Row counts per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowCounts {
    pub media: i64,
    pub seasons: i64,
    pub episodes: i64,
}

// ── Row Mapping Helpers ─────────────────────────────────────────────────────

/// A raw `Media` row, before validation.
struct MediaRow {
    id: i64,
    title: String,
    genre: Option<String>,
    year: i32,
    cast: Option<String>,
    duration: Option<u32>,
    kind: String,
    status: String,
    rating: Option<f64>,
}

fn row_to_media_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MediaRow> {
    Ok(MediaRow {
        id: row.get(0)?,
        title: row.get(1)?,
        genre: row.get(2)?,
        year: row.get(3)?,
        cast: row.get(4)?,
        duration: row.get(5)?,
        kind: row.get(6)?,
        status: row.get(7)?,
        rating: row.get(8)?,
    })
}

/// Validate a raw row through the entity constructors and attach children.
fn build_media(conn: &Connection, row: MediaRow) -> Result<Media, StoreError> {
    let kind: MediaKind = row.kind.parse()?;
    let status: ViewingStatus = row.status.parse()?;
    let cast = decode_cast(row.cast.as_deref().unwrap_or_default());
    let genre = row.genre.unwrap_or_default();

    let mut media = match kind {
        MediaKind::Movie => Media::movie(
            &row.title,
            &genre,
            row.year,
            row.duration.unwrap_or(0),
            cast,
        )?,
        MediaKind::Series => {
            let mut series = Media::series(&row.title, &genre, row.year, cast)?;
            for season in load_seasons(conn, row.id)? {
                series.add_season(season)?;
            }
            series
        }
    };
    media.assign_id(row.id);
    Ok(media
        .with_status(status)
        .with_rating(row.rating.unwrap_or(0.0))?)
}
