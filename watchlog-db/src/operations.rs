//! Write operations: inserts, viewing updates and cascading deletes.
//!
//! Every function commits before returning. Multi-row writes run inside a
//! single transaction and hand back the generated ids instead of touching
//! the entities, so callers only write identities back once the commit
//! succeeded.

use rusqlite::{Connection, params};
use watchlog_catalog::{Episode, Media, MediaKind, Season};

use crate::error::StoreError;

/// Ids generated for one season row and its episode rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonIds {
    pub season: i64,
    /// In the season's episode order.
    pub episodes: Vec<i64>,
}

/// Ids generated by [`insert_media`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertedIds {
    pub media: i64,
    /// In the series' season order; empty for a movie.
    pub seasons: Vec<SeasonIds>,
}

impl SeasonIds {
    /// Write the ids back into the season they were generated for.
    pub fn apply(&self, season: &mut Season) {
        season.assign_id(self.season);
        for (episode, id) in season.episodes_mut().zip(&self.episodes) {
            episode.assign_id(*id);
        }
    }
}

impl InsertedIds {
    /// Write the ids back into the media they were generated for.
    pub fn apply(&self, media: &mut Media) {
        media.assign_id(self.media);
        for (season, ids) in media.seasons_mut().zip(&self.seasons) {
            ids.apply(season);
        }
    }
}

// ── Cast Encoding ───────────────────────────────────────────────────────────

/// Encode a cast list as a JSON array so names may contain commas.
pub fn encode_cast(cast: &[String]) -> Result<String, StoreError> {
    Ok(serde_json::to_string(cast)?)
}

/// Decode a stored cast list.
///
/// Accepts the JSON array form and the legacy comma-joined form.
pub fn decode_cast(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') {
        if let Ok(names) = serde_json::from_str::<Vec<String>>(trimmed) {
            return names;
        }
        log::warn!("Cast column is not a JSON array, reading as comma list: {trimmed}");
    }
    trimmed
        .split(',')
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

// ── Media Operations ────────────────────────────────────────────────────────

/// Insert a movie row, or a series row plus all of its seasons and episodes.
///
/// All rows are written in one transaction. The media is not modified; call
/// [`InsertedIds::apply`] afterwards.
pub fn insert_media(conn: &Connection, media: &Media) -> Result<InsertedIds, StoreError> {
    if media.id().is_saved() {
        return Err(StoreError::AlreadyPersisted(media.title().to_string()));
    }

    let tx = conn.unchecked_transaction()?;

    tx.execute(
        "INSERT INTO Media (titulo, genero, ano, elenco, duracao, tipo, status, avaliacao)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            media.title(),
            media.genre(),
            media.year(),
            encode_cast(media.cast())?,
            media.duration_minutes(),
            media.kind().as_str(),
            media.status().as_str(),
            media.rating(),
        ],
    )?;
    let media_id = tx.last_insert_rowid();

    let mut seasons = Vec::with_capacity(media.seasons().len());
    for season in media.seasons() {
        seasons.push(insert_season_rows(&tx, media_id, season)?);
    }

    tx.commit()?;

    log::debug!(
        "Inserted {} '{}' as id {} ({} seasons)",
        media.kind(),
        media.title(),
        media_id,
        seasons.len()
    );

    Ok(InsertedIds {
        media: media_id,
        seasons,
    })
}

/// Update the viewing status and rating of a stored media row.
///
/// Seasons and episodes are never rewritten here.
pub fn update_viewing(conn: &Connection, media: &Media) -> Result<(), StoreError> {
    let id = media
        .id()
        .id()
        .ok_or_else(|| StoreError::not_found("media", media.title()))?;
    let changed = conn.execute(
        "UPDATE Media SET status = ?2, avaliacao = ?3 WHERE id = ?1",
        params![id, media.status().as_str(), media.rating()],
    )?;
    if changed == 0 {
        return Err(StoreError::not_found("media", id));
    }
    log::debug!(
        "Updated media {}: status={}, rating={:.1}",
        id,
        media.status().as_str(),
        media.rating()
    );
    Ok(())
}

/// Delete a media row. For a series, episodes go first, then seasons, then
/// the media row, so foreign keys are never left dangling.
pub fn delete_media(conn: &Connection, media_id: i64, kind: MediaKind) -> Result<(), StoreError> {
    let result = conn.query_row(
        "SELECT tipo FROM Media WHERE id = ?1",
        params![media_id],
        |row| row.get::<_, String>(0),
    );
    let stored = match result {
        Ok(tipo) => tipo,
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            return Err(StoreError::not_found("media", media_id));
        }
        Err(e) => return Err(e.into()),
    };
    let actual: MediaKind = stored.parse()?;
    if actual != kind {
        return Err(StoreError::KindMismatch {
            id: media_id,
            expected: kind,
            actual,
        });
    }

    let tx = conn.unchecked_transaction()?;

    if kind == MediaKind::Series {
        let season_ids: Vec<i64> = {
            let mut stmt = tx.prepare("SELECT id FROM Season WHERE media_id = ?1")?;
            let rows = stmt.query_map(params![media_id], |row| row.get(0))?;
            let ids = rows.collect::<Result<Vec<_>, _>>()?;
            ids
        };
        for season_id in &season_ids {
            tx.execute(
                "DELETE FROM Episode WHERE season_id = ?1",
                params![season_id],
            )?;
        }
        tx.execute("DELETE FROM Season WHERE media_id = ?1", params![media_id])?;
    }
    tx.execute("DELETE FROM Media WHERE id = ?1", params![media_id])?;

    tx.commit()?;

    log::debug!("Deleted {} {}", kind, media_id);
    Ok(())
}

// ── Season / Episode Operations ─────────────────────────────────────────────

/// Insert a season and its episodes for an existing series row.
pub fn insert_season(
    conn: &Connection,
    media_id: i64,
    season: &Season,
) -> Result<SeasonIds, StoreError> {
    if season.id().is_saved() {
        return Err(StoreError::AlreadyPersisted(format!(
            "Season {}",
            season.number()
        )));
    }
    let tx = conn.unchecked_transaction()?;
    let ids = insert_season_rows(&tx, media_id, season)?;
    tx.commit()?;
    Ok(ids)
}

/// Insert one episode row under a stored season. Returns the generated id.
pub fn insert_episode(
    conn: &Connection,
    season_id: i64,
    episode: &Episode,
) -> Result<i64, StoreError> {
    conn.execute(
        "INSERT INTO Episode (season_id, numero, titulo, duracao) VALUES (?1, ?2, ?3, ?4)",
        params![
            season_id,
            episode.number(),
            episode.title(),
            episode.duration_minutes(),
        ],
    )?;
    let id = conn.last_insert_rowid();
    log::debug!(
        "Inserted episode {} under season {} as id {}",
        episode.number(),
        season_id,
        id
    );
    Ok(id)
}

fn insert_season_rows(
    conn: &Connection,
    media_id: i64,
    season: &Season,
) -> Result<SeasonIds, StoreError> {
    conn.execute(
        "INSERT INTO Season (media_id, numero, titulo) VALUES (?1, ?2, ?3)",
        params![media_id, season.number(), season.title()],
    )?;
    let season_id = conn.last_insert_rowid();

    let mut episodes = Vec::with_capacity(season.episode_count());
    for episode in season.episodes() {
        episodes.push(insert_episode(conn, season_id, episode)?);
    }

    Ok(SeasonIds {
        season: season_id,
        episodes,
    })
}
