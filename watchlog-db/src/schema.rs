//! SQLite schema creation.

use std::path::Path;

use rusqlite::Connection;

use crate::error::StoreError;

/// Tables created by [`create_schema`], parents first.
pub const TABLES: [&str; 3] = ["Media", "Season", "Episode"];

/// Create all tables and indexes if they don't exist.
///
/// Idempotent; safe to call on every startup.
pub fn create_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Open or create a catalog database at the given path.
///
/// Failing to open the file yields [`StoreError::Unavailable`]; the catalog
/// cannot work without its store.
pub fn open_database(path: &Path) -> Result<Connection, StoreError> {
    let conn = Connection::open(path).map_err(|e| {
        StoreError::unavailable(format!("cannot open {}: {}", path.display(), e))
    })?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, StoreError> {
    let conn = Connection::open_in_memory()
        .map_err(|e| StoreError::unavailable(format!("cannot open in-memory database: {e}")))?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Whether a table with this name exists.
pub fn table_exists(conn: &Connection, table: &str) -> Result<bool, StoreError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists)
}

const SCHEMA_SQL: &str = r#"
-- Movies and series
CREATE TABLE IF NOT EXISTS Media (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    titulo TEXT NOT NULL,
    genero TEXT,
    ano INTEGER NOT NULL,
    elenco TEXT,
    duracao INTEGER,
    tipo TEXT NOT NULL,
    status TEXT NOT NULL,
    avaliacao REAL DEFAULT 0.0
);
CREATE INDEX IF NOT EXISTS idx_media_titulo ON Media(titulo);

-- Seasons of a series
CREATE TABLE IF NOT EXISTS Season (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    media_id INTEGER NOT NULL REFERENCES Media(id),
    numero INTEGER NOT NULL,
    titulo TEXT,
    UNIQUE(media_id, numero)
);

-- Episodes of a season
CREATE TABLE IF NOT EXISTS Episode (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    season_id INTEGER NOT NULL REFERENCES Season(id),
    numero INTEGER NOT NULL,
    titulo TEXT,
    duracao INTEGER NOT NULL,
    UNIQUE(season_id, numero)
);
"#;
