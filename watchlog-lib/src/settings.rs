//! Shared application settings (database location, config file location).
//!
//! The settings file is always `~/.config/watchlog/settings.toml`, so every
//! frontend resolves the same catalog database.

use std::io;
use std::path::{Path, PathBuf};

/// File name of the catalog database inside the data directory.
pub const DATABASE_FILE: &str = "catalog.db";

/// Canonical path to the shared settings file: `~/.config/watchlog/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("watchlog").join("settings.toml")
}

/// Default database location: `~/.local/share/watchlog/catalog.db` (or the
/// platform equivalent), falling back to `./catalog.db`.
pub fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("watchlog").join(DATABASE_FILE))
        .unwrap_or_else(|| PathBuf::from(DATABASE_FILE))
}

/// Resolve the catalog database path using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. Saved `database.path` in `settings.toml`
/// 3. [`default_database_path`]
pub fn resolve_database_path(cli_override: Option<PathBuf>) -> PathBuf {
    resolve_database_path_in(&settings_path(), cli_override)
}

pub(crate) fn resolve_database_path_in(settings: &Path, cli_override: Option<PathBuf>) -> PathBuf {
    if let Some(p) = cli_override {
        return p;
    }
    if let Some(p) = load_database_path(settings) {
        return p;
    }
    default_database_path()
}

/// Make sure the directory that will hold the database exists.
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Read `database.path` from a settings file, if set.
fn load_database_path(settings: &Path) -> Option<PathBuf> {
    let contents = std::fs::read_to_string(settings).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    let path = doc.get("database")?.get("path")?.as_str()?;
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

/// Save (or clear) the database path in `settings.toml`.
pub fn save_database_path(path: Option<&Path>) -> io::Result<()> {
    save_database_path_in(&settings_path(), path)
}

/// Uses `toml::Value` for a surgical update so unrelated keys are preserved.
pub(crate) fn save_database_path_in(settings: &Path, path: Option<&Path>) -> io::Result<()> {
    let mut doc: toml::Value = if let Ok(contents) = std::fs::read_to_string(settings) {
        contents
            .parse()
            .unwrap_or_else(|_| toml::Value::Table(Default::default()))
    } else {
        toml::Value::Table(Default::default())
    };

    let table = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
    let database = table
        .entry("database")
        .or_insert_with(|| toml::Value::Table(Default::default()));
    let db_table = database
        .as_table_mut()
        .ok_or_else(|| io::Error::other("[database] is not a table"))?;

    match path {
        Some(p) => {
            db_table.insert(
                "path".to_string(),
                toml::Value::String(p.to_string_lossy().into_owned()),
            );
        }
        None => {
            db_table.remove("path");
        }
    }

    // Write atomically
    if let Some(parent) = settings.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
    let tmp = settings.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, settings)?;

    Ok(())
}

/// Load the full settings file as a pretty-printed TOML string for display.
pub fn load_settings_string() -> Option<String> {
    let contents = std::fs::read_to_string(settings_path()).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    toml::to_string_pretty(&doc).ok()
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
