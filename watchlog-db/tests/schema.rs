use watchlog_db::schema::{TABLES, create_schema, table_exists};
use watchlog_db::{MediaStore, SqliteStore, open_memory};

#[test]
fn all_tables_exist() {
    let conn = open_memory().unwrap();
    for table in TABLES {
        assert!(
            table_exists(&conn, table).unwrap(),
            "table '{}' should exist",
            table
        );
    }
}

#[test]
fn schema_is_idempotent() {
    let conn = open_memory().unwrap();
    // Creating again should not error
    create_schema(&conn).unwrap();
    create_schema(&conn).unwrap();

    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN ('Media', 'Season', 'Episode')",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(tables, 3);
}

#[test]
fn initialize_schema_twice_through_store() {
    let mut store = SqliteStore::open_memory().unwrap();
    store.initialize_schema().unwrap();
    store.initialize_schema().unwrap();
    assert!(store.load_all().unwrap().is_empty());
}

#[test]
fn foreign_keys_enabled() {
    let conn = open_memory().unwrap();
    let fk: i32 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(fk, 1);
}

#[test]
fn reopening_a_file_keeps_the_schema() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("catalog.db");

    let mut store = SqliteStore::open(&path).unwrap();
    store.close().unwrap();

    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.path(), Some(path.as_path()));
    assert!(store.load_all().unwrap().is_empty());
}

#[test]
fn unopenable_path_is_unavailable() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("missing-dir").join("catalog.db");
    let err = SqliteStore::open(&path).unwrap_err();
    assert!(err.is_unavailable(), "unexpected error: {err}");
}
