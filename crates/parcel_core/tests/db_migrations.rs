use parcel_core::db::schema::{ensure_schema, SCHEMA_VERSION};
use parcel_core::db::{open_db, open_db_in_memory, open_db_with_config};
use parcel_core::{DbConfig, Parcel, ParcelRepository, RepoError, SqliteParcelRepository};
use rusqlite::Connection;
use std::time::Duration;

#[test]
fn open_db_in_memory_creates_parcel_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), SCHEMA_VERSION);
    assert_table_exists(&conn, "parcel");
}

#[test]
fn opening_same_database_twice_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracker.db");

    let conn_first = open_db(&path).unwrap();
    let number = SqliteParcelRepository::try_new(&conn_first)
        .unwrap()
        .add(&Parcel::new(5, "first street"))
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), SCHEMA_VERSION);
    let loaded = SqliteParcelRepository::try_new(&conn_second)
        .unwrap()
        .get(number)
        .unwrap();
    assert_eq!(loaded.address, "first street");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        RepoError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, SCHEMA_VERSION);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn open_db_with_config_uses_file_path_when_set() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("configured.db");
    let config = DbConfig {
        path: Some(path.clone()),
        busy_timeout: Duration::from_millis(250),
    };

    let conn = open_db_with_config(&config).unwrap();
    assert_table_exists(&conn, "parcel");
    assert!(path.exists());
    assert_eq!(busy_timeout_ms(&conn), 250);
}

#[test]
fn default_open_uses_five_second_busy_timeout() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(busy_timeout_ms(&conn), 5000);
}

#[test]
fn ensure_schema_is_idempotent_and_keeps_rows() {
    let mut conn = open_db_in_memory().unwrap();
    let number = SqliteParcelRepository::try_new(&conn)
        .unwrap()
        .add(&Parcel::new(9, "Quay 2"))
        .unwrap();

    ensure_schema(&mut conn).unwrap();

    assert_eq!(schema_version(&conn), SCHEMA_VERSION);
    let repo = SqliteParcelRepository::try_new(&conn).unwrap();
    assert_eq!(repo.get(number).unwrap().address, "Quay 2");
}

#[test]
fn ensure_schema_rejects_stamped_database_without_parcel_table() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))
        .unwrap();

    assert!(matches!(
        ensure_schema(&mut conn),
        Err(RepoError::MissingRequiredTable("parcel"))
    ));
}

#[test]
fn open_db_with_default_config_is_in_memory() {
    let conn = open_db_with_config(&DbConfig::default()).unwrap();
    assert_eq!(conn.path().unwrap_or(""), "");
    assert_eq!(schema_version(&conn), SCHEMA_VERSION);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn busy_timeout_ms(conn: &Connection) -> i64 {
    conn.query_row("PRAGMA busy_timeout;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
