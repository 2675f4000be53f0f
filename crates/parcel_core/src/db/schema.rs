//! Parcel table bootstrap and readiness checks.
//!
//! # Responsibility
//! - Create the `parcel` table on a fresh database.
//! - Verify that a connection exposes the table shape repositories rely on.
//!
//! # Invariants
//! - Schema version is mirrored to `PRAGMA user_version`.
//! - A database stamped with a newer version is never modified.

use crate::error::{RepoError, RepoResult};
use log::info;
use rusqlite::Connection;

/// Schema version written by this build.
pub const SCHEMA_VERSION: u32 = 1;

const PARCEL_TABLE_SQL: &str = include_str!("parcel.sql");
const PARCEL_COLUMNS: &[&str] = &["number", "client", "address", "status", "created_at"];

/// Creates the parcel table when missing and checks the resulting shape.
pub fn ensure_schema(conn: &mut Connection) -> RepoResult<()> {
    let found = user_version(conn)?;
    if found > SCHEMA_VERSION {
        return Err(RepoError::UnsupportedSchemaVersion {
            db_version: found,
            latest_supported: SCHEMA_VERSION,
        });
    }

    if found < SCHEMA_VERSION {
        let tx = conn.transaction()?;
        tx.execute_batch(PARCEL_TABLE_SQL)?;
        tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        tx.commit()?;
        info!(
            "event=db_schema module=db status=ok from_version={} to_version={}",
            found, SCHEMA_VERSION
        );
    }

    check_schema(conn)
}

/// Fails unless `conn` is at `SCHEMA_VERSION` with every parcel column.
pub fn check_schema(conn: &Connection) -> RepoResult<()> {
    let actual_version = user_version(conn)?;
    if actual_version != SCHEMA_VERSION {
        return Err(RepoError::UninitializedConnection {
            expected_version: SCHEMA_VERSION,
            actual_version,
        });
    }

    let columns = parcel_columns(conn)?;
    if columns.is_empty() {
        return Err(RepoError::MissingRequiredTable("parcel"));
    }
    for &column in PARCEL_COLUMNS {
        if !columns.iter().any(|found| found == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: "parcel",
                column,
            });
        }
    }

    Ok(())
}

fn user_version(conn: &Connection) -> RepoResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Column names of `parcel`; empty when the table does not exist.
fn parcel_columns(conn: &Connection) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare("PRAGMA table_info(parcel);")?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(names)
}
