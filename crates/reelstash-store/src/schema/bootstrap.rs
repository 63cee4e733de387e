#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, schema_error, schema_mismatch, Result};
use crate::digest::sha256_hex;
use rusqlite::{Connection, OptionalExtension};

pub const SCHEMA_ID: &str = "001_initial_schema";
const SCHEMA_SQL: &str = include_str!("../../sql/001_initial_schema.sql");

/// Create the record tables on first open, verify them on later opens
pub fn ensure_schema(conn: &mut Connection) -> Result<()> {
    create_schema_version_table(conn)?;

    let expected = sha256_hex(SCHEMA_SQL.as_bytes());
    let recorded: Option<String> = conn
        .query_row(
            "SELECT checksum FROM schema_version WHERE migration_id = ?1",
            [SCHEMA_ID],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| from_rusqlite("schema_bootstrap", e))?;

    match recorded {
        Some(actual) if actual == expected => {
            tracing::debug!(schema_id = SCHEMA_ID, "schema already applied");
            Ok(())
        }
        Some(actual) => Err(schema_mismatch(SCHEMA_ID, &expected, &actual)),
        None => apply_schema(conn, &expected),
    }
}

fn create_schema_version_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY,
            migration_id TEXT NOT NULL UNIQUE,
            applied_at INTEGER NOT NULL,
            checksum TEXT NOT NULL
        )",
        [],
    )
    .map_err(|e| from_rusqlite("schema_bootstrap", e))?;

    Ok(())
}

fn apply_schema(conn: &mut Connection, checksum: &str) -> Result<()> {
    let tx = conn.transaction().map_err(|e| from_rusqlite("schema_bootstrap", e))?;

    tx.execute_batch(SCHEMA_SQL)
        .map_err(|e| schema_error(SCHEMA_ID, &e.to_string()))?;

    tx.execute(
        "INSERT INTO schema_version (migration_id, applied_at, checksum) VALUES (?1, ?2, ?3)",
        rusqlite::params![SCHEMA_ID, chrono::Utc::now().timestamp(), checksum],
    )
    .map_err(|e| from_rusqlite("schema_bootstrap", e))?;

    tx.commit().map_err(|e| from_rusqlite("schema_bootstrap", e))?;

    tracing::debug!(schema_id = SCHEMA_ID, "schema applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelstash_core::RecordErrorKind;

    #[test]
    fn test_ensure_schema_is_idempotent() {
        let mut conn = Connection::open_in_memory().unwrap();
        ensure_schema(&mut conn).unwrap();
        ensure_schema(&mut conn).unwrap();

        let applied: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(applied, 1);
    }

    #[test]
    fn test_tampered_checksum_is_refused() {
        let mut conn = Connection::open_in_memory().unwrap();
        ensure_schema(&mut conn).unwrap();
        conn.execute("UPDATE schema_version SET checksum = 'deadbeef'", [])
            .unwrap();

        let err = ensure_schema(&mut conn).unwrap_err();
        assert_eq!(err.kind(), RecordErrorKind::SchemaMismatch);
    }
}
