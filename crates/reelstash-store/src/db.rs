//! Database connection management
//!
//! Opens SQLite connections, applies pragmas, and bootstraps the schema

#![allow(clippy::result_large_err)]

use crate::config::{JournalMode, StoreConfig};
use crate::errors::{from_rusqlite, io_error, Result};
use crate::schema::ensure_schema;
use rusqlite::Connection;

/// Open the database described by `config`, ready for use
pub fn open(config: &StoreConfig) -> Result<Connection> {
    if let Some(parent) = config.path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| io_error("create_store_dir", e))?;
        }
    }

    let mut conn = Connection::open(&config.path).map_err(|e| from_rusqlite("db_open", e))?;
    configure(&conn, config)?;
    ensure_schema(&mut conn)?;

    tracing::debug!(path = %config.path.display(), "store opened");
    Ok(conn)
}

/// Open an in-memory database (for tests and ephemeral sessions)
pub fn open_in_memory() -> Result<Connection> {
    let mut conn = Connection::open_in_memory().map_err(|e| from_rusqlite("db_open", e))?;
    ensure_schema(&mut conn)?;
    Ok(conn)
}

/// Apply journal mode and busy timeout
pub fn configure(conn: &Connection, config: &StoreConfig) -> Result<()> {
    conn.busy_timeout(config.busy_timeout())
        .map_err(|e| from_rusqlite("db_configure", e))?;

    // journal_mode reports the resulting mode as a row
    let mode: String = conn
        .pragma_update_and_check(None, "journal_mode", config.journal_mode.as_pragma(), |row| {
            row.get(0)
        })
        .map_err(|e| from_rusqlite("db_configure", e))?;

    if !mode.eq_ignore_ascii_case(config.journal_mode.as_pragma()) {
        tracing::debug!(
            requested = config.journal_mode.as_pragma(),
            actual = %mode,
            "journal mode not applied"
        );
    }

    Ok(())
}

/// Journal mode currently in effect on `conn`
pub fn journal_mode(conn: &Connection) -> Result<JournalMode> {
    let mode: String = conn
        .query_row("PRAGMA journal_mode", [], |row| row.get(0))
        .map_err(|e| from_rusqlite("journal_mode", e))?;
    Ok(if mode.eq_ignore_ascii_case("wal") {
        JournalMode::Wal
    } else {
        JournalMode::Delete
    })
}
