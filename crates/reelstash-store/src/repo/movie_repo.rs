#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, from_serde_json, Result};
use reelstash_core::{Details, MovieRecord, StoredRow};
use rusqlite::Connection;

/// SQLite access for the movies table
pub struct MovieRepo;

impl MovieRepo {
    /// All stored movies in insertion order
    pub fn fetch_all(conn: &Connection) -> Result<Vec<StoredRow<MovieRecord>>> {
        let mut stmt = conn
            .prepare("SELECT row_id, id, title, details_json FROM movies ORDER BY row_id")
            .map_err(|e| from_rusqlite("movie_fetch_all", e))?;

        let raw: Vec<(i64, String, String, String)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)))
            .map_err(|e| from_rusqlite("movie_fetch_all", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| from_rusqlite("movie_fetch_all", e))?;

        raw.into_iter()
            .map(|(row_id, id, title, details_json)| {
                let details: Details = serde_json::from_str(&details_json)
                    .map_err(|e| from_serde_json("movie_decode", e).with_record_id(id.clone()))?;
                Ok(StoredRow::new(row_id, MovieRecord { id, title, details }))
            })
            .collect()
    }

    pub fn insert(conn: &Connection, movie: &MovieRecord, now_ms: i64) -> Result<i64> {
        let details_json = encode_details(movie)?;

        conn.execute(
            "INSERT INTO movies (id, title, details_json, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)",
            rusqlite::params![movie.id, movie.title, details_json, now_ms],
        )
        .map_err(|e| from_rusqlite("movie_insert", e).with_record_id(movie.id.clone()))?;

        Ok(conn.last_insert_rowid())
    }

    pub fn update(conn: &Connection, row: &StoredRow<MovieRecord>, now_ms: i64) -> Result<()> {
        let details_json = encode_details(&row.record)?;

        conn.execute(
            "UPDATE movies SET title = ?1, details_json = ?2, updated_at = ?3 WHERE row_id = ?4",
            rusqlite::params![row.record.title, details_json, now_ms, row.row_id],
        )
        .map_err(|e| from_rusqlite("movie_update", e).with_record_id(row.record.id.clone()))?;

        Ok(())
    }

    pub fn count(conn: &Connection) -> Result<usize> {
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM movies", [], |row| row.get(0))
            .map_err(|e| from_rusqlite("movie_count", e))?;
        Ok(count as usize)
    }
}

fn encode_details(movie: &MovieRecord) -> Result<String> {
    serde_json::to_string(&movie.details)
        .map_err(|e| from_serde_json("movie_encode", e).with_record_id(movie.id.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn setup() -> Connection {
        crate::db::open_in_memory().unwrap()
    }

    #[test]
    fn test_insert_then_fetch_preserves_details() {
        let conn = setup();
        let movie = MovieRecord::new("tt0068646", "The Godfather").with_detail("year", json!("1972"));

        let row_id = MovieRepo::insert(&conn, &movie, 1).unwrap();
        let rows = MovieRepo::fetch_all(&conn).unwrap();

        assert_eq!(rows, vec![StoredRow::new(row_id, movie)]);
    }

    #[test]
    fn test_update_rewrites_row() {
        let conn = setup();
        let row_id = MovieRepo::insert(&conn, &MovieRecord::new("tt1", "A"), 1).unwrap();

        let row = StoredRow::new(row_id, MovieRecord::new("tt1", "B"));
        MovieRepo::update(&conn, &row, 2).unwrap();

        let rows = MovieRepo::fetch_all(&conn).unwrap();
        assert_eq!(rows[0].record.title, "B");
        assert_eq!(MovieRepo::count(&conn).unwrap(), 1);
    }

    #[test]
    fn test_undecodable_details_is_serialization_error() {
        let conn = setup();
        conn.execute(
            "INSERT INTO movies (id, title, details_json, created_at, updated_at)
             VALUES ('tt1', 'A', 'not json', 0, 0)",
            [],
        )
        .unwrap();

        let err = MovieRepo::fetch_all(&conn).unwrap_err();
        assert_eq!(err.kind(), reelstash_core::RecordErrorKind::Serialization);
        assert_eq!(err.record_id(), Some("tt1"));
    }
}
