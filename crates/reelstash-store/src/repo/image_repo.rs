#![allow(clippy::result_large_err)]

use crate::errors::{corrupt_blob, from_rusqlite, Result};
use crate::digest::sha256_hex;
use reelstash_core::{ImageRecord, StoredRow};
use rusqlite::Connection;

const SELECT_IMAGES: &str = "SELECT row_id, id, url, blob, content_digest FROM images";

/// SQLite access for the images table
///
/// `fetch_first` is the read path and refuses rows whose bytes no longer
/// match their digest. `fetch_all` and `fetch_by_id` load rows for write
/// planning: a mismatching row comes back with an empty blob so that any
/// save for its id rewrites it.
pub struct ImageRepo;

impl ImageRepo {
    /// All stored images in insertion order, for write planning
    pub fn fetch_all(conn: &Connection) -> Result<Vec<StoredRow<ImageRecord>>> {
        let raw = Self::query(
            conn,
            "image_fetch_all",
            &format!("{} ORDER BY row_id", SELECT_IMAGES),
            [],
        )?;
        Ok(raw.into_iter().map(RawImage::for_planning).collect())
    }

    /// Stored images carrying `id` in insertion order, for write planning
    pub fn fetch_by_id(conn: &Connection, id: &str) -> Result<Vec<StoredRow<ImageRecord>>> {
        let raw = Self::query(
            conn,
            "image_fetch_by_id",
            &format!("{} WHERE id = ?1 ORDER BY row_id", SELECT_IMAGES),
            [id],
        )?;
        Ok(raw.into_iter().map(RawImage::for_planning).collect())
    }

    /// First stored image carrying `id`, with its digest verified
    pub fn fetch_first(conn: &Connection, id: &str) -> Result<Option<StoredRow<ImageRecord>>> {
        Self::query(
            conn,
            "image_fetch_first",
            &format!("{} WHERE id = ?1 ORDER BY row_id LIMIT 1", SELECT_IMAGES),
            [id],
        )?
        .into_iter()
        .next()
        .map(RawImage::verified)
        .transpose()
    }

    pub fn insert(conn: &Connection, image: &ImageRecord, now_ms: i64) -> Result<i64> {
        conn.execute(
            "INSERT INTO images (id, url, blob, content_digest, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            rusqlite::params![
                image.id,
                image.url,
                image.blob,
                sha256_hex(&image.blob),
                now_ms
            ],
        )
        .map_err(|e| from_rusqlite("image_insert", e).with_record_id(image.id.clone()))?;

        Ok(conn.last_insert_rowid())
    }

    pub fn update(conn: &Connection, row: &StoredRow<ImageRecord>, now_ms: i64) -> Result<()> {
        conn.execute(
            "UPDATE images SET url = ?1, blob = ?2, content_digest = ?3, updated_at = ?4
             WHERE row_id = ?5",
            rusqlite::params![
                row.record.url,
                row.record.blob,
                sha256_hex(&row.record.blob),
                now_ms,
                row.row_id
            ],
        )
        .map_err(|e| from_rusqlite("image_update", e).with_record_id(row.record.id.clone()))?;

        Ok(())
    }

    pub fn count(conn: &Connection) -> Result<usize> {
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM images", [], |row| row.get(0))
            .map_err(|e| from_rusqlite("image_count", e))?;
        Ok(count as usize)
    }

    fn query<P: rusqlite::Params>(
        conn: &Connection,
        op: &str,
        sql: &str,
        params: P,
    ) -> Result<Vec<RawImage>> {
        let mut stmt = conn.prepare(sql).map_err(|e| from_rusqlite(op, e))?;

        let rows = stmt
            .query_map(params, |row| {
                Ok(RawImage {
                    row_id: row.get(0)?,
                    record: ImageRecord {
                        id: row.get(1)?,
                        url: row.get(2)?,
                        blob: row.get(3)?,
                    },
                    recorded_digest: row.get(4)?,
                })
            })
            .map_err(|e| from_rusqlite(op, e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| from_rusqlite(op, e))?;

        Ok(rows)
    }
}

/// A row as stored, before its digest is checked
struct RawImage {
    row_id: i64,
    record: ImageRecord,
    recorded_digest: String,
}

impl RawImage {
    fn verified(self) -> Result<StoredRow<ImageRecord>> {
        let actual = sha256_hex(&self.record.blob);
        if actual != self.recorded_digest {
            return Err(corrupt_blob(&self.record.id, &self.recorded_digest, &actual));
        }
        Ok(StoredRow::new(self.row_id, self.record))
    }

    fn for_planning(mut self) -> StoredRow<ImageRecord> {
        if sha256_hex(&self.record.blob) != self.recorded_digest {
            tracing::debug!(
                record_id = %self.record.id,
                row_id = self.row_id,
                "image digest mismatch, bytes treated as absent"
            );
            self.record.blob.clear();
        }
        StoredRow::new(self.row_id, self.record)
    }
}
