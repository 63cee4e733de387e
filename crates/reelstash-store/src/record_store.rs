//! LocalRecordStore: the movie and poster cache session
//!
//! ## Logging Ownership
//!
//! This layer owns lifecycle logging for the cache operations:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! The repo and schema layers only use `tracing::debug!()`.
//!
//! ## Atomicity
//!
//! Each save runs fetch, plan and apply inside one immediate transaction
//! while holding the session mutex. A save whose plan is empty rolls back
//! instead of committing.

#![allow(clippy::result_large_err)]

use crate::config::StoreConfig;
use crate::db;
use crate::errors::{from_rusqlite, poisoned, Result};
use crate::repo::{ImageRepo, MovieRepo};
use reelstash_core::errors::require_id;
use reelstash_core::ops::{plan_image_write, plan_movie_writes};
use reelstash_core::{
    log_op_end, log_op_error, log_op_start, ImageRecord, MovieRecord, UpsertPolicy, WriteReport,
};
use rusqlite::{Connection, TransactionBehavior};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

/// Durable cache for movie records and image blobs
///
/// Cloning yields another handle to the same session.
#[derive(Clone)]
pub struct LocalRecordStore {
    policy: UpsertPolicy,
    connection: Arc<Mutex<Connection>>,
}

impl std::fmt::Debug for LocalRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalRecordStore")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl LocalRecordStore {
    /// Open (creating if needed) the file-backed store described by `config`
    ///
    /// ## Errors
    ///
    /// - `Io`: the parent directory could not be created
    /// - `Persistence`: SQLite refused to open or configure the file
    /// - `SchemaMismatch`: the file was written by a different schema
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let conn = db::open(config)?;
        Ok(Self::from_connection(conn, config.upsert_policy))
    }

    /// Ephemeral store using the default keyed policy
    pub fn open_in_memory() -> Result<Self> {
        Self::open_in_memory_with_policy(UpsertPolicy::default())
    }

    pub fn open_in_memory_with_policy(policy: UpsertPolicy) -> Result<Self> {
        let conn = db::open_in_memory()?;
        Ok(Self::from_connection(conn, policy))
    }

    fn from_connection(conn: Connection, policy: UpsertPolicy) -> Self {
        Self {
            policy,
            connection: Arc::new(Mutex::new(conn)),
        }
    }

    pub fn policy(&self) -> UpsertPolicy {
        self.policy
    }

    /// Save a batch of movies
    ///
    /// An empty store receives every record. A non-empty store is matched
    /// according to the configured `UpsertPolicy`.
    ///
    /// ## Errors
    ///
    /// - `InvalidInput`: a record has an empty id (nothing is written)
    /// - `Persistence` / `Serialization` / `Concurrency`: store failure, rolled back
    pub fn save_movies(&self, movies: &[MovieRecord]) -> Result<WriteReport> {
        log_op_start!("save_movies", batch_len = movies.len() as u64);
        let start = Instant::now();

        let report = self.save_movies_impl(movies).map_err(|e| {
            log_op_error!(
                "save_movies",
                e,
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_op_end!(
            "save_movies",
            duration_ms = start.elapsed().as_millis() as u64,
            inserted = report.inserted as u64,
            updated = report.updated as u64,
            skipped = report.skipped as u64,
            committed = report.committed
        );

        Ok(report)
    }

    fn save_movies_impl(&self, movies: &[MovieRecord]) -> Result<WriteReport> {
        for movie in movies {
            require_id("save_movies", &movie.id)?;
        }

        let mut conn = self.lock("save_movies")?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| from_rusqlite("save_movies", e))?;

        let stored = MovieRepo::fetch_all(&tx)?;
        let plan = plan_movie_writes(stored, movies, self.policy);

        if !plan.has_changes() {
            // Dropping the transaction rolls it back
            return Ok(plan.report(false));
        }

        let now = chrono::Utc::now().timestamp_millis();
        for movie in &plan.inserts {
            MovieRepo::insert(&tx, movie, now)?;
        }
        for row in &plan.updates {
            MovieRepo::update(&tx, row, now)?;
        }

        tx.commit().map_err(|e| from_rusqlite("save_movies", e))?;
        Ok(plan.report(true))
    }

    /// All cached movies, in the order they were first stored
    pub fn get_movies(&self) -> Result<Vec<MovieRecord>> {
        log_op_start!("get_movies");
        let start = Instant::now();

        let movies = self
            .lock("get_movies")
            .and_then(|conn| MovieRepo::fetch_all(&conn))
            .map(|rows| rows.into_iter().map(|row| row.record).collect::<Vec<_>>())
            .map_err(|e| {
                log_op_error!(
                    "get_movies",
                    e,
                    duration_ms = start.elapsed().as_millis() as u64
                );
                e
            })?;

        log_op_end!(
            "get_movies",
            duration_ms = start.elapsed().as_millis() as u64,
            batch_len = movies.len() as u64
        );

        Ok(movies)
    }

    /// Save one image blob fetched from `url`
    ///
    /// ## Errors
    ///
    /// - `InvalidInput`: `id` is empty
    /// - `Persistence` / `Concurrency`: store failure, rolled back
    ///
    /// A stored row for `id` whose bytes fail their digest is overwritten.
    pub fn save_image(&self, id: &str, url: &str, blob: &[u8]) -> Result<WriteReport> {
        log_op_start!(
            "save_image",
            record_id = id,
            blob_len = blob.len() as u64
        );
        let start = Instant::now();

        let report = self
            .save_image_impl(ImageRecord::new(id, url, blob))
            .map_err(|e| {
                log_op_error!(
                    "save_image",
                    e,
                    duration_ms = start.elapsed().as_millis() as u64,
                    record_id = id
                );
                e
            })?;

        log_op_end!(
            "save_image",
            duration_ms = start.elapsed().as_millis() as u64,
            record_id = id,
            inserted = report.inserted as u64,
            updated = report.updated as u64,
            committed = report.committed
        );

        Ok(report)
    }

    fn save_image_impl(&self, image: ImageRecord) -> Result<WriteReport> {
        require_id("save_image", &image.id)?;

        let mut conn = self.lock("save_image")?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| from_rusqlite("save_image", e))?;

        // Keyed matching only ever looks at rows carrying the same id
        let stored = match self.policy {
            UpsertPolicy::Keyed => ImageRepo::fetch_by_id(&tx, &image.id)?,
            UpsertPolicy::Legacy => ImageRepo::fetch_all(&tx)?,
        };
        let plan = plan_image_write(stored, &image, self.policy);

        if !plan.has_changes() {
            return Ok(plan.report(false));
        }

        let now = chrono::Utc::now().timestamp_millis();
        for insert in &plan.inserts {
            ImageRepo::insert(&tx, insert, now)?;
        }
        for row in &plan.updates {
            ImageRepo::update(&tx, row, now)?;
        }

        tx.commit().map_err(|e| from_rusqlite("save_image", e))?;
        Ok(plan.report(true))
    }

    /// Bytes of the first image stored under `id`, if any
    ///
    /// ## Errors
    ///
    /// - `Corrupt`: the stored bytes no longer match their digest
    pub fn get_image(&self, id: &str) -> Result<Option<Vec<u8>>> {
        Ok(self
            .fetch_image("get_image", id)?
            .map(|image| image.blob))
    }

    /// Like `get_image`, but also returns the source url
    pub fn get_image_record(&self, id: &str) -> Result<Option<ImageRecord>> {
        self.fetch_image("get_image_record", id)
    }

    fn fetch_image(&self, op: &'static str, id: &str) -> Result<Option<ImageRecord>> {
        log_op_start!(op, record_id = id);
        let start = Instant::now();

        let image = self
            .lock(op)
            .and_then(|conn| ImageRepo::fetch_first(&conn, id))
            .map(|row| row.map(|row| row.record))
            .map_err(|e| {
                log_op_error!(
                    op,
                    e,
                    duration_ms = start.elapsed().as_millis() as u64,
                    record_id = id
                );
                e
            })?;

        log_op_end!(
            op,
            duration_ms = start.elapsed().as_millis() as u64,
            record_id = id,
            found = image.is_some()
        );

        Ok(image)
    }

    /// Number of stored movie rows
    pub fn movie_count(&self) -> Result<usize> {
        MovieRepo::count(&*self.lock("movie_count")?)
    }

    /// Number of stored image rows (duplicates included)
    pub fn image_count(&self) -> Result<usize> {
        ImageRepo::count(&*self.lock("image_count")?)
    }

    fn lock(&self, op: &str) -> Result<MutexGuard<'_, Connection>> {
        self.connection.lock().map_err(|_| poisoned(op))
    }
}
