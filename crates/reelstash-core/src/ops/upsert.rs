//! Insert-vs-update planning
//!
//! Given the rows currently in the store and the records a caller wants to
//! save, decide which records become new rows and which existing rows get
//! rewritten. Planning is pure; the store applies the plan in one
//! transaction.

use crate::model::{ImageRecord, MovieRecord, StoredRow};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How incoming records are matched against stored rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertPolicy {
    /// Match by record id: update when present, insert when absent
    #[default]
    Keyed,
    /// Positional matching kept for stores written by older clients:
    /// - movies pair with stored rows by position and only update when the
    ///   paired ids agree; nothing is inserted into a non-empty store
    /// - an image inserts a fresh copy for every stored row whose id differs
    Legacy,
}

/// Rows to insert and rows to rewrite
#[derive(Debug, Clone, PartialEq)]
pub struct WritePlan<T> {
    pub inserts: Vec<T>,
    pub updates: Vec<StoredRow<T>>,
    /// Incoming records that produced neither an insert nor an update
    pub skipped: usize,
}

impl<T> Default for WritePlan<T> {
    fn default() -> Self {
        Self {
            inserts: Vec::new(),
            updates: Vec::new(),
            skipped: 0,
        }
    }
}

impl<T> WritePlan<T> {
    pub fn has_changes(&self) -> bool {
        !self.inserts.is_empty() || !self.updates.is_empty()
    }

    pub fn report(&self, committed: bool) -> WriteReport {
        WriteReport {
            inserted: self.inserts.len(),
            updated: self.updates.len(),
            skipped: self.skipped,
            committed,
        }
    }
}

/// Outcome of a save operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct WriteReport {
    pub inserted: usize,
    pub updated: usize,
    pub skipped: usize,
    /// False when the plan was empty and no transaction was committed
    pub committed: bool,
}

/// Plan a batch movie save
pub fn plan_movie_writes(
    stored: Vec<StoredRow<MovieRecord>>,
    incoming: &[MovieRecord],
    policy: UpsertPolicy,
) -> WritePlan<MovieRecord> {
    if stored.is_empty() && policy == UpsertPolicy::Legacy {
        return WritePlan {
            inserts: incoming.to_vec(),
            ..WritePlan::default()
        };
    }

    match policy {
        UpsertPolicy::Keyed => plan_movies_keyed(stored, incoming),
        UpsertPolicy::Legacy => plan_movies_positional(stored, incoming),
    }
}

fn plan_movies_keyed(
    mut stored: Vec<StoredRow<MovieRecord>>,
    incoming: &[MovieRecord],
) -> WritePlan<MovieRecord> {
    // First row wins when a legacy run left duplicates behind
    let mut by_id: HashMap<String, usize> = HashMap::new();
    for (idx, row) in stored.iter().enumerate() {
        by_id.entry(row.record.id.clone()).or_insert(idx);
    }

    let mut dirty = vec![false; stored.len()];
    let mut inserts: Vec<MovieRecord> = Vec::new();
    let mut pending: HashMap<String, usize> = HashMap::new();
    let mut touched = 0usize;

    for movie in incoming {
        if let Some(&idx) = by_id.get(&movie.id) {
            if stored[idx].record.merge_from(movie) {
                if !dirty[idx] {
                    touched += 1;
                }
                dirty[idx] = true;
            }
        } else if let Some(&idx) = pending.get(&movie.id) {
            inserts[idx].merge_from(movie);
        } else {
            pending.insert(movie.id.clone(), inserts.len());
            inserts.push(movie.clone());
        }
    }

    let updates: Vec<StoredRow<MovieRecord>> = stored
        .into_iter()
        .zip(dirty)
        .filter_map(|(row, dirty)| dirty.then_some(row))
        .collect();

    let skipped = incoming.len() - inserts.len() - touched;
    WritePlan {
        inserts,
        updates,
        skipped,
    }
}

fn plan_movies_positional(
    stored: Vec<StoredRow<MovieRecord>>,
    incoming: &[MovieRecord],
) -> WritePlan<MovieRecord> {
    let mut updates = Vec::new();
    let mut skipped = incoming.len().saturating_sub(stored.len());

    for (mut row, movie) in stored.into_iter().zip(incoming) {
        if row.record.id == movie.id && row.record.merge_from(movie) {
            updates.push(row);
        } else {
            skipped += 1;
        }
    }

    WritePlan {
        inserts: Vec::new(),
        updates,
        skipped,
    }
}

/// Plan a single image save
pub fn plan_image_write(
    stored: Vec<StoredRow<ImageRecord>>,
    incoming: &ImageRecord,
    policy: UpsertPolicy,
) -> WritePlan<ImageRecord> {
    if stored.is_empty() {
        return WritePlan {
            inserts: vec![incoming.clone()],
            ..WritePlan::default()
        };
    }

    match policy {
        UpsertPolicy::Keyed => {
            let existing = stored.into_iter().find(|row| row.record.id == incoming.id);
            match existing {
                Some(mut row) => {
                    if row.record.merge_from(incoming) {
                        WritePlan {
                            updates: vec![row],
                            ..WritePlan::default()
                        }
                    } else {
                        WritePlan {
                            skipped: 1,
                            ..WritePlan::default()
                        }
                    }
                }
                None => WritePlan {
                    inserts: vec![incoming.clone()],
                    ..WritePlan::default()
                },
            }
        }
        UpsertPolicy::Legacy => {
            let mut plan = WritePlan::default();
            for mut row in stored {
                if row.record.id == incoming.id {
                    if row.record.merge_from(incoming) {
                        plan.updates.push(row);
                    } else {
                        plan.skipped += 1;
                    }
                } else {
                    plan.inserts.push(incoming.clone());
                }
            }
            plan
        }
    }
}
