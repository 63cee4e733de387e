#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use reelstash_core::ops::{plan_image_write, plan_movie_writes};
use reelstash_core::{ImageRecord, MovieRecord, StoredRow, UpsertPolicy};
use std::collections::BTreeSet;

fn distinct_movies() -> impl Strategy<Value = Vec<MovieRecord>> {
    prop::collection::btree_map("[a-z0-9]{1,8}", "[A-Za-z ]{0,12}", 0..20).prop_map(|m| {
        m.into_iter()
            .map(|(id, title)| MovieRecord::new(id, title))
            .collect()
    })
}

fn as_stored(movies: &[MovieRecord]) -> Vec<StoredRow<MovieRecord>> {
    movies
        .iter()
        .enumerate()
        .map(|(i, m)| StoredRow::new(i as i64 + 1, m.clone()))
        .collect()
}

fn any_policy() -> impl Strategy<Value = UpsertPolicy> {
    prop_oneof![Just(UpsertPolicy::Keyed), Just(UpsertPolicy::Legacy)]
}

proptest! {
    #[test]
    fn empty_store_inserts_every_distinct_record(movies in distinct_movies(), policy in any_policy()) {
        let plan = plan_movie_writes(Vec::new(), &movies, policy);

        prop_assert_eq!(plan.inserts, movies);
        prop_assert!(plan.updates.is_empty());
    }

    #[test]
    fn resaving_same_batch_inserts_nothing(movies in distinct_movies(), policy in any_policy()) {
        let plan = plan_movie_writes(as_stored(&movies), &movies, policy);

        prop_assert!(!plan.has_changes());
        prop_assert_eq!(plan.skipped, movies.len());
    }

    #[test]
    fn keyed_plan_never_creates_duplicate_ids(
        stored in distinct_movies(),
        incoming in prop::collection::vec(("[a-c]", "[A-Z]{1,3}"), 0..12),
    ) {
        let incoming: Vec<MovieRecord> = incoming
            .into_iter()
            .map(|(id, title)| MovieRecord::new(id, title))
            .collect();
        let plan = plan_movie_writes(as_stored(&stored), &incoming, UpsertPolicy::Keyed);

        let mut ids: BTreeSet<String> = stored.iter().map(|m| m.id.clone()).collect();
        for insert in &plan.inserts {
            prop_assert!(ids.insert(insert.id.clone()), "duplicate insert for {}", insert.id);
        }
        prop_assert!(plan.inserts.len() + plan.updates.len() <= incoming.len());
    }

    #[test]
    fn legacy_image_save_inserts_one_copy_per_foreign_row(
        stored_ids in prop::collection::vec("[a-d]", 1..10),
        id in "[a-d]",
    ) {
        let stored: Vec<StoredRow<ImageRecord>> = stored_ids
            .iter()
            .enumerate()
            .map(|(i, sid)| StoredRow::new(i as i64 + 1, ImageRecord::new(sid.clone(), "u", vec![0])))
            .collect();
        let incoming = ImageRecord::new(id.clone(), "u2", vec![1]);

        let plan = plan_image_write(stored, &incoming, UpsertPolicy::Legacy);

        let foreign = stored_ids.iter().filter(|sid| **sid != id).count();
        let matching = stored_ids.len() - foreign;
        prop_assert_eq!(plan.inserts.len(), foreign);
        prop_assert_eq!(plan.updates.len(), matching);
    }
}
