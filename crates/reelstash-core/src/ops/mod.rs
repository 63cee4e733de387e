//! Pure planning operations over fetched rows

pub mod upsert;

pub use upsert::{plan_image_write, plan_movie_writes, UpsertPolicy, WritePlan, WriteReport};
