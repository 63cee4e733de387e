mod details;
mod image;
mod movie;

pub use details::Details;
pub use image::ImageRecord;
pub use movie::MovieRecord;

/// A record as fetched from the store, tagged with its storage row
///
/// `row_id` is the store's own key; record ids are not unique on disk when
/// the legacy policy has written duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRow<T> {
    pub row_id: i64,
    pub record: T,
}

impl<T> StoredRow<T> {
    pub fn new(row_id: i64, record: T) -> Self {
        Self { row_id, record }
    }
}
