use super::Details;
use serde::{Deserialize, Serialize};

/// A cached movie entry
///
/// Anything besides `id` and `title` lands in `details`, so a list item
/// from the upstream catalogue API deserializes directly:
///
/// ```
/// use reelstash_core::MovieRecord;
///
/// let movie: MovieRecord = serde_json::from_str(
///     r#"{"id":"tt0111161","title":"The Shawshank Redemption","year":"1994","rank":"1"}"#,
/// ).unwrap();
/// assert_eq!(movie.details.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: String,
    pub title: String,
    #[serde(flatten)]
    pub details: Details,
}

impl MovieRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            details: Details::new(),
        }
    }

    /// Builder-style detail setter
    pub fn with_detail(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.details.set(key, value);
        self
    }

    /// Replace this record with `incoming`, the later write
    ///
    /// Title and details are taken wholesale, so a detail the later write
    /// no longer carries is dropped. Returns whether anything changed.
    pub fn merge_from(&mut self, incoming: &MovieRecord) -> bool {
        if self == incoming {
            return false;
        }
        self.title = incoming.title.clone();
        self.details = incoming.details.clone();
        true
    }
}
