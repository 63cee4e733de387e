/// A cached image blob (typically a movie poster)
#[derive(Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub id: String,
    pub url: String,
    pub blob: Vec<u8>,
}

impl ImageRecord {
    pub fn new(id: impl Into<String>, url: impl Into<String>, blob: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            blob: blob.into(),
        }
    }

    /// Last-write-wins: url and bytes are replaced by `incoming`
    pub fn merge_from(&mut self, incoming: &ImageRecord) -> bool {
        let mut changed = false;
        if self.url != incoming.url {
            self.url = incoming.url.clone();
            changed = true;
        }
        if self.blob != incoming.blob {
            self.blob = incoming.blob.clone();
            changed = true;
        }
        changed
    }
}

// Poster blobs run to hundreds of kilobytes; print the length instead.
impl std::fmt::Debug for ImageRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageRecord")
            .field("id", &self.id)
            .field("url", &self.url)
            .field("blob_len", &self.blob.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_replaces_url_and_blob() {
        let mut stored = ImageRecord::new("tt1", "http://x/a.png", vec![1, 2]);
        let incoming = ImageRecord::new("tt1", "http://x/b.png", vec![3]);

        assert!(stored.merge_from(&incoming));
        assert_eq!(stored, incoming);
        assert!(!stored.merge_from(&incoming));
    }

    #[test]
    fn test_debug_omits_bytes() {
        let image = ImageRecord::new("tt1", "u", vec![0u8; 4096]);
        let rendered = format!("{:?}", image);
        assert!(rendered.contains("blob_len: 4096"));
    }
}
