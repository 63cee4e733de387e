//! SHA-256 digests for schema and image integrity checks

use sha2::{Digest, Sha256};

/// SHA-256 of `content` as lowercase hex
pub fn sha256_hex(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex() {
        let digest = sha256_hex(b"SELECT 1");
        assert_eq!(digest.len(), 64);
        assert_eq!(digest, sha256_hex(b"SELECT 1"));
        assert_ne!(digest, sha256_hex(b"SELECT 2"));
    }

    #[test]
    fn test_known_vector() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
