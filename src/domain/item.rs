use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A normalized feed entry, ready to be deduplicated and packed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub source: String,
    pub title: String,
    pub link: String,
    pub summary: String,
    /// Unix seconds, 0 when the feed gave no usable date.
    pub published_ts: i64,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Item {
    /// Generate a deterministic ID from an entry's natural key
    pub fn generate_id(natural_key: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(natural_key.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_generation_deterministic() {
        let id1 = Item::generate_id("https://example.com/post/1");
        let id2 = Item::generate_id("https://example.com/post/1");
        assert_eq!(id1, id2);
    }

    #[test]
    fn test_id_generation_different_inputs() {
        let id1 = Item::generate_id("entry-123");
        let id2 = Item::generate_id("entry-456");
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_id_is_hex_sha256() {
        let id = Item::generate_id("entry-123");
        assert_eq!(id.len(), 64); // SHA256 produces 32 bytes = 64 hex chars
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_id_known_vector() {
        assert_eq!(
            Item::generate_id("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
