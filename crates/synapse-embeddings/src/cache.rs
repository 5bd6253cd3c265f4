//! In-memory embedding cache using moka.
//!
//! Keys are blake3 text hashes. Values are encoded vectors. Used by the
//! runtime encoder so repeated co-occurrences of the same concepts don't
//! re-tokenize on every learning event.

use std::time::Duration;

use moka::sync::Cache;

/// Embedding cache keyed by blake3 content hash.
pub struct EmbeddingCache {
    cache: Cache<String, Vec<f32>>,
}

impl EmbeddingCache {
    /// Create a cache with the given max entry count.
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(3600))
            .build();
        Self { cache }
    }

    /// Cache key for a piece of text.
    pub fn key_for(text: &str) -> String {
        blake3::hash(text.as_bytes()).to_hex().to_string()
    }

    pub fn get(&self, key: &str) -> Option<Vec<f32>> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: String, embedding: Vec<f32>) {
        self.cache.insert(key, embedding);
    }

    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
