//! In-memory embedding cache using moka.

use std::sync::Arc;

use moka::sync::Cache;

/// Capacity-bounded in-memory embedding cache.
///
/// Keys are stable material ids or raw query text; values are shared
/// vectors, so a hit never copies the embedding. Concurrent fills for
/// the same key compute identical vectors, which makes last-write-wins
/// insertion safe.
pub struct EmbeddingCache {
    cache: Cache<String, Arc<Vec<f32>>>,
}

impl EmbeddingCache {
    /// Create a cache holding at most `max_entries` embeddings.
    pub fn new(max_entries: u64) -> Self {
        Self {
            cache: Cache::builder().max_capacity(max_entries).build(),
        }
    }

    /// Look up an embedding by key.
    pub fn get(&self, key: &str) -> Option<Arc<Vec<f32>>> {
        self.cache.get(key)
    }

    /// Insert an embedding, returning the shared handle that was
    /// stored. The handle stays valid even if the entry is evicted
    /// immediately (capacity 0).
    pub fn insert(&self, key: String, embedding: Vec<f32>) -> Arc<Vec<f32>> {
        let shared = Arc::new(embedding);
        self.cache.insert(key, Arc::clone(&shared));
        shared
    }

    /// Number of entries currently cached.
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invalidate all entries.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}
