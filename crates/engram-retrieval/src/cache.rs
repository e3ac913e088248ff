//! Inquiry result cache.
//!
//! Repeated identical inquiries are served without touching the store or
//! re-reinforcing the results. Entries are keyed by owner, a blake3 hash
//! of the query vector and threshold, top_k, and a per-owner generation
//! counter that advances on every mutation — stale entries become
//! unreachable rather than having to be found and evicted.

use std::sync::Arc;

use dashmap::DashMap;
use moka::sync::Cache;

use engram_core::memory::OwnerId;

use crate::engine::RetrievedMemory;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    owner: String,
    generation: u64,
    query_hash: [u8; 32],
    top_k: usize,
}

/// Capacity-bounded cache of assembled inquiry results.
pub struct QueryCache {
    entries: Cache<CacheKey, Arc<Vec<RetrievedMemory>>>,
    generations: DashMap<String, u64>,
}

impl QueryCache {
    pub fn new(capacity: u64) -> Self {
        Self {
            entries: Cache::new(capacity),
            generations: DashMap::new(),
        }
    }

    fn key(&self, owner_id: &OwnerId, query: &[f32], threshold: f64, top_k: usize) -> CacheKey {
        let mut hasher = blake3::Hasher::new();
        for x in query {
            hasher.update(&x.to_le_bytes());
        }
        hasher.update(&threshold.to_le_bytes());
        let generation = self
            .generations
            .get(owner_id.as_str())
            .map(|g| *g)
            .unwrap_or(0);
        CacheKey {
            owner: owner_id.as_str().to_string(),
            generation,
            query_hash: *hasher.finalize().as_bytes(),
            top_k,
        }
    }

    pub fn get(
        &self,
        owner_id: &OwnerId,
        query: &[f32],
        threshold: f64,
        top_k: usize,
    ) -> Option<Arc<Vec<RetrievedMemory>>> {
        self.entries.get(&self.key(owner_id, query, threshold, top_k))
    }

    pub fn insert(
        &self,
        owner_id: &OwnerId,
        query: &[f32],
        threshold: f64,
        top_k: usize,
        results: Arc<Vec<RetrievedMemory>>,
    ) {
        self.entries
            .insert(self.key(owner_id, query, threshold, top_k), results);
    }

    /// Advance the owner's generation: every cached entry for the owner
    /// becomes unreachable.
    pub fn invalidate_owner(&self, owner_id: &OwnerId) {
        *self
            .generations
            .entry(owner_id.as_str().to_string())
            .or_insert(0) += 1;
    }
}
