//! Similarity ranking: nearest-neighbor candidates with fresh retention.

use chrono::{DateTime, Utc};

use engram_core::errors::{EngramError, EngramResult};
use engram_core::memory::{MemoryRecord, OwnerId, RetentionScore};
use engram_core::traits::MemoryStore;
use engram_retention::RetentionEngine;

/// A similarity hit annotated with its freshly computed retention.
#[derive(Debug, Clone)]
pub struct RankedMemory {
    pub memory: MemoryRecord,
    pub similarity: f64,
    pub retention: RetentionScore,
}

/// Validates a query, runs the store's nearest-neighbor search, and
/// attaches a retention score to every hit.
pub struct SimilarityRanker<'a> {
    store: &'a dyn MemoryStore,
    retention: &'a RetentionEngine,
}

impl<'a> SimilarityRanker<'a> {
    pub fn new(store: &'a dyn MemoryStore, retention: &'a RetentionEngine) -> Self {
        Self { store, retention }
    }

    /// Reject malformed query inputs before touching the store.
    pub fn validate(&self, query: &[f32], threshold: f64, top_k: usize) -> EngramResult<()> {
        if top_k == 0 {
            return Err(EngramError::InvalidQuery {
                reason: "top_k must be at least 1".into(),
            });
        }
        if !threshold.is_finite() || !(-1.0..=1.0).contains(&threshold) {
            return Err(EngramError::InvalidQuery {
                reason: format!("similarity threshold out of range: {threshold}"),
            });
        }
        if query.len() != self.store.dimension() {
            return Err(EngramError::InvalidQuery {
                reason: format!(
                    "query vector dimension {} does not match store dimension {}",
                    query.len(),
                    self.store.dimension()
                ),
            });
        }
        Ok(())
    }

    /// Ranked candidates: similarity descending (the store's order), each
    /// carrying retention as of `now`.
    pub fn rank(
        &self,
        owner_id: &OwnerId,
        query: &[f32],
        threshold: f64,
        top_k: usize,
        now: DateTime<Utc>,
    ) -> EngramResult<Vec<RankedMemory>> {
        self.validate(query, threshold, top_k)?;

        let hits = self.store.nearest_neighbors(owner_id, query, threshold, top_k)?;
        Ok(hits
            .into_iter()
            .map(|(memory, similarity)| {
                let retention = self.retention.score(&memory, now);
                RankedMemory {
                    memory,
                    similarity,
                    retention,
                }
            })
            .collect())
    }
}
