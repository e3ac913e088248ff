use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::importance::Importance;
use super::owner::OwnerId;

/// The unit of stored knowledge. Every persisted memory is a MemoryRecord.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// UUID v4 identifier, immutable, assigned at creation.
    pub id: String,
    /// Exclusive owner; every operation is scoped by it.
    pub owner_id: OwnerId,
    /// Original captured text.
    pub raw_text: String,
    /// Condensed form produced by the external summarizer. May be
    /// regenerated; regenerations are counted by `summary_count`.
    pub summary: String,
    /// Embedding produced by the external embedder. Dimension must equal
    /// the store's configured dimension.
    pub embedding: Vec<f32>,
    /// Importance weight, adjusted only by the reinforcement path.
    pub importance: Importance,
    /// Number of times this memory was returned to a user or viewed.
    pub access_count: u64,
    /// Number of times an external summary consumed this memory.
    pub summary_count: u64,
    /// Set once at creation.
    pub created_at: DateTime<Utc>,
    /// Advances monotonically on each access; never moves backward.
    pub last_accessed_at: DateTime<Utc>,
    /// Optimistic-concurrency token, bumped by every committed write.
    /// Not part of the external contract.
    pub version: u64,
}

impl MemoryRecord {
    /// Create a record with ingestion defaults: importance 1.0, zero
    /// counters, `last_accessed_at` equal to `created_at`.
    pub fn new(
        owner_id: OwnerId,
        raw_text: impl Into<String>,
        summary: impl Into<String>,
        embedding: Vec<f32>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            owner_id,
            raw_text: raw_text.into(),
            summary: summary.into(),
            embedding,
            importance: Importance::default(),
            access_count: 0,
            summary_count: 0,
            created_at: now,
            last_accessed_at: now,
            version: 0,
        }
    }

    /// Embedding dimension carried by this record.
    pub fn dimension(&self) -> usize {
        self.embedding.len()
    }
}

/// Identity equality: two records are equal if they share an id.
///
/// A record's identity is its UUID, not its content — content changes
/// (re-summarization, reinforcement) leave it the same memory.
impl PartialEq for MemoryRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
