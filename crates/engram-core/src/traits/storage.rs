use crate::errors::EngramResult;
use crate::memory::{MemoryRecord, OwnerId};

/// Owner-scoped CRUD + nearest-neighbor query + versioned reinforcement
/// commit.
///
/// Implementations must guarantee absolute ownership isolation: no method
/// may return or mutate a record owned by a different `OwnerId`. Reads may
/// run concurrently without restriction; `commit_reinforcement` serializes
/// writers per record through its version check.
pub trait MemoryStore: Send + Sync {
    /// Fixed embedding dimension enforced on every write and query.
    fn dimension(&self) -> usize;

    /// Insert a record, or replace it if the id already exists.
    /// Rejects embeddings whose length differs from [`dimension`] with
    /// `DimensionMismatch`, before any mutation.
    ///
    /// [`dimension`]: MemoryStore::dimension
    fn put(&self, memory: &MemoryRecord) -> EngramResult<()>;

    /// Fetch one record. `MemoryNotFound` if the id is unknown or the
    /// record belongs to another owner.
    fn get(&self, owner_id: &OwnerId, id: &str) -> EngramResult<MemoryRecord>;

    /// All records for the owner, in unspecified order.
    fn list(&self, owner_id: &OwnerId) -> EngramResult<Vec<MemoryRecord>>;

    /// Remove one record. `MemoryNotFound` if absent. Removal has no
    /// scoring implications beyond leaving future candidate sets.
    fn delete(&self, owner_id: &OwnerId, id: &str) -> EngramResult<()>;

    /// Up to `top_k` records whose cosine similarity to `query` strictly
    /// exceeds `threshold`, each paired with that similarity, ordered by
    /// similarity descending with ties broken by `created_at` descending.
    fn nearest_neighbors(
        &self,
        owner_id: &OwnerId,
        query: &[f32],
        threshold: f64,
        top_k: usize,
    ) -> EngramResult<Vec<(MemoryRecord, f64)>>;

    /// Atomically write `access_count`, `last_accessed_at`, and
    /// `importance` from `memory` and bump the stored version — but only
    /// if the stored version still equals `expected_version`. Fails with
    /// `Conflict` if the record changed in between, `MemoryNotFound` if it
    /// is gone. The three fields commit together or not at all.
    fn commit_reinforcement(
        &self,
        memory: &MemoryRecord,
        expected_version: u64,
    ) -> EngramResult<()>;

    /// Bump `summary_count` by one for each listed id owned by
    /// `owner_id`. Returns the number of records updated; ids that do not
    /// resolve are skipped.
    fn increment_summary_counts(&self, owner_id: &OwnerId, ids: &[String]) -> EngramResult<usize>;
}
