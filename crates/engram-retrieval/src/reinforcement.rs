//! Reinforcement: the side effects of one access, applied atomically.

use chrono::{DateTime, Utc};
use tracing::debug;

use engram_core::config::ReinforcementConfig;
use engram_core::errors::{EngramError, EngramResult};
use engram_core::memory::{MemoryRecord, OwnerId};
use engram_core::traits::MemoryStore;

/// Applies access-time side effects: bump `access_count`, advance
/// `last_accessed_at` (never backward), grow `importance` up to the cap.
///
/// Each commit is an optimistic read-modify-write; a record that changed
/// underneath surfaces as `Conflict` for the caller to retry with fresh
/// state.
pub struct ReinforcementUpdater<'a> {
    store: &'a dyn MemoryStore,
    config: ReinforcementConfig,
    importance_cap: f64,
}

impl<'a> ReinforcementUpdater<'a> {
    pub fn new(
        store: &'a dyn MemoryStore,
        config: ReinforcementConfig,
        importance_cap: f64,
    ) -> Self {
        Self {
            store,
            config,
            importance_cap,
        }
    }

    /// One read-modify-write attempt. Returns the record as committed.
    pub fn reinforce(
        &self,
        owner_id: &OwnerId,
        id: &str,
        now: DateTime<Utc>,
    ) -> EngramResult<MemoryRecord> {
        let current = self.store.get(owner_id, id)?;
        let mut updated = reinforced_state(&current, now, self.config.increment, self.importance_cap);
        self.store.commit_reinforcement(&updated, current.version)?;
        updated.version = current.version + 1;
        Ok(updated)
    }

    /// Retry wrapper: re-reads and reapplies on `Conflict`, up to
    /// `max_attempts` tries in total.
    pub fn reinforce_with_retry(
        &self,
        owner_id: &OwnerId,
        id: &str,
        now: DateTime<Utc>,
    ) -> EngramResult<MemoryRecord> {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.reinforce(owner_id, id, now) {
                Err(EngramError::Conflict { id: conflicted }) if attempt < max_attempts => {
                    debug!(id = %conflicted, attempt, "reinforcement conflict, retrying with fresh state");
                }
                other => return other,
            }
        }
    }
}

/// Compute the post-access state of a record. Pure; the commit decides
/// whether it lands.
fn reinforced_state(
    current: &MemoryRecord,
    now: DateTime<Utc>,
    increment: f64,
    importance_cap: f64,
) -> MemoryRecord {
    let mut updated = current.clone();
    updated.access_count = current.access_count + 1;
    // last_accessed_at never regresses.
    if now > updated.last_accessed_at {
        updated.last_accessed_at = now;
    }
    updated.importance = current.importance.reinforced(increment, importance_cap);
    updated
}
