use chrono::{DateTime, Utc};
use rayon::prelude::*;

use engram_core::config::RetentionConfig;
use engram_core::memory::{MemoryRecord, RetentionScore};

use crate::formula::{self, RetentionBreakdown};

/// Applies the forgetting curve to records.
///
/// Holds the immutable curve constants; safe to call from any number of
/// concurrent evaluators.
#[derive(Debug, Clone)]
pub struct RetentionEngine {
    config: RetentionConfig,
}

impl RetentionEngine {
    pub fn new(config: RetentionConfig) -> Self {
        Self { config }
    }

    /// The curve constants in effect.
    pub fn config(&self) -> &RetentionConfig {
        &self.config
    }

    /// Score one record at `now`.
    pub fn score(&self, memory: &MemoryRecord, now: DateTime<Utc>) -> RetentionScore {
        formula::compute(
            memory.importance,
            memory.access_count,
            memory.last_accessed_at,
            now,
            &self.config,
        )
    }

    /// Score one record with each curve term broken out.
    pub fn breakdown(&self, memory: &MemoryRecord, now: DateTime<Utc>) -> RetentionBreakdown {
        formula::compute_breakdown(
            memory.importance,
            memory.access_count,
            memory.last_accessed_at,
            now,
            &self.config,
        )
    }

    /// Score a batch in parallel. Output order matches the input slice.
    pub fn score_batch(
        &self,
        memories: &[MemoryRecord],
        now: DateTime<Utc>,
    ) -> Vec<RetentionScore> {
        memories.par_iter().map(|m| self.score(m, now)).collect()
    }
}

impl Default for RetentionEngine {
    fn default() -> Self {
        Self::new(RetentionConfig::default())
    }
}
