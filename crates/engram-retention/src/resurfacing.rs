//! Resurfacing: proactive re-exposure of decaying-but-important memories.
//!
//! Evaluated over an owner's entire record set, independently of any
//! similarity search. Read-only with respect to persisted state.

use chrono::{DateTime, Utc};

use engram_core::config::ResurfacingConfig;
use engram_core::memory::{MemoryRecord, RetentionScore};

use crate::engine::RetentionEngine;

/// One memory flagged for resurfacing, with the retention that earned it.
#[derive(Debug, Clone)]
pub struct ResurfacingCandidate {
    pub memory: MemoryRecord,
    pub retention: RetentionScore,
}

/// Selection policy over an owner's full record set.
#[derive(Debug, Clone)]
pub struct ResurfacingPolicy {
    config: ResurfacingConfig,
}

impl ResurfacingPolicy {
    pub fn new(config: ResurfacingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResurfacingConfig {
        &self.config
    }

    /// Whether one memory qualifies: fading below the threshold while
    /// still important enough to have been worth keeping.
    pub fn qualifies(&self, memory: &MemoryRecord, retention: RetentionScore) -> bool {
        retention.value() < self.config.threshold
            && memory.importance.value() >= self.config.importance_floor
    }

    /// Select up to `max_resurfaced` qualifying memories, most urgently
    /// fading first (lowest retention), ties broken by `created_at`
    /// ascending so the oldest surfaces first.
    pub fn select(
        &self,
        engine: &RetentionEngine,
        memories: &[MemoryRecord],
        now: DateTime<Utc>,
    ) -> Vec<ResurfacingCandidate> {
        let scores = engine.score_batch(memories, now);

        let mut qualifying: Vec<ResurfacingCandidate> = memories
            .iter()
            .zip(scores)
            .filter(|(memory, retention)| self.qualifies(memory, *retention))
            .map(|(memory, retention)| ResurfacingCandidate {
                memory: memory.clone(),
                retention,
            })
            .collect();

        qualifying.sort_by(|a, b| {
            a.retention
                .partial_cmp(&b.retention)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.memory.created_at.cmp(&b.memory.created_at))
        });
        qualifying.truncate(self.config.max_resurfaced);
        qualifying
    }
}

impl Default for ResurfacingPolicy {
    fn default() -> Self {
        Self::new(ResurfacingConfig::default())
    }
}
