//! RetrievalEngine: the externally visible operations, composed from the
//! ranker, the resurfacing policy, and the reinforcement updater.
//!
//! Inquiry pipeline: validate → rank → resurface → merge → reinforce →
//! assemble.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use engram_core::config::EngramConfig;
use engram_core::errors::{EngramError, EngramResult};
use engram_core::memory::{MemoryRecord, OwnerId, RetentionScore};
use engram_core::traits::MemoryStore;
use engram_retention::{ResurfacingPolicy, RetentionEngine};

use crate::cache::QueryCache;
use crate::ranker::SimilarityRanker;
use crate::reinforcement::ReinforcementUpdater;

/// One entry of an inquiry result.
///
/// Retention is the value computed at ranking time, before the access
/// itself was recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedMemory {
    pub id: String,
    pub summary: String,
    /// Present for similarity matches; `None` for appended
    /// resurfaced-only entries.
    pub similarity: Option<f64>,
    pub retention: RetentionScore,
    pub is_resurfaced: bool,
}

/// Inquiry input, assembled by the API layer. Raw query text must be
/// resolved to a vector by the external embedding service first.
#[derive(Debug, Clone)]
pub struct InquiryRequest {
    pub owner_id: OwnerId,
    pub query_vector: Vec<f32>,
    pub similarity_threshold: f64,
    pub top_k: usize,
    pub now: DateTime<Utc>,
}

/// Terminal outcomes of one inquiry. Failures travel as `EngramError`.
#[derive(Debug, Clone)]
pub enum InquiryOutcome {
    /// Ranked, annotated results: similarity matches first (similarity
    /// descending), then appended resurfaced-only memories (retention
    /// ascending).
    Success(Vec<RetrievedMemory>),
    /// No candidate exceeded the threshold and nothing resurfaced — not
    /// an error.
    Empty,
}

/// The query orchestrator and boundary contract for the API layer.
pub struct RetrievalEngine<'a> {
    store: &'a dyn MemoryStore,
    retention: RetentionEngine,
    resurfacing: ResurfacingPolicy,
    config: EngramConfig,
    cache: Option<QueryCache>,
}

impl<'a> RetrievalEngine<'a> {
    pub fn new(store: &'a dyn MemoryStore, config: EngramConfig) -> Self {
        let cache = (config.retrieval.cache_capacity > 0)
            .then(|| QueryCache::new(config.retrieval.cache_capacity));
        Self {
            store,
            retention: RetentionEngine::new(config.retention.clone()),
            resurfacing: ResurfacingPolicy::new(config.resurfacing.clone()),
            config,
            cache,
        }
    }

    /// Run one inquiry end to end.
    pub fn inquire(&self, request: &InquiryRequest) -> EngramResult<InquiryOutcome> {
        let ranker = SimilarityRanker::new(self.store, &self.retention);
        ranker.validate(
            &request.query_vector,
            request.similarity_threshold,
            request.top_k,
        )?;

        if let Some(cache) = &self.cache {
            if let Some(results) = cache.get(
                &request.owner_id,
                &request.query_vector,
                request.similarity_threshold,
                request.top_k,
            ) {
                debug!(owner = %request.owner_id, "inquiry served from cache");
                return Ok(Self::outcome(results.as_ref().clone()));
            }
        }

        // Step 1: Similarity candidates with fresh retention.
        let ranked = ranker.rank(
            &request.owner_id,
            &request.query_vector,
            request.similarity_threshold,
            request.top_k,
            request.now,
        )?;
        debug!(candidates = ranked.len(), "similarity ranking complete");

        // Step 2: Independent resurfacing pass over the whole owner set.
        let all = self.store.list(&request.owner_id)?;
        let resurfaced = self
            .resurfacing
            .select(&self.retention, &all, request.now);
        debug!(resurfaced = resurfaced.len(), "resurfacing evaluation complete");

        // Step 3: Merge by id. Similarity hits that also qualify are
        // annotated; qualifiers outside the hits are appended (already in
        // retention-ascending order) up to the cap.
        let resurfaced_ids: HashSet<&str> =
            resurfaced.iter().map(|c| c.memory.id.as_str()).collect();
        let ranked_ids: HashSet<&str> = ranked.iter().map(|r| r.memory.id.as_str()).collect();

        let mut results: Vec<RetrievedMemory> = ranked
            .iter()
            .map(|r| RetrievedMemory {
                id: r.memory.id.clone(),
                summary: r.memory.summary.clone(),
                similarity: Some(r.similarity),
                retention: r.retention,
                is_resurfaced: resurfaced_ids.contains(r.memory.id.as_str()),
            })
            .collect();
        results.extend(
            resurfaced
                .iter()
                .filter(|c| !ranked_ids.contains(c.memory.id.as_str()))
                .take(self.config.retrieval.resurfaced_append_cap)
                .map(|c| RetrievedMemory {
                    id: c.memory.id.clone(),
                    summary: c.memory.summary.clone(),
                    similarity: None,
                    retention: c.retention,
                    is_resurfaced: true,
                }),
        );

        if results.is_empty() {
            info!(owner = %request.owner_id, "inquiry matched nothing");
            if let Some(cache) = &self.cache {
                cache.insert(
                    &request.owner_id,
                    &request.query_vector,
                    request.similarity_threshold,
                    request.top_k,
                    Arc::new(Vec::new()),
                );
            }
            return Ok(InquiryOutcome::Empty);
        }

        // Step 4: Record the access on every returned memory. Each commit
        // is independently atomic; a record that keeps moving or vanished
        // mid-flight is skipped rather than failing the whole result.
        let updater = ReinforcementUpdater::new(
            self.store,
            self.config.reinforcement.clone(),
            self.config.retention.importance_cap,
        );
        for entry in &results {
            match updater.reinforce_with_retry(&request.owner_id, &entry.id, request.now) {
                Ok(_) => {}
                Err(e @ (EngramError::Conflict { .. } | EngramError::MemoryNotFound { .. })) => {
                    warn!(id = %entry.id, error = %e, "skipping reinforcement for returned memory");
                }
                Err(e) => return Err(e),
            }
        }

        if let Some(cache) = &self.cache {
            // Reinforcement moved the owner's state; cache under the new
            // generation.
            cache.invalidate_owner(&request.owner_id);
            cache.insert(
                &request.owner_id,
                &request.query_vector,
                request.similarity_threshold,
                request.top_k,
                Arc::new(results.clone()),
            );
        }

        info!(
            owner = %request.owner_id,
            results = results.len(),
            "inquiry complete"
        );
        Ok(InquiryOutcome::Success(results))
    }

    /// All of an owner's memories with fresh retention, without
    /// triggering reinforcement (chronological/archival views).
    pub fn list_all(
        &self,
        owner_id: &OwnerId,
        now: DateTime<Utc>,
    ) -> EngramResult<Vec<(MemoryRecord, RetentionScore)>> {
        let memories = self.store.list(owner_id)?;
        let scores = self.retention.score_batch(&memories, now);
        Ok(memories.into_iter().zip(scores).collect())
    }

    /// Create a memory with ingestion defaults from externally produced
    /// text, summary, and embedding.
    pub fn ingest(
        &self,
        owner_id: OwnerId,
        raw_text: impl Into<String>,
        summary: impl Into<String>,
        embedding: Vec<f32>,
        now: DateTime<Utc>,
    ) -> EngramResult<MemoryRecord> {
        let record = MemoryRecord::new(owner_id, raw_text, summary, embedding, now);
        self.store.put(&record)?;
        if let Some(cache) = &self.cache {
            cache.invalidate_owner(&record.owner_id);
        }
        info!(owner = %record.owner_id, id = %record.id, "memory ingested");
        Ok(record)
    }

    /// Fetch one memory and record the access — an explicit view counts
    /// as reinforcement. Returns the reinforced record and its retention
    /// as of the moment before the view.
    pub fn view(
        &self,
        owner_id: &OwnerId,
        id: &str,
        now: DateTime<Utc>,
    ) -> EngramResult<(MemoryRecord, RetentionScore)> {
        let current = self.store.get(owner_id, id)?;
        let retention = self.retention.score(&current, now);

        let updater = ReinforcementUpdater::new(
            self.store,
            self.config.reinforcement.clone(),
            self.config.retention.importance_cap,
        );
        let updated = updater.reinforce_with_retry(owner_id, id, now)?;
        if let Some(cache) = &self.cache {
            cache.invalidate_owner(owner_id);
        }
        Ok((updated, retention))
    }

    /// Remove one memory.
    pub fn delete(&self, owner_id: &OwnerId, id: &str) -> EngramResult<()> {
        self.store.delete(owner_id, id)?;
        if let Some(cache) = &self.cache {
            cache.invalidate_owner(owner_id);
        }
        info!(owner = %owner_id, id, "memory deleted");
        Ok(())
    }

    /// Record that an external summary consumed these memories.
    pub fn record_summarization(&self, owner_id: &OwnerId, ids: &[String]) -> EngramResult<usize> {
        let updated = self.store.increment_summary_counts(owner_id, ids)?;
        if updated > 0 {
            if let Some(cache) = &self.cache {
                cache.invalidate_owner(owner_id);
            }
        }
        debug!(owner = %owner_id, updated, "summary counts recorded");
        Ok(updated)
    }

    fn outcome(results: Vec<RetrievedMemory>) -> InquiryOutcome {
        if results.is_empty() {
            InquiryOutcome::Empty
        } else {
            InquiryOutcome::Success(results)
        }
    }
}
