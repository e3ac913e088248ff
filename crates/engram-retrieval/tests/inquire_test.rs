use chrono::{DateTime, Duration, Utc};
use engram_core::config::EngramConfig;
use engram_core::errors::EngramError;
use engram_core::memory::{MemoryRecord, OwnerId};
use engram_core::traits::MemoryStore;
use engram_retrieval::{InquiryOutcome, InquiryRequest, RetrievalEngine};
use engram_storage::StorageEngine;

const DIM: usize = 4;

fn store() -> StorageEngine {
    StorageEngine::open_in_memory(DIM).unwrap()
}

/// Config with resurfacing effectively disabled, so similarity tests see
/// only similarity results.
fn similarity_only_config() -> EngramConfig {
    let mut config = EngramConfig::default();
    config.store.dimension = DIM;
    config.resurfacing.importance_floor = 100.0;
    config
}

fn seed(
    store: &StorageEngine,
    owner: &str,
    embedding: Vec<f32>,
    created_at: DateTime<Utc>,
) -> MemoryRecord {
    let record = MemoryRecord::new(OwnerId::from(owner), "raw text", "summary", embedding, created_at);
    store.put(&record).unwrap();
    record
}

fn request(owner: &str, query: Vec<f32>, threshold: f64, top_k: usize, now: DateTime<Utc>) -> InquiryRequest {
    InquiryRequest {
        owner_id: OwnerId::from(owner),
        query_vector: query,
        similarity_threshold: threshold,
        top_k,
        now,
    }
}

// ── Similarity pipeline ──────────────────────────────────────────────────

#[test]
fn three_of_ten_exceed_threshold_sorted_descending() {
    let store = store();
    let now = Utc::now();
    let embeddings: Vec<Vec<f32>> = vec![
        vec![1.0, 0.0, 0.0, 0.0],
        vec![0.9, 0.1, 0.0, 0.0],
        vec![0.8, 0.2, 0.0, 0.0],
        vec![0.5, 0.5, 0.5, 0.5],
        vec![0.2, 0.8, 0.0, 0.0],
        vec![0.1, 0.9, 0.0, 0.0],
        vec![0.0, 1.0, 0.0, 0.0],
        vec![0.0, 0.0, 1.0, 0.0],
        vec![0.0, 0.0, 0.0, 1.0],
        vec![-1.0, 0.0, 0.0, 0.0],
    ];
    for embedding in embeddings {
        seed(&store, "owner-a", embedding, now);
    }

    let engine = RetrievalEngine::new(&store, similarity_only_config());
    let outcome = engine
        .inquire(&request("owner-a", vec![1.0, 0.0, 0.0, 0.0], 0.7, 5, now))
        .unwrap();

    let results = match outcome {
        InquiryOutcome::Success(results) => results,
        InquiryOutcome::Empty => panic!("expected results"),
    };
    assert_eq!(results.len(), 3, "exactly three candidates exceed 0.7");
    let similarities: Vec<f64> = results.iter().map(|r| r.similarity.unwrap()).collect();
    assert!(similarities.windows(2).all(|w| w[0] >= w[1]));
    assert!(similarities.iter().all(|s| *s > 0.7));
    assert!(results.iter().all(|r| !r.is_resurfaced));
}

#[test]
fn empty_outcome_when_nothing_matches_and_nothing_resurfaces() {
    let store = store();
    let now = Utc::now();
    seed(&store, "owner-a", vec![0.0, 1.0, 0.0, 0.0], now);

    let engine = RetrievalEngine::new(&store, similarity_only_config());
    let outcome = engine
        .inquire(&request("owner-a", vec![1.0, 0.0, 0.0, 0.0], 0.7, 5, now))
        .unwrap();
    assert!(matches!(outcome, InquiryOutcome::Empty));
}

// ── Resurfacing merge ────────────────────────────────────────────────────

#[test]
fn similarity_hit_that_qualifies_is_flagged_resurfaced() {
    let store = store();
    let now = Utc::now();
    // Importance 1.0, just created: retention = 1.0/5.0 = 0.2 < 0.5, so
    // it qualifies for resurfacing under the default policy.
    let record = seed(&store, "owner-a", vec![1.0, 0.0, 0.0, 0.0], now);

    let mut config = EngramConfig::default();
    config.store.dimension = DIM;
    let engine = RetrievalEngine::new(&store, config);
    let outcome = engine
        .inquire(&request("owner-a", vec![1.0, 0.0, 0.0, 0.0], 0.7, 5, now))
        .unwrap();

    let results = match outcome {
        InquiryOutcome::Success(results) => results,
        InquiryOutcome::Empty => panic!("expected results"),
    };
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, record.id);
    assert!(results[0].similarity.is_some());
    assert!(results[0].is_resurfaced, "qualifying hit must carry the flag");
    assert!((results[0].retention.value() - 0.2).abs() < 1e-9);
}

#[test]
fn resurfaced_only_memories_append_after_matches_by_urgency() {
    let store = store();
    let now = Utc::now();
    let matching = seed(&store, "owner-a", vec![1.0, 0.0, 0.0, 0.0], now);

    // Orthogonal to the query, fading for different lengths of time.
    let mut fading = MemoryRecord::new(
        OwnerId::from("owner-a"),
        "raw",
        "summary",
        vec![0.0, 1.0, 0.0, 0.0],
        now - Duration::days(20),
    );
    fading.last_accessed_at = now - Duration::days(20);
    store.put(&fading).unwrap();

    let mut faded_worse = MemoryRecord::new(
        OwnerId::from("owner-a"),
        "raw",
        "summary",
        vec![0.0, 0.0, 1.0, 0.0],
        now - Duration::days(40),
    );
    faded_worse.last_accessed_at = now - Duration::days(40);
    store.put(&faded_worse).unwrap();

    let mut config = EngramConfig::default();
    config.store.dimension = DIM;
    let engine = RetrievalEngine::new(&store, config);
    let outcome = engine
        .inquire(&request("owner-a", vec![1.0, 0.0, 0.0, 0.0], 0.7, 5, now))
        .unwrap();

    let results = match outcome {
        InquiryOutcome::Success(results) => results,
        InquiryOutcome::Empty => panic!("expected results"),
    };
    assert_eq!(results.len(), 3);

    // Similarity match leads.
    assert_eq!(results[0].id, matching.id);
    assert!(results[0].similarity.is_some());

    // Appended resurfaced-only entries follow, most urgently fading
    // first, with no similarity attached.
    assert_eq!(results[1].id, faded_worse.id);
    assert_eq!(results[2].id, fading.id);
    assert!(results[1].similarity.is_none());
    assert!(results[2].similarity.is_none());
    assert!(results[1].is_resurfaced && results[2].is_resurfaced);
    assert!(results[1].retention <= results[2].retention);
}

#[test]
fn resurfaced_append_cap_is_enforced() {
    let store = store();
    let now = Utc::now();
    seed(&store, "owner-a", vec![1.0, 0.0, 0.0, 0.0], now);
    for i in 0..4 {
        let mut fading = MemoryRecord::new(
            OwnerId::from("owner-a"),
            "raw",
            "summary",
            vec![0.0, 1.0, 0.0, i as f32 + 1.0],
            now - Duration::days(30),
        );
        fading.last_accessed_at = now - Duration::days(30);
        store.put(&fading).unwrap();
    }

    let mut config = EngramConfig::default();
    config.store.dimension = DIM;
    config.retrieval.resurfaced_append_cap = 1;
    let engine = RetrievalEngine::new(&store, config);
    let outcome = engine
        .inquire(&request("owner-a", vec![1.0, 0.0, 0.0, 0.0], 0.7, 5, now))
        .unwrap();

    let results = match outcome {
        InquiryOutcome::Success(results) => results,
        InquiryOutcome::Empty => panic!("expected results"),
    };
    assert_eq!(results.len(), 2, "one match plus one appended");
    assert_eq!(results.iter().filter(|r| r.similarity.is_none()).count(), 1);
}

// ── Reinforcement side effects ───────────────────────────────────────────

#[test]
fn every_returned_memory_is_reinforced() {
    let store = store();
    let created = Utc::now() - Duration::hours(1);
    let record = seed(&store, "owner-a", vec![1.0, 0.0, 0.0, 0.0], created);

    let now = Utc::now();
    let engine = RetrievalEngine::new(&store, similarity_only_config());
    engine
        .inquire(&request("owner-a", vec![1.0, 0.0, 0.0, 0.0], 0.7, 5, now))
        .unwrap();

    let loaded = store.get(&record.owner_id, &record.id).unwrap();
    assert_eq!(loaded.access_count, 1);
    assert!((loaded.importance.value() - 1.1).abs() < 1e-12);
    assert_eq!(loaded.last_accessed_at, now);
}

#[test]
fn unreturned_memories_are_not_reinforced() {
    let store = store();
    let now = Utc::now();
    seed(&store, "owner-a", vec![1.0, 0.0, 0.0, 0.0], now);
    let far = seed(&store, "owner-a", vec![0.0, 1.0, 0.0, 0.0], now);

    let engine = RetrievalEngine::new(&store, similarity_only_config());
    engine
        .inquire(&request("owner-a", vec![1.0, 0.0, 0.0, 0.0], 0.7, 5, now))
        .unwrap();

    let loaded = store.get(&far.owner_id, &far.id).unwrap();
    assert_eq!(loaded.access_count, 0, "non-result must stay untouched");
}

// ── Input validation ─────────────────────────────────────────────────────

#[test]
fn malformed_inquiries_are_rejected() {
    let store = store();
    let now = Utc::now();
    let engine = RetrievalEngine::new(&store, similarity_only_config());

    let zero_top_k = engine
        .inquire(&request("owner-a", vec![1.0, 0.0, 0.0, 0.0], 0.7, 0, now))
        .unwrap_err();
    assert!(matches!(zero_top_k, EngramError::InvalidQuery { .. }));

    let bad_threshold = engine
        .inquire(&request("owner-a", vec![1.0, 0.0, 0.0, 0.0], 1.5, 5, now))
        .unwrap_err();
    assert!(matches!(bad_threshold, EngramError::InvalidQuery { .. }));

    let nan_threshold = engine
        .inquire(&request("owner-a", vec![1.0, 0.0, 0.0, 0.0], f64::NAN, 5, now))
        .unwrap_err();
    assert!(matches!(nan_threshold, EngramError::InvalidQuery { .. }));

    let bad_dimension = engine
        .inquire(&request("owner-a", vec![1.0, 0.0], 0.7, 5, now))
        .unwrap_err();
    assert!(matches!(bad_dimension, EngramError::InvalidQuery { .. }));
}

// ── Ownership isolation ──────────────────────────────────────────────────

#[test]
fn inquiry_never_crosses_owners() {
    let store = store();
    let now = Utc::now();
    let mine = seed(&store, "owner-a", vec![1.0, 0.0, 0.0, 0.0], now);
    let theirs = seed(&store, "owner-b", vec![1.0, 0.0, 0.0, 0.0], now);

    let engine = RetrievalEngine::new(&store, similarity_only_config());
    let outcome = engine
        .inquire(&request("owner-a", vec![1.0, 0.0, 0.0, 0.0], 0.7, 10, now))
        .unwrap();

    let results = match outcome {
        InquiryOutcome::Success(results) => results,
        InquiryOutcome::Empty => panic!("expected results"),
    };
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, mine.id);

    // The other owner's record was neither returned nor reinforced.
    let untouched = store.get(&theirs.owner_id, &theirs.id).unwrap();
    assert_eq!(untouched.access_count, 0);
}

// ── Caching ──────────────────────────────────────────────────────────────

#[test]
fn repeat_inquiry_is_served_from_cache_without_reinforcing() {
    let store = store();
    let now = Utc::now();
    let record = seed(&store, "owner-a", vec![1.0, 0.0, 0.0, 0.0], now);

    let engine = RetrievalEngine::new(&store, similarity_only_config());
    let req = request("owner-a", vec![1.0, 0.0, 0.0, 0.0], 0.7, 5, now);

    let first = engine.inquire(&req).unwrap();
    assert_eq!(store.get(&record.owner_id, &record.id).unwrap().access_count, 1);

    let second = engine.inquire(&req).unwrap();
    assert_eq!(
        store.get(&record.owner_id, &record.id).unwrap().access_count,
        1,
        "a cache hit must not reinforce again"
    );

    match (first, second) {
        (InquiryOutcome::Success(a), InquiryOutcome::Success(b)) => assert_eq!(a, b),
        _ => panic!("both inquiries should succeed"),
    }
}

#[test]
fn ingest_invalidates_cached_inquiries() {
    let store = store();
    let now = Utc::now();
    seed(&store, "owner-a", vec![1.0, 0.0, 0.0, 0.0], now);

    let engine = RetrievalEngine::new(&store, similarity_only_config());
    let req = request("owner-a", vec![1.0, 0.0, 0.0, 0.0], 0.7, 5, now);
    engine.inquire(&req).unwrap();

    // A new matching memory lands; the cached result is now stale.
    engine
        .ingest(
            OwnerId::from("owner-a"),
            "newer raw",
            "newer summary",
            vec![0.9, 0.1, 0.0, 0.0],
            now,
        )
        .unwrap();

    let outcome = engine.inquire(&req).unwrap();
    let results = match outcome {
        InquiryOutcome::Success(results) => results,
        InquiryOutcome::Empty => panic!("expected results"),
    };
    assert_eq!(results.len(), 2, "cache must have been invalidated");
}

#[test]
fn cache_capacity_zero_disables_caching() {
    let store = store();
    let now = Utc::now();
    let record = seed(&store, "owner-a", vec![1.0, 0.0, 0.0, 0.0], now);

    let mut config = similarity_only_config();
    config.retrieval.cache_capacity = 0;
    let engine = RetrievalEngine::new(&store, config);
    let req = request("owner-a", vec![1.0, 0.0, 0.0, 0.0], 0.7, 5, now);

    engine.inquire(&req).unwrap();
    engine.inquire(&req).unwrap();
    assert_eq!(
        store.get(&record.owner_id, &record.id).unwrap().access_count,
        2,
        "without a cache every inquiry reinforces"
    );
}
