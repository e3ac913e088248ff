use chrono::{Duration, Utc};
use engram_core::config::RetentionConfig;
use engram_core::memory::{Importance, MemoryRecord, OwnerId};
use engram_retention::RetentionEngine;
use proptest::prelude::*;

fn make_record(importance: f64, access_count: u64, days_ago: i64) -> MemoryRecord {
    let accessed = Utc::now() - Duration::days(days_ago);
    let mut record = MemoryRecord::new(
        OwnerId::from("prop-owner"),
        "raw",
        "summary",
        vec![0.0; 4],
        accessed,
    );
    record.importance = Importance::new(importance);
    record.access_count = access_count;
    record
}

// ── Bounded [0, 1] ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn bounded_zero_to_one(
        importance in 0.0f64..100.0,
        access_count in 0u64..1_000_000,
        days_ago in 0i64..3650,
    ) {
        let engine = RetentionEngine::new(RetentionConfig::default());
        let record = make_record(importance, access_count, days_ago);
        let score = engine.score(&record, Utc::now()).value();
        prop_assert!(
            (0.0..=1.0).contains(&score),
            "out of bounds: {} for importance={} access={} days={}",
            score, importance, access_count, days_ago
        );
    }
}

// ── Monotonically decreasing in elapsed time ─────────────────────────────

proptest! {
    #[test]
    fn decreasing_in_elapsed_time(
        importance in 0.1f64..10.0,
        access_count in 0u64..1000,
    ) {
        let engine = RetentionEngine::new(RetentionConfig::default());
        let now = Utc::now();
        let record = make_record(importance, access_count, 0);

        let mut prev = engine.score(&record, now).value();
        for days in [1, 7, 30, 90, 365] {
            let score = engine.score(&record, now + Duration::days(days)).value();
            prop_assert!(
                score <= prev + f64::EPSILON,
                "not monotonic at day {}: {} > {}",
                days, score, prev
            );
            prev = score;
        }
    }
}

// ── Non-decreasing in access count ───────────────────────────────────────

proptest! {
    #[test]
    fn non_decreasing_in_access_count(
        importance in 0.1f64..10.0,
        days_ago in 0i64..365,
        low in 0u64..100,
        extra in 1u64..100,
    ) {
        let engine = RetentionEngine::new(RetentionConfig::default());
        let now = Utc::now();

        let weak = engine.score(&make_record(importance, low, days_ago), now).value();
        let strong = engine.score(&make_record(importance, low + extra, days_ago), now).value();
        prop_assert!(
            strong >= weak - f64::EPSILON,
            "more accesses retained less: {} accesses -> {}, {} accesses -> {}",
            low, weak, low + extra, strong
        );
    }
}

// ── Importance saturates at the cap ──────────────────────────────────────

proptest! {
    #[test]
    fn importance_above_cap_scores_like_the_cap(
        excess in 0.0f64..50.0,
        access_count in 0u64..100,
        days_ago in 0i64..365,
    ) {
        let config = RetentionConfig::default();
        let engine = RetentionEngine::new(config.clone());
        let now = Utc::now();

        let at_cap = engine
            .score(&make_record(config.importance_cap, access_count, days_ago), now)
            .value();
        let above = engine
            .score(&make_record(config.importance_cap + excess, access_count, days_ago), now)
            .value();
        prop_assert!(
            (at_cap - above).abs() < 1e-12,
            "capped importance must saturate: {} vs {}",
            at_cap, above
        );
    }
}
