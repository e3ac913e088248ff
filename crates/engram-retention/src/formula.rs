use chrono::{DateTime, Utc};

use engram_core::config::RetentionConfig;
use engram_core::memory::{Importance, RetentionScore};

/// The forgetting curve.
///
/// ```text
/// retention = importance_normalized × e^(-elapsed_days / stability)
/// stability = base_stability_days × (1 + access_count)
/// ```
///
/// `importance_normalized = min(importance, cap) / cap`, so the score stays
/// in [0, 1] regardless of unbounded importance growth. A just-accessed
/// memory (`elapsed_days = 0`) scores exactly its normalized importance.
pub fn compute(
    importance: Importance,
    access_count: u64,
    last_accessed_at: DateTime<Utc>,
    now: DateTime<Utc>,
    config: &RetentionConfig,
) -> RetentionScore {
    let normalized = importance.normalized(config.importance_cap);
    let elapsed = elapsed_days(last_accessed_at, now);
    // Guard the division against a zero base stability.
    let stability = stability_days(access_count, config).max(f64::EPSILON);

    RetentionScore::new(normalized * (-elapsed / stability).exp())
}

/// Days since `last_accessed_at`, fractional, clamped at zero so a clock
/// running behind the record never produces negative decay.
pub fn elapsed_days(last_accessed_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - last_accessed_at).num_seconds().max(0) as f64 / 86400.0
}

/// Effective stability in days. Each reinforcement stretches the curve,
/// mirroring spaced-repetition strengthening: `access_count = 0` decays
/// fastest.
pub fn stability_days(access_count: u64, config: &RetentionConfig) -> f64 {
    config.base_stability_days * (1.0 + access_count as f64)
}

/// Per-term breakdown for debugging/observability.
#[derive(Debug, Clone)]
pub struct RetentionBreakdown {
    pub importance_normalized: f64,
    pub elapsed_days: f64,
    pub stability_days: f64,
    pub score: RetentionScore,
}

/// Compute retention with each term of the curve broken out.
pub fn compute_breakdown(
    importance: Importance,
    access_count: u64,
    last_accessed_at: DateTime<Utc>,
    now: DateTime<Utc>,
    config: &RetentionConfig,
) -> RetentionBreakdown {
    let importance_normalized = importance.normalized(config.importance_cap);
    let elapsed = elapsed_days(last_accessed_at, now);
    let stability = stability_days(access_count, config);
    let score = RetentionScore::new(
        importance_normalized * (-elapsed / stability.max(f64::EPSILON)).exp(),
    );

    RetentionBreakdown {
        importance_normalized,
        elapsed_days: elapsed,
        stability_days: stability,
        score,
    }
}
