use serde::{Deserialize, Serialize};

use super::defaults;

/// Forgetting-curve configuration.
///
/// `stability = base_stability_days * (1 + access_count)`; each
/// reinforcement stretches the effective half-life the way spaced
/// repetition strengthens recall.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionConfig {
    /// Stability of a never-reinforced memory, in days.
    pub base_stability_days: f64,
    /// Importance value at which normalized importance saturates at 1.0.
    /// Keeps retention in [0, 1] no matter how far importance grows.
    pub importance_cap: f64,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            base_stability_days: defaults::DEFAULT_BASE_STABILITY_DAYS,
            importance_cap: defaults::DEFAULT_IMPORTANCE_CAP,
        }
    }
}
