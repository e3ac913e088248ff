use serde::{Deserialize, Serialize};

use super::defaults;

/// Resurfacing policy configuration: which decaying memories are flagged
/// for proactive re-exposure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResurfacingConfig {
    /// Retention below which a memory qualifies for resurfacing.
    pub threshold: f64,
    /// Minimum importance a memory must hold to qualify — decaying
    /// memories that were originally judged worth keeping.
    pub importance_floor: f64,
    /// Maximum memories flagged per evaluation.
    pub max_resurfaced: usize,
}

impl Default for ResurfacingConfig {
    fn default() -> Self {
        Self {
            threshold: defaults::DEFAULT_RESURFACE_THRESHOLD,
            importance_floor: defaults::DEFAULT_RESURFACE_IMPORTANCE_FLOOR,
            max_resurfaced: defaults::DEFAULT_MAX_RESURFACED,
        }
    }
}
