use serde::{Deserialize, Serialize};

use super::defaults;

/// Reinforcement configuration: the side effects of one access.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReinforcementConfig {
    /// Importance added by one reinforcement, capped at the retention
    /// section's `importance_cap`.
    pub increment: f64,
    /// Attempts (initial try included) before a Conflict is given up on.
    pub max_attempts: u32,
}

impl Default for ReinforcementConfig {
    fn default() -> Self {
        Self {
            increment: defaults::DEFAULT_REINFORCEMENT_INCREMENT,
            max_attempts: defaults::DEFAULT_REINFORCE_MAX_ATTEMPTS,
        }
    }
}
