use serde::{Deserialize, Serialize};
use std::fmt;

/// Retention score clamped to [0.0, 1.0].
/// Derived per evaluation from importance, access history, and elapsed
/// time; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct RetentionScore(f64);

impl RetentionScore {
    /// Create a new RetentionScore, clamping to [0.0, 1.0].
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the raw f64 value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for RetentionScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<f64> for RetentionScore {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<RetentionScore> for f64 {
    fn from(r: RetentionScore) -> Self {
        r.0
    }
}
