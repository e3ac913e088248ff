use serde::{Deserialize, Serialize};
use std::fmt;

/// Importance weight of a memory, non-negative and unbounded above.
/// Starts at 1.0 and is adjusted only by the reinforcement path.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Importance(f64);

impl Importance {
    /// Importance assigned to every memory at creation.
    pub const INITIAL: f64 = 1.0;

    /// Create a new Importance, clamping negatives to 0.0.
    pub fn new(value: f64) -> Self {
        Self(value.max(0.0))
    }

    /// Get the raw f64 value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Importance normalized against `cap`, in [0.0, 1.0]. Values at or
    /// above the cap saturate at 1.0 so unbounded growth cannot push
    /// derived scores past 1.0.
    pub fn normalized(self, cap: f64) -> f64 {
        if cap <= 0.0 {
            return 0.0;
        }
        self.0.min(cap) / cap
    }

    /// Apply one reinforcement increment, saturating at `cap`.
    /// Never decreases: a value already above the cap is left untouched.
    pub fn reinforced(self, increment: f64, cap: f64) -> Self {
        Self::new((self.0 + increment).min(cap).max(self.0))
    }
}

impl Default for Importance {
    fn default() -> Self {
        Self(Self::INITIAL)
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<f64> for Importance {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Importance> for f64 {
    fn from(i: Importance) -> Self {
        i.0
    }
}
