//! # engram-retention
//!
//! Pure retention scoring: an exponential forgetting curve whose stability
//! stretches with each reinforcement, plus the resurfacing policy that
//! flags decaying-but-important memories for re-exposure.
//!
//! Everything here is synchronous and side-effect-free.

pub mod engine;
pub mod formula;
pub mod resurfacing;

pub use engine::RetentionEngine;
pub use formula::RetentionBreakdown;
pub use resurfacing::{ResurfacingCandidate, ResurfacingPolicy};
