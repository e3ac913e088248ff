//! # engram-retrieval
//!
//! Composition layer: similarity ranking, reinforcement on access, the
//! resurfacing merge, and the inquiry cache, behind the externally
//! visible [`RetrievalEngine`] operations.

pub mod cache;
pub mod engine;
pub mod ranker;
pub mod reinforcement;

pub use engine::{InquiryOutcome, InquiryRequest, RetrievalEngine, RetrievedMemory};
pub use ranker::{RankedMemory, SimilarityRanker};
pub use reinforcement::ReinforcementUpdater;
