//! # engram-core
//!
//! Foundation crate for the engram memory system.
//! Defines domain types, errors, configuration, constants, and the storage
//! trait. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod memory;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::EngramConfig;
pub use errors::{EngramError, EngramResult};
pub use memory::{Importance, MemoryRecord, OwnerId, RetentionScore};
pub use traits::MemoryStore;
