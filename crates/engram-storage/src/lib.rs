//! # engram-storage
//!
//! SQLite persistence for the engram memory system: single-writer WAL
//! connection pool, `user_version`-tracked migrations, owner-scoped CRUD,
//! a brute-force cosine nearest-neighbor scan, and the version-guarded
//! reinforcement commit.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use engram_core::errors::{EngramError, StorageError};

/// Wrap a low-level SQLite message into the storage error taxonomy.
pub(crate) fn to_storage_err(message: impl Into<String>) -> EngramError {
    EngramError::StorageError(StorageError::SqliteError {
        message: message.into(),
    })
}
