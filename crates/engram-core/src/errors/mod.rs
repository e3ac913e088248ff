//! Error taxonomy for the engram workspace.

pub mod storage_error;

pub use storage_error::StorageError;

/// Convenience alias used across every crate in the workspace.
pub type EngramResult<T> = Result<T, EngramError>;

/// Top-level error for all engram operations.
#[derive(Debug, thiserror::Error)]
pub enum EngramError {
    /// Unknown id, or the record belongs to a different owner.
    /// Non-retryable.
    #[error("memory not found: {id}")]
    MemoryNotFound { id: String },

    /// Embedding shape rejected before any store mutation.
    /// Non-retryable until the vector is corrected.
    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Malformed query input (bad top_k, out-of-range threshold).
    #[error("invalid query: {reason}")]
    InvalidQuery { reason: String },

    /// Optimistic-concurrency failure during reinforcement.
    /// Retryable: re-read the record and reapply.
    #[error("concurrent update conflict on memory {id}")]
    Conflict { id: String },

    #[error("config error: {reason}")]
    ConfigError { reason: String },

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl EngramError {
    /// Whether the caller may retry the failed operation.
    /// `Conflict` wants a re-read first; `Unavailable` wants backoff.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            EngramError::Conflict { .. }
                | EngramError::StorageError(StorageError::Unavailable { .. })
        )
    }
}
