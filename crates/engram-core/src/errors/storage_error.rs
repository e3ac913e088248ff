/// Storage-layer errors for SQLite operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    /// The backing datastore could not be reached or opened. Surfaced
    /// as-is: the caller owns retry and backoff policy.
    #[error("storage unavailable: {reason}")]
    Unavailable { reason: String },
}
