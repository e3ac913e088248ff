//! `user_version`-tracked schema migrations.

mod v001_memories;

use rusqlite::Connection;

use engram_core::errors::{EngramError, EngramResult, StorageError};

use crate::to_storage_err;

/// Migrations in order; index + 1 is the schema version they produce.
const MIGRATIONS: &[fn(&Connection) -> EngramResult<()>] = &[v001_memories::migrate];

/// Run all pending migrations, tracking progress in `user_version`.
pub fn run_migrations(conn: &Connection) -> EngramResult<()> {
    let current: u32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;

    for (idx, migrate) in MIGRATIONS.iter().enumerate() {
        let version = idx as u32 + 1;
        if version <= current {
            continue;
        }
        migrate(conn).map_err(|e| {
            EngramError::StorageError(StorageError::MigrationFailed {
                version,
                reason: e.to_string(),
            })
        })?;
        conn.pragma_update(None, "user_version", version)
            .map_err(|e| to_storage_err(e.to_string()))?;
        tracing::info!(version, "applied schema migration");
    }
    Ok(())
}

/// Current schema version of a database.
pub fn schema_version(conn: &Connection) -> EngramResult<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))
}
