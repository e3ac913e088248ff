//! v001: the memories table.

use rusqlite::Connection;

use engram_core::errors::EngramResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> EngramResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS memories (
            id               TEXT PRIMARY KEY,
            owner_id         TEXT NOT NULL,
            raw_text         TEXT NOT NULL,
            summary          TEXT NOT NULL,
            embedding        BLOB NOT NULL,
            dimensions       INTEGER NOT NULL,
            importance       REAL NOT NULL DEFAULT 1.0,
            access_count     INTEGER NOT NULL DEFAULT 0,
            summary_count    INTEGER NOT NULL DEFAULT 0,
            created_at       TEXT NOT NULL,
            last_accessed_at TEXT NOT NULL,
            version          INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_memories_owner ON memories(owner_id);
        CREATE INDEX IF NOT EXISTS idx_memories_owner_created
            ON memories(owner_id, created_at);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
