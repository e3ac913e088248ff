//! Version-guarded reinforcement commit and summary-count bumps.

use rusqlite::{params, Connection, OptionalExtension};

use engram_core::errors::{EngramError, EngramResult};
use engram_core::memory::{MemoryRecord, OwnerId};

use crate::to_storage_err;

/// Write the reinforcement fields — `access_count`, `last_accessed_at`,
/// `importance` — together, guarded by the version check. The three
/// fields commit as one statement or not at all.
///
/// A failed guard is disambiguated into `Conflict` (the record moved) or
/// `MemoryNotFound` (the record is gone).
pub fn commit_reinforcement(
    conn: &Connection,
    memory: &MemoryRecord,
    expected_version: u64,
) -> EngramResult<()> {
    let rows = conn
        .execute(
            "UPDATE memories SET
                access_count = ?1,
                last_accessed_at = ?2,
                importance = ?3,
                version = version + 1
             WHERE id = ?4 AND owner_id = ?5 AND version = ?6",
            params![
                memory.access_count,
                memory.last_accessed_at.to_rfc3339(),
                memory.importance.value(),
                memory.id,
                memory.owner_id.as_str(),
                expected_version,
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    if rows == 1 {
        return Ok(());
    }

    let exists = conn
        .query_row(
            "SELECT 1 FROM memories WHERE id = ?1 AND owner_id = ?2",
            params![memory.id, memory.owner_id.as_str()],
            |_| Ok(()),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?
        .is_some();

    if exists {
        Err(EngramError::Conflict {
            id: memory.id.clone(),
        })
    } else {
        Err(EngramError::MemoryNotFound {
            id: memory.id.clone(),
        })
    }
}

/// Bump `summary_count` for each id owned by `owner_id`, as one
/// transaction. Returns the number of rows updated; ids that do not
/// resolve under this owner are skipped.
pub fn increment_summary_counts(
    conn: &Connection,
    owner_id: &OwnerId,
    ids: &[String],
) -> EngramResult<usize> {
    if ids.is_empty() {
        return Ok(0);
    }

    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("increment_summary_counts begin: {e}")))?;

    let mut updated = 0;
    for id in ids {
        updated += tx
            .execute(
                "UPDATE memories SET
                    summary_count = summary_count + 1,
                    version = version + 1
                 WHERE id = ?1 AND owner_id = ?2",
                params![id, owner_id.as_str()],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
    }

    tx.commit()
        .map_err(|e| to_storage_err(format!("increment_summary_counts commit: {e}")))?;
    Ok(updated)
}
