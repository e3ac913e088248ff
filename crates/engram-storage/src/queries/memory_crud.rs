//! Insert-or-update, get, list, delete for memories.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use engram_core::errors::{EngramError, EngramResult};
use engram_core::memory::{Importance, MemoryRecord, OwnerId};

use super::vector_search::{bytes_to_f32_vec, f32_vec_to_bytes};
use crate::to_storage_err;

/// Insert a record, or replace the row with the same id.
///
/// A replacement bumps the stored version so in-flight reinforcements
/// against the old state fail with `Conflict`. The update arm is guarded
/// by owner: an id collision across owners updates nothing and surfaces
/// as `Conflict`.
pub fn upsert_memory(conn: &Connection, memory: &MemoryRecord) -> EngramResult<()> {
    let blob = f32_vec_to_bytes(&memory.embedding);
    let rows = conn
        .execute(
            "INSERT INTO memories (
                id, owner_id, raw_text, summary, embedding, dimensions,
                importance, access_count, summary_count, created_at,
                last_accessed_at, version
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            ON CONFLICT(id) DO UPDATE SET
                raw_text = excluded.raw_text,
                summary = excluded.summary,
                embedding = excluded.embedding,
                dimensions = excluded.dimensions,
                importance = excluded.importance,
                access_count = excluded.access_count,
                summary_count = excluded.summary_count,
                last_accessed_at = excluded.last_accessed_at,
                version = memories.version + 1
            WHERE memories.owner_id = excluded.owner_id",
            params![
                memory.id,
                memory.owner_id.as_str(),
                memory.raw_text,
                memory.summary,
                blob,
                memory.embedding.len() as i64,
                memory.importance.value(),
                memory.access_count,
                memory.summary_count,
                memory.created_at.to_rfc3339(),
                memory.last_accessed_at.to_rfc3339(),
                memory.version,
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    if rows == 0 {
        return Err(EngramError::Conflict {
            id: memory.id.clone(),
        });
    }
    Ok(())
}

/// Fetch one record, scoped by owner.
pub fn get_memory(conn: &Connection, owner_id: &OwnerId, id: &str) -> EngramResult<MemoryRecord> {
    let mut stmt = conn
        .prepare(
            "SELECT id, owner_id, raw_text, summary, embedding, dimensions,
                    importance, access_count, summary_count, created_at,
                    last_accessed_at, version
             FROM memories WHERE id = ?1 AND owner_id = ?2",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let result = stmt
        .query_row(params![id, owner_id.as_str()], |row| Ok(row_to_memory(row)))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    match result {
        Some(Ok(memory)) => Ok(memory),
        Some(Err(e)) => Err(e),
        None => Err(EngramError::MemoryNotFound { id: id.to_string() }),
    }
}

/// All records for the owner, in unspecified order.
pub fn list_memories(conn: &Connection, owner_id: &OwnerId) -> EngramResult<Vec<MemoryRecord>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, owner_id, raw_text, summary, embedding, dimensions,
                    importance, access_count, summary_count, created_at,
                    last_accessed_at, version
             FROM memories WHERE owner_id = ?1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![owner_id.as_str()], |row| Ok(row_to_memory(row)))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut memories = Vec::new();
    for row in rows {
        memories.push(row.map_err(|e| to_storage_err(e.to_string()))??);
    }
    Ok(memories)
}

/// Remove one record, scoped by owner.
pub fn delete_memory(conn: &Connection, owner_id: &OwnerId, id: &str) -> EngramResult<()> {
    let rows = conn
        .execute(
            "DELETE FROM memories WHERE id = ?1 AND owner_id = ?2",
            params![id, owner_id.as_str()],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    if rows == 0 {
        return Err(EngramError::MemoryNotFound { id: id.to_string() });
    }
    Ok(())
}

/// Map a full memories row to a MemoryRecord.
pub(crate) fn row_to_memory(row: &rusqlite::Row<'_>) -> EngramResult<MemoryRecord> {
    let id: String = row.get(0).map_err(|e| to_storage_err(e.to_string()))?;
    let owner: String = row.get(1).map_err(|e| to_storage_err(e.to_string()))?;
    let raw_text: String = row.get(2).map_err(|e| to_storage_err(e.to_string()))?;
    let summary: String = row.get(3).map_err(|e| to_storage_err(e.to_string()))?;
    let blob: Vec<u8> = row.get(4).map_err(|e| to_storage_err(e.to_string()))?;
    let dimensions: i64 = row.get(5).map_err(|e| to_storage_err(e.to_string()))?;
    let importance: f64 = row.get(6).map_err(|e| to_storage_err(e.to_string()))?;
    let access_count: i64 = row.get(7).map_err(|e| to_storage_err(e.to_string()))?;
    let summary_count: i64 = row.get(8).map_err(|e| to_storage_err(e.to_string()))?;
    let created_at: String = row.get(9).map_err(|e| to_storage_err(e.to_string()))?;
    let last_accessed_at: String = row.get(10).map_err(|e| to_storage_err(e.to_string()))?;
    let version: i64 = row.get(11).map_err(|e| to_storage_err(e.to_string()))?;

    Ok(MemoryRecord {
        id,
        owner_id: OwnerId::from(owner),
        raw_text,
        summary,
        embedding: bytes_to_f32_vec(&blob, dimensions as usize),
        importance: Importance::new(importance),
        access_count: access_count as u64,
        summary_count: summary_count as u64,
        created_at: parse_timestamp(&created_at)?,
        last_accessed_at: parse_timestamp(&last_accessed_at)?,
        version: version as u64,
    })
}

/// Parse an RFC 3339 timestamp column.
pub(crate) fn parse_timestamp(raw: &str) -> EngramResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("bad timestamp {raw}: {e}")))
}
