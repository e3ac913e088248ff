//! Brute-force cosine similarity scan over an owner's embeddings.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use engram_core::errors::EngramResult;
use engram_core::memory::{MemoryRecord, OwnerId};

use crate::to_storage_err;

/// Return up to `top_k` (memory, cosine_similarity) pairs with similarity
/// strictly above `threshold`, ordered by similarity descending, ties
/// broken by `created_at` descending (most recent first).
///
/// Scans the owner's embeddings and computes the cosine in Rust — the
/// portable equivalent of a native vector-distance query, adequate for
/// per-owner corpus sizes.
pub fn nearest_neighbors(
    conn: &Connection,
    owner_id: &OwnerId,
    query: &[f32],
    threshold: f64,
    top_k: usize,
) -> EngramResult<Vec<(MemoryRecord, f64)>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, embedding, dimensions, created_at
             FROM memories WHERE owner_id = ?1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![owner_id.as_str()], |row| {
            let id: String = row.get(0)?;
            let blob: Vec<u8> = row.get(1)?;
            let dims: i64 = row.get(2)?;
            let created_at: String = row.get(3)?;
            Ok((id, blob, dims, created_at))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    // Pre-compute the query norm once; a zero-norm query matches nothing.
    let query_norm_sq: f64 = query.iter().map(|x| (*x as f64) * (*x as f64)).sum();
    if query_norm_sq == 0.0 {
        return Ok(vec![]);
    }

    let mut scored: Vec<(String, f64, DateTime<Utc>)> = Vec::new();
    for row in rows {
        let (id, blob, dims, created_at) = row.map_err(|e| to_storage_err(e.to_string()))?;
        // Skip rows with a stale dimension without decoding the vector.
        if dims as usize != query.len() {
            continue;
        }
        let stored = bytes_to_f32_vec(&blob, dims as usize);
        let similarity = cosine_similarity(query, &stored);
        if similarity > threshold {
            scored.push((id, similarity, super::memory_crud::parse_timestamp(&created_at)?));
        }
    }

    // Similarity descending, then most recent creation first.
    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.2.cmp(&a.2))
    });
    scored.truncate(top_k);

    // Fetch the full records.
    let mut results = Vec::with_capacity(scored.len());
    for (id, similarity, _) in scored {
        let memory = super::memory_crud::get_memory(conn, owner_id, &id)?;
        results.push((memory, similarity));
    }
    Ok(results)
}

/// Convert an f32 slice to bytes (little-endian).
pub(crate) fn f32_vec_to_bytes(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Convert bytes back to an f32 vec.
pub(crate) fn bytes_to_f32_vec(bytes: &[u8], expected_dims: usize) -> Vec<f32> {
    let mut result = Vec::with_capacity(expected_dims);
    for chunk in bytes.chunks_exact(4) {
        result.push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }
    result
}

/// Cosine similarity between two vectors, in [-1.0, 1.0].
/// Zero-norm vectors yield 0.0.
pub(crate) fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (*x as f64) * (*y as f64))
        .sum();
    let norm_a: f64 = a
        .iter()
        .map(|x| (*x as f64) * (*x as f64))
        .sum::<f64>()
        .sqrt();
    let norm_b: f64 = b
        .iter()
        .map(|x| (*x as f64) * (*x as f64))
        .sum::<f64>()
        .sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
