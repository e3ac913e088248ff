//! StorageEngine — owns the connection pool, enforces the embedding
//! dimension, implements MemoryStore.

use std::path::Path;

use tracing::debug;

use engram_core::config::StoreConfig;
use engram_core::errors::{EngramError, EngramResult};
use engram_core::memory::{MemoryRecord, OwnerId};
use engram_core::traits::MemoryStore;

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries;

/// The SQLite-backed memory store.
pub struct StorageEngine {
    pool: ConnectionPool,
    dimension: usize,
    /// When true, reads use the read pool (file-backed mode).
    /// When false, all reads route through the writer (in-memory mode,
    /// because in-memory read pool connections are isolated databases).
    use_read_pool: bool,
}

impl StorageEngine {
    /// Open a store backed by a file on disk.
    pub fn open(path: &Path, config: &StoreConfig) -> EngramResult<Self> {
        let pool = ConnectionPool::open(path, config.read_pool_size)?;
        let engine = Self {
            pool,
            dimension: config.dimension,
            use_read_pool: true,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory store (for testing). Routes all reads through
    /// the writer.
    pub fn open_in_memory(dimension: usize) -> EngramResult<Self> {
        let pool = ConnectionPool::open_in_memory(1)?;
        let engine = Self {
            pool,
            dimension,
            use_read_pool: false,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Run migrations on the write connection.
    fn initialize(&self) -> EngramResult<()> {
        self.pool
            .writer
            .with_conn_sync(migrations::run_migrations)
    }

    /// Execute a read-only query on the best available connection.
    fn with_reader<F, T>(&self, f: F) -> EngramResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> EngramResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn_sync(f)
        }
    }

    /// Reject an embedding whose length differs from the store dimension.
    fn check_dimension(&self, actual: usize) -> EngramResult<()> {
        if actual != self.dimension {
            return Err(EngramError::DimensionMismatch {
                expected: self.dimension,
                actual,
            });
        }
        Ok(())
    }
}

impl MemoryStore for StorageEngine {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn put(&self, memory: &MemoryRecord) -> EngramResult<()> {
        self.check_dimension(memory.embedding.len())?;
        self.pool.writer.with_conn_sync(|conn| {
            queries::memory_crud::upsert_memory(conn, memory)?;
            debug!(id = %memory.id, owner = %memory.owner_id, "memory stored");
            Ok(())
        })
    }

    fn get(&self, owner_id: &OwnerId, id: &str) -> EngramResult<MemoryRecord> {
        self.with_reader(|conn| queries::memory_crud::get_memory(conn, owner_id, id))
    }

    fn list(&self, owner_id: &OwnerId) -> EngramResult<Vec<MemoryRecord>> {
        self.with_reader(|conn| queries::memory_crud::list_memories(conn, owner_id))
    }

    fn delete(&self, owner_id: &OwnerId, id: &str) -> EngramResult<()> {
        self.pool.writer.with_conn_sync(|conn| {
            queries::memory_crud::delete_memory(conn, owner_id, id)?;
            debug!(id, owner = %owner_id, "memory deleted");
            Ok(())
        })
    }

    fn nearest_neighbors(
        &self,
        owner_id: &OwnerId,
        query: &[f32],
        threshold: f64,
        top_k: usize,
    ) -> EngramResult<Vec<(MemoryRecord, f64)>> {
        self.check_dimension(query.len())?;
        self.with_reader(|conn| {
            queries::vector_search::nearest_neighbors(conn, owner_id, query, threshold, top_k)
        })
    }

    fn commit_reinforcement(
        &self,
        memory: &MemoryRecord,
        expected_version: u64,
    ) -> EngramResult<()> {
        self.pool.writer.with_conn_sync(|conn| {
            queries::reinforcement_ops::commit_reinforcement(conn, memory, expected_version)
        })
    }

    fn increment_summary_counts(&self, owner_id: &OwnerId, ids: &[String]) -> EngramResult<usize> {
        self.pool.writer.with_conn_sync(|conn| {
            queries::reinforcement_ops::increment_summary_counts(conn, owner_id, ids)
        })
    }
}
