//! The single write connection. All mutations are serialized through it.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use engram_core::errors::{EngramError, EngramResult, StorageError};

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

/// Exclusive write connection, shared behind a mutex.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open the write connection for the given database file.
    pub fn open(path: &Path) -> EngramResult<Self> {
        let conn = Connection::open(path).map_err(|e| {
            EngramError::StorageError(StorageError::Unavailable {
                reason: format!("{}: {e}", path.display()),
            })
        })?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory write connection (for testing).
    pub fn open_in_memory() -> EngramResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            EngramError::StorageError(StorageError::Unavailable {
                reason: e.to_string(),
            })
        })?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Execute a closure with exclusive access to the write connection.
    pub fn with_conn_sync<F, T>(&self, f: F) -> EngramResult<T>
    where
        F: FnOnce(&Connection) -> EngramResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|e| to_storage_err(format!("write connection lock poisoned: {e}")))?;
        f(&guard)
    }
}
