use serde::{Deserialize, Serialize};

use super::defaults;

/// Store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Embedding dimension enforced on every write and query.
    /// Fixed for the lifetime of a store.
    pub dimension: usize,
    /// Read connections opened against a file-backed store.
    pub read_pool_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dimension: defaults::DEFAULT_EMBEDDING_DIMENSION,
            read_pool_size: defaults::DEFAULT_READ_POOL_SIZE,
        }
    }
}
