use serde::{Deserialize, Serialize};

use super::defaults;

/// Query-orchestration configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Resurfaced-only memories appended after the similarity matches,
    /// at most.
    pub resurfaced_append_cap: usize,
    /// Cached inquiry results held per process. Zero disables the cache.
    pub cache_capacity: u64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            resurfaced_append_cap: defaults::DEFAULT_RESURFACED_APPEND_CAP,
            cache_capacity: defaults::DEFAULT_QUERY_CACHE_CAPACITY,
        }
    }
}
