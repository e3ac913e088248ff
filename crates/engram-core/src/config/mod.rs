//! Immutable configuration, read once at startup.
//!
//! Scoring constants are fixed process-wide so retention scores stay
//! comparable across memories; they are carried in explicit config objects
//! rather than mutable globals.

pub mod defaults;

mod reinforcement_config;
mod retention_config;
mod retrieval_config;
mod resurfacing_config;
mod store_config;

pub use reinforcement_config::ReinforcementConfig;
pub use retention_config::RetentionConfig;
pub use retrieval_config::RetrievalConfig;
pub use resurfacing_config::ResurfacingConfig;
pub use store_config::StoreConfig;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{EngramError, EngramResult};

/// Aggregated configuration for every engram subsystem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngramConfig {
    pub store: StoreConfig,
    pub retention: RetentionConfig,
    pub resurfacing: ResurfacingConfig,
    pub reinforcement: ReinforcementConfig,
    pub retrieval: RetrievalConfig,
}

impl EngramConfig {
    /// Parse a TOML document. Missing sections and fields fall back to
    /// their defaults.
    pub fn from_toml_str(raw: &str) -> EngramResult<Self> {
        toml::from_str(raw).map_err(|e| EngramError::ConfigError {
            reason: e.to_string(),
        })
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> EngramResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| EngramError::ConfigError {
            reason: format!("{}: {e}", path.display()),
        })?;
        Self::from_toml_str(&raw)
    }
}
