/// Engram system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default embedding dimension. Matches the vector width produced by the
/// external embedding service; every record in a store must carry a vector
/// of exactly the store's configured dimension.
pub const DEFAULT_EMBEDDING_DIMENSION: usize = 1536;
