//! Domain types: the memory record and its value objects.

pub mod importance;
pub mod owner;
pub mod record;
pub mod retention;

pub use importance::Importance;
pub use owner::OwnerId;
pub use record::MemoryRecord;
pub use retention::RetentionScore;
