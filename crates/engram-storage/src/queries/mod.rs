//! Owner-scoped SQL query modules.

pub mod memory_crud;
pub mod reinforcement_ops;
pub mod vector_search;
