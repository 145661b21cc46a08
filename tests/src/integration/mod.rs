//! Cross-crate integration tests.

pub mod genesis_vectors;
pub mod header_cache;
pub mod mining;
pub mod selection;
