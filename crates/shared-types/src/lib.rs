//! # Shared Types Crate
//!
//! Wire-level primitives every other crate agrees on: hashes, compact
//! targets, scripts, transactions, block headers and blocks, together with
//! their consensus serialization.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Byte layouts are defined once, here.
//! - **Serialization Order**: `Hash256` stores bytes as serialized; only
//!   text forms are reversed.
//! - **No Interpretation**: Scripts are opaque bytes; verification flags
//!   are named but never evaluated.

pub mod compact;
pub mod encode;
pub mod entities;
pub mod errors;
pub mod hash;
pub mod merkle;
pub mod script;

pub use compact::{CompactTarget, DecodedTarget};
pub use encode::{write_compact_size, Encodable};
pub use entities::*;
pub use errors::*;
pub use hash::{u256_from_hex_const, Hash256};
pub use merkle::merkle_root;
pub use script::{Script, ScriptVerifyFlags};

// Re-export U256 from primitive-types for use across all crates
pub use primitive_types::U256;
