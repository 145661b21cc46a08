//! # Shared Crypto - Hash Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256d | Transaction ids, merkle nodes, signet magic |
//! | `hashing` | BLAKE2b-256 | Block index hash (identity, chain linkage) |
//! | `kdf` | HMAC / PBKDF2 over BLAKE2b-256 | yespower key derivation |
//! | `yespower` | yespower 1.0 (BLAKE2b) | Block work hash (proof of work) |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod kdf;
pub mod yespower;

// Re-exports
pub use errors::CryptoError;
pub use hashing::{blake2b_256, sha256, sha256d, sha256d_many, Hash};
pub use kdf::{hmac_blake2b_256, pbkdf2_blake2b_256};
pub use yespower::{yespower, YespowerParams};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
