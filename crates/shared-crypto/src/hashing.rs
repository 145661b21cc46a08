//! # Digest Functions
//!
//! SHA-256 family for transaction ids and merkle nodes, BLAKE2b-256 for
//! block identity.

use blake2::digest::consts::U32;
use blake2::Blake2b;
use sha2::{Digest, Sha256};

/// 256-bit digest output.
pub type Hash = [u8; 32];

/// BLAKE2b truncated to a 32-byte output (parameterised digest length,
/// not a truncated 64-byte digest).
pub type Blake2b256 = Blake2b<U32>;

/// Compute SHA-256 of data.
#[inline]
pub fn sha256(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}

/// Compute double SHA-256 (`sha256(sha256(data))`).
#[inline]
pub fn sha256d(data: &[u8]) -> Hash {
    sha256(&sha256(data))
}

/// Compute BLAKE2b-256 of data.
#[inline]
pub fn blake2b_256(data: &[u8]) -> Hash {
    Blake2b256::digest(data).into()
}

/// Compute SHA-256d over several inputs as one message.
pub fn sha256d_many(inputs: &[&[u8]]) -> Hash {
    let mut hasher = Sha256::new();
    for input in inputs {
        hasher.update(input);
    }
    let first: Hash = hasher.finalize().into();
    sha256(&first)
}
