//! Crypto error types.

use thiserror::Error;

/// Hash primitive errors.
///
/// Every variant is fatal for proof-of-work: a work hash that cannot be
/// computed must never be replaced by a default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// yespower cost parameters outside the supported range
    #[error("Invalid yespower parameters: N={n}, r={r}")]
    InvalidYespowerParams {
        /// Block count (must be a power of two in 1024..=524288)
        n: u32,
        /// Block size factor (must be in 8..=32)
        r: u32,
    },

    /// Scratch memory could not be allocated
    #[error("Failed to allocate {bytes} bytes of yespower scratch memory")]
    OutOfMemory {
        /// Requested allocation size in bytes
        bytes: usize,
    },
}
