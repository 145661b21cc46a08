//! # Error Types
//!
//! Parse errors for the textual forms of wire primitives.

use thiserror::Error;

/// Errors raised while decoding hashes and scripts from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    /// Input is not valid hexadecimal.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Decoded byte length does not match the type.
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
