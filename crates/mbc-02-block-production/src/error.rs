//! Error types for block production

use shared_crypto::CryptoError;
use shared_types::{CompactTarget, Hash256};
use thiserror::Error;

/// Result type alias for block production operations
pub type Result<T> = std::result::Result<T, BlockProductionError>;

/// Errors that can occur while building, hashing or mining blocks
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockProductionError {
    /// The memory-hard work hash could not be computed
    #[error("Work hash failed: {0}")]
    WorkHash(#[from] CryptoError),

    /// The header changed after its work hash was cached
    #[error("Header mutated after caching: cached index hash {cached}, current {current}")]
    HeaderTampered {
        /// Index hash recorded with the cached work hash
        cached: Hash256,
        /// Index hash of the header as it is now
        current: Hash256,
    },

    /// Compact target is negative, overflowing or zero
    #[error("Invalid target: bits {bits}")]
    InvalidTarget {
        /// The rejected encoding
        bits: CompactTarget,
    },

    /// Worker pool could not be started
    #[error("Miner setup failed: {0}")]
    MinerSetup(String),
}

impl BlockProductionError {
    /// Integrity failures that must terminate the process.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::WorkHash(_) | Self::HeaderTampered { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        let tampered = BlockProductionError::HeaderTampered {
            cached: Hash256::ZERO,
            current: Hash256([1; 32]),
        };
        assert!(tampered.is_fatal());
        assert!(BlockProductionError::from(CryptoError::OutOfMemory { bytes: 1 }).is_fatal());
        assert!(!BlockProductionError::InvalidTarget {
            bits: CompactTarget(0)
        }
        .is_fatal());
        assert!(!BlockProductionError::MinerSetup("x".into()).is_fatal());
    }
}
