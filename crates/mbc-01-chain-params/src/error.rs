//! # Error Types
//!
//! Two classes, reported differently by the binary:
//!
//! - **Configuration** errors come from operator input (arguments). They
//!   are raised before any chain activity and name the offending value.
//! - **Fatal** errors mean the process cannot guarantee the consensus
//!   rules it would run under. The only sanctioned handling is to log and
//!   terminate.

use mbc_02_block_production::BlockProductionError;
use shared_types::Hash256;
use thiserror::Error;

use crate::network::Network;

/// Chain parameter errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainParamsError {
    // =========================================================================
    // Configuration
    // =========================================================================
    /// `-signetchallenge` was given more than once.
    #[error("-signetchallenge cannot be multiple values")]
    MultipleSignetChallenges,

    /// `-signetchallenge` is not valid hex.
    #[error("Invalid signet challenge ({0})")]
    InvalidSignetChallenge(String),

    /// `-vbparams` does not have three or four `:`-separated fields.
    #[error("Version bits parameters malformed, expecting deployment:start:end[:min_activation_height]")]
    MalformedVbParams,

    /// Start time is not a 64-bit integer.
    #[error("Invalid nStartTime ({0})")]
    InvalidStartTime(String),

    /// Timeout is not a 64-bit integer.
    #[error("Invalid nTimeout ({0})")]
    InvalidTimeout(String),

    /// Minimum activation height is not a 32-bit integer.
    #[error("Invalid min_activation_height ({0})")]
    InvalidMinActivationHeight(String),

    /// No deployment has this name.
    #[error("Invalid deployment ({0})")]
    UnknownDeployment(String),

    /// Checkpoint heights must be strictly increasing.
    #[error("Checkpoint heights must increase: {previous} then {next}")]
    UnorderedCheckpoints {
        /// Height already present
        previous: u64,
        /// Offending height
        next: u64,
    },

    // =========================================================================
    // Fatal
    // =========================================================================
    /// Network name not recognised.
    #[error("Unknown chain {0}")]
    UnknownChain(String),

    /// The genesis recipe no longer reproduces the canonical block.
    #[error("{network} genesis {what} mismatch: expected {expected}, got {actual}")]
    GenesisMismatch {
        /// Network being constructed
        network: Network,
        /// Which value differed (index hash, work hash, merkle root)
        what: &'static str,
        /// Compiled-in value
        expected: Hash256,
        /// Recomputed value
        actual: Hash256,
    },

    /// Genesis work hash could not be computed.
    #[error("Genesis work hash failed: {0}")]
    WorkHash(#[from] BlockProductionError),

    /// A profile was already selected for this process.
    #[error("Chain parameters already selected for {0}")]
    AlreadySelected(Network),
}

impl ChainParamsError {
    /// Operator input errors, reported before startup.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::MultipleSignetChallenges
                | Self::InvalidSignetChallenge(_)
                | Self::MalformedVbParams
                | Self::InvalidStartTime(_)
                | Self::InvalidTimeout(_)
                | Self::InvalidMinActivationHeight(_)
                | Self::UnknownDeployment(_)
                | Self::UnorderedCheckpoints { .. }
        )
    }

    /// Errors that must terminate the process.
    pub fn is_fatal(&self) -> bool {
        !self.is_config_error()
    }
}

/// Result type for chain parameter operations.
pub type Result<T> = std::result::Result<T, ChainParamsError>;
