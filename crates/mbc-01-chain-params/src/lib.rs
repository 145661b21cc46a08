//! # MicroBitcoin - Chain Parameters (Subsystem 01)
//!
//! **Bounded Context:** Network Profiles & Consensus Constants
//!
//! ## Purpose
//!
//! One immutable [`ChainParams`] per process describes the chain the node
//! runs on: consensus rules, soft-fork deployments, checkpoints, address
//! prefixes, message start bytes and the verified genesis block.
//!
//! ## Construction
//!
//! ```text
//! Network + ArgsSource + SnapshotProvider
//!        │
//!        ▼
//! networks::{main,testnet,signet,regtest}::chain_params
//!        │  consensus rules, overrides (signet / regtest only)
//!        ▼
//! create_genesis_block ──▶ verify_genesis ──▶ ChainParams
//!                           (index hash, work hash, merkle root)
//! ```
//!
//! ## Critical Invariants
//!
//! 1. **Genesis Oracle**: a profile only exists if its genesis reproduces
//!    the compiled-in hashes
//! 2. **Overrides Before Genesis**: bad `-vbparams` / `-signetchallenge`
//!    values fail before any block is built
//! 3. **Single Selection**: one network per process
//! 4. **Checkpoint Order**: heights strictly increase
//!
//! ## Error Taxonomy
//!
//! [`ChainParamsError::is_config_error`] covers operator input;
//! everything else is fatal and must terminate the process.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod args;
pub mod chain_tx;
pub mod checkpoints;
pub mod consensus;
pub mod deployments;
pub mod error;
pub mod network;
pub mod networks;
pub mod profile;
pub mod select;
pub mod snapshot;

pub use args::{ArgsMap, ArgsSource, ChainOptions};
pub use chain_tx::ChainTxData;
pub use checkpoints::CheckpointData;
pub use consensus::{BuriedForks, ConsensusRules};
pub use deployments::{Deployment, DeploymentPos, Deployments, VersionBitsOverride};
pub use error::{ChainParamsError, Result};
pub use network::Network;
pub use networks::{
    build_genesis, expected_genesis, genesis_params, validate_overrides, verify_genesis, ExpectedGenesis,
};
pub use profile::{
    Base58Prefixes, ChainFlags, ChainParams, NetworkProfile, RegTestProfile, SignetProfile,
    SizeHints,
};
pub use select::{create_chain_params, create_chain_params_by_name, params, select_params};
pub use snapshot::{
    EmptySnapshot, SnapshotEndpoint, SnapshotEntry, SnapshotProvider, SnapshotSource,
    StaticSnapshot,
};
