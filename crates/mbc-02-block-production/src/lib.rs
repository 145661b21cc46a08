//! # MicroBitcoin - Block Production (Subsystem 02)
//!
//! **Bounded Context:** Genesis Construction, Block Identity & Mining
//!
//! ## Purpose
//!
//! - Build the genesis block of a network from its recipe and snapshot
//! - Compute the two hashes of a header and cache the expensive one
//! - Search for a genesis nonce that meets the compact target (offline)
//! - Evaluate the block reward schedule
//!
//! ## Dual Hash Scheme
//!
//! ```text
//! 80-byte header ──┬── BLAKE2b-256 ──▶ index hash (identity, prev link, checkpoints)
//!                  └── yespower    ──▶ work hash  (≤ target ⇒ valid proof of work)
//! ```
//!
//! ## Critical Invariants
//!
//! 1. **Deterministic Genesis**: identical inputs yield byte-identical blocks
//! 2. **Output Order**: payout first, then snapshot entries in order
//! 3. **At-Most-Once Work Hash**: concurrent first readers share one result
//! 4. **Tamper Detection**: a cached header whose index hash changed is fatal
//! 5. **Target Is A Ceiling**: `work_hash <= target` passes
//!
//! ## Error Taxonomy
//!
//! [`BlockProductionError::is_fatal`] marks integrity failures (work hash
//! primitive failure, header tampering). Callers must log and terminate on
//! those; nothing here retries.
//!
//! ## Module Structure
//!
//! - [`domain`]: genesis, identity, miner, reward

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Domain models and business logic
pub mod domain;

mod config;
mod error;

pub use config::{MinerConfig, DEFAULT_BATCH_SIZE};
pub use error::{BlockProductionError, Result};

pub use domain::{
    block_subsidy, create_genesis_block, genesis_coinbase, genesis_payout_script,
    genesis_script_sig, CachedHeader, GenesisMiner, GenesisParams, HeaderHasher, HeaderHashes,
    MicroHasher, MinedGenesis, RewardSchedule, SnapshotEntry, SubsidyOverride, GENESIS_PUBKEY,
};
