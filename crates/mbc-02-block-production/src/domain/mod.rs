//! Domain layer - Pure logic for genesis construction and block identity
//!
//! Nothing here performs I/O. The only shared mutable state is the
//! per-header hash cache in [`identity`].
//!
//! ## Entities
//!
//! - [`GenesisParams`] / [`SnapshotEntry`]: genesis recipe and pre-funding
//! - [`CachedHeader`]: header with a lock-guarded work hash
//! - [`MinedGenesis`]: result of the nonce search
//!
//! ## Services
//!
//! - [`create_genesis_block`]: deterministic genesis constructor
//! - [`GenesisMiner`]: parallel nonce search
//! - [`RewardSchedule`]: geometric reward decay

pub mod genesis;
pub mod identity;
pub mod miner;
pub mod reward;

pub use genesis::{
    create_genesis_block, genesis_coinbase, genesis_payout_script, genesis_script_sig,
    GenesisParams, SnapshotEntry, GENESIS_PUBKEY,
};
pub use identity::{CachedHeader, HeaderHasher, HeaderHashes, MicroHasher};
pub use miner::{GenesisMiner, MinedGenesis};
pub use reward::{block_subsidy, RewardSchedule, SubsidyOverride};
