//! # Network Profiles
//!
//! One constructor per chain. Each assembles its consensus rules, builds
//! the genesis block from its recipe and checks the result against the
//! compiled-in hashes before returning.
//!
//! | Network | Port | Magic | Work hash asserted |
//! |---------|------|-------|--------------------|
//! | main | 6502 | `736d6263` | yes |
//! | test | 16502 | `746d6263` | yes |
//! | signet | 38333 | from challenge | no |
//! | regtest | 18444 | `fabfb5da` | no |

pub mod main;
pub mod regtest;
pub mod signet;
pub mod testnet;

use shared_types::{Block, Hash256};
use tracing::{debug, error};

use mbc_02_block_production::{create_genesis_block, CachedHeader, GenesisParams, SnapshotEntry};

use crate::args::ArgsSource;
use crate::error::{ChainParamsError, Result};
use crate::network::Network;

/// Compiled-in hashes a network's genesis must reproduce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedGenesis {
    /// Index hash
    pub index_hash: Hash256,
    /// Work hash, when the network asserts it
    pub work_hash: Option<Hash256>,
    /// Merkle root
    pub merkle_root: Hash256,
}

fn check(network: Network, what: &'static str, expected: Hash256, actual: Hash256) -> Result<()> {
    if expected == actual {
        return Ok(());
    }
    error!(%network, what, %expected, %actual, "Genesis block does not match");
    Err(ChainParamsError::GenesisMismatch {
        network,
        what,
        expected,
        actual,
    })
}

/// Compares a built genesis block against `expected`.
///
/// Checks run in order index hash, work hash, merkle root, so a wrong
/// recipe is reported before the expensive work hash is computed.
pub fn verify_genesis(network: Network, genesis: &Block, expected: &ExpectedGenesis) -> Result<Option<Hash256>> {
    let header = CachedHeader::new(genesis.header);
    check(network, "index hash", expected.index_hash, header.index_hash())?;

    let work_hash = match expected.work_hash {
        Some(want) => {
            let got = header.work_hash_cached()?;
            check(network, "work hash", want, got)?;
            Some(got)
        }
        None => None,
    };

    check(network, "merkle root", expected.merkle_root, genesis.header.merkle_root)?;
    debug!(%network, hash = %expected.index_hash, "Genesis block verified");
    Ok(work_hash)
}

/// Builds and verifies a network's genesis block.
pub fn build_genesis(
    network: Network,
    params: &GenesisParams,
    snapshot: &[SnapshotEntry],
    expected: &ExpectedGenesis,
) -> Result<(Block, Option<Hash256>)> {
    let genesis = create_genesis_block(params, snapshot);
    let work_hash = verify_genesis(network, &genesis, expected)?;
    Ok((genesis, work_hash))
}

/// Genesis recipe of `network`.
pub fn genesis_params(network: Network) -> GenesisParams {
    match network {
        Network::Main => main::genesis_params(),
        Network::TestNet => testnet::genesis_params(),
        Network::Signet => signet::genesis_params(),
        Network::RegTest => regtest::genesis_params(),
    }
}

/// Compiled-in genesis hashes of `network`.
pub fn expected_genesis(network: Network) -> ExpectedGenesis {
    match network {
        Network::Main => main::EXPECTED_GENESIS,
        Network::TestNet => testnet::EXPECTED_GENESIS,
        Network::Signet => signet::EXPECTED_GENESIS,
        Network::RegTest => regtest::EXPECTED_GENESIS,
    }
}

/// Runs the override parsing of `network` without building a profile.
/// Networks that take no overrides accept anything.
pub fn validate_overrides(network: Network, args: &dyn ArgsSource) -> Result<()> {
    match network {
        Network::Signet => signet::check_args(args),
        Network::RegTest => regtest::parse_vbparams(args).map(drop),
        Network::Main | Network::TestNet => Ok(()),
    }
}

/// Display-order hex literal as a hash.
pub(crate) const fn h(s: &str) -> Hash256 {
    Hash256::from_hex_const(s)
}
