//! Regression-test network.

use shared_types::{u256_from_hex_const, CompactTarget, Hash256, Script, U256, COIN};

use mbc_02_block_production::{GenesisParams, SubsidyOverride};

use super::{build_genesis, h, ExpectedGenesis};
use crate::args::{ArgsSource, ARG_FASTPRUNE, ARG_VBPARAMS};
use crate::chain_tx::ChainTxData;
use crate::checkpoints::CheckpointData;
use crate::consensus::{default_reward_schedule, BuriedForks, ConsensusRules, BASE_REWARD, LWMA_AVERAGING_WINDOW};
use crate::deployments::{Deployment, Deployments, VersionBitsOverride};
use crate::error::Result;
use crate::network::Network;
use crate::profile::{Base58Prefixes, ChainFlags, ChainParams, NetworkProfile, RegTestProfile, SizeHints};
use crate::snapshot::{SnapshotProvider, SnapshotSource};

/// Coinbase commentary of the regtest genesis block.
pub const GENESIS_MESSAGE: &str =
    "Cretaceous Bird-Like Dinosaur Had Adaptations for Swimming and Diving | Sci-News Dec 2, 2022";

/// Hashes the regtest genesis must reproduce.
pub const EXPECTED_GENESIS: ExpectedGenesis = ExpectedGenesis {
    index_hash: h("809f50088e594b701c0c9a3377cb165255ad621ea2664ee41b164ca28a899722"),
    work_hash: None,
    merkle_root: h("2c3057ab4ec6d1a7a89079100bcdb9d5e3b17815f878ec007d4c9609c599dbc7"),
};

/// Regtest proof-of-work limit.
pub const POW_LIMIT: U256 =
    u256_from_hex_const("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff");

/// Prune threshold with `-fastprune`.
pub const FAST_PRUNE_AFTER_HEIGHT: u64 = 100;

/// Default prune threshold.
pub const PRUNE_AFTER_HEIGHT: u64 = 1000;

/// Regtest genesis recipe.
pub fn genesis_params() -> GenesisParams {
    GenesisParams {
        message: GENESIS_MESSAGE.to_string(),
        time: 1_670_163_306,
        nonce: 1,
        bits: CompactTarget(0x207f_ffff),
        version: 1,
        reward: BASE_REWARD,
    }
}

/// Parses every `-vbparams` value, failing on the first bad one.
pub fn parse_vbparams(args: &dyn ArgsSource) -> Result<Vec<VersionBitsOverride>> {
    if !args.is_arg_set(ARG_VBPARAMS) {
        return Ok(Vec::new());
    }
    args.get_args(ARG_VBPARAMS)
        .iter()
        .map(|value| value.parse())
        .collect()
}

/// Builds the regtest profile. `-vbparams` and `-fastprune` are applied;
/// a bad override fails before the genesis block is built.
pub fn chain_params(args: &dyn ArgsSource, snapshot: &dyn SnapshotProvider) -> Result<ChainParams> {
    let fastprune = args.get_bool_arg(ARG_FASTPRUNE, false);
    let vbparams = parse_vbparams(args)?;

    let mut deployments = Deployments::new(
        Deployment {
            bit: 28,
            start_time: 0,
            timeout: Deployment::NO_TIMEOUT,
            min_activation_height: 0,
        },
        Deployment::always_active(2),
    );
    for update in &vbparams {
        deployments.apply(update);
    }

    let source = SnapshotSource::none();
    let entries = snapshot.load(&source);
    let genesis_params = genesis_params();
    let (genesis, _) = build_genesis(Network::RegTest, &genesis_params, &entries, &EXPECTED_GENESIS)?;
    let genesis_hash = genesis.index_hash();

    let consensus = ConsensusRules {
        genesis_hash,
        genesis_work_hash: None,
        buried: BuriedForks::ALL_ENABLED,
        pow_limit: POW_LIMIT,
        pow_target_spacing: 600,
        allow_min_difficulty_blocks: true,
        no_retargeting: true,
        lwma_averaging_window: LWMA_AVERAGING_WINDOW,
        rule_change_activation_threshold: 108,
        miner_confirmation_window: 144,
        deployments,
        reward: default_reward_schedule(),
        subsidy_override: Some(SubsidyOverride {
            address: "rmbc1qe6dtjj50gc4fq0k3pal73zargq96c9mgvljrd6".to_string(),
            height: 200,
            amount: 1000 * COIN,
        }),
        minimum_chain_work: U256::zero(),
        default_assume_valid: Hash256::ZERO,
        signet_blocks: false,
        signet_challenge: Script::new(),
    };

    Ok(ChainParams {
        profile: NetworkProfile::RegTest(RegTestProfile { fastprune, vbparams }),
        consensus,
        message_start: [0xfa, 0xbf, 0xb5, 0xda],
        default_port: 18444,
        prune_after_height: if fastprune {
            FAST_PRUNE_AFTER_HEIGHT
        } else {
            PRUNE_AFTER_HEIGHT
        },
        size_hints: SizeHints::default(),
        genesis_params,
        genesis,
        snapshot: source,
        seeds: Vec::new(),
        base58_prefixes: Base58Prefixes::test_chains(),
        bech32_hrp: "rmbc".to_string(),
        flags: ChainFlags {
            default_consistency_checks: true,
            require_standard: true,
            is_test_chain: true,
            is_mockable_chain: true,
        },
        checkpoints: CheckpointData::from_ordered([(0, genesis_hash)])?,
        chain_tx_data: ChainTxData::default(),
    })
}
