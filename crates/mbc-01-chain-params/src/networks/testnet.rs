//! Public test network.

use shared_types::{u256_from_hex_const, CompactTarget, Hash256, Script, COIN};

use mbc_02_block_production::{GenesisParams, SubsidyOverride};

use super::{build_genesis, h, main::POW_LIMIT, ExpectedGenesis};
use crate::chain_tx::ChainTxData;
use crate::checkpoints::CheckpointData;
use crate::consensus::{default_reward_schedule, BuriedForks, ConsensusRules, BASE_REWARD, LWMA_AVERAGING_WINDOW};
use crate::deployments::{Deployment, Deployments};
use crate::error::Result;
use crate::network::Network;
use crate::profile::{Base58Prefixes, ChainFlags, ChainParams, NetworkProfile, SizeHints};
use crate::snapshot::{SnapshotProvider, SnapshotSource};

/// Coinbase commentary of the testnet genesis block.
pub const GENESIS_MESSAGE: &str = "The WSJ 05/Oct/2019 Hong Kong Shuts Down After Night of Violence";

/// Hashes the testnet genesis must reproduce.
pub const EXPECTED_GENESIS: ExpectedGenesis = ExpectedGenesis {
    index_hash: h("d36a04fdef89fe61faf23f84ba930308130adb83a44a905de9c07c46c46d1a6d"),
    work_hash: Some(h("002ccba2978484648cc5b9ebd95a277fa2d26a56e29e787279e14452cc195fb5")),
    merkle_root: h("eac469c73c951cbeab7f4cd074f3b280dbcf5027d53e04cc4f9cb50028e43af6"),
};

/// Testnet genesis recipe.
pub fn genesis_params() -> GenesisParams {
    GenesisParams {
        message: GENESIS_MESSAGE.to_string(),
        time: 1_634_445_073,
        nonce: 2131,
        bits: CompactTarget(0x1f3f_ffff),
        version: 1,
        reward: BASE_REWARD,
    }
}

/// Testnet consensus rules, before the genesis hashes are filled in.
pub fn consensus_rules() -> ConsensusRules {
    ConsensusRules {
        genesis_hash: Hash256::ZERO,
        genesis_work_hash: None,
        buried: BuriedForks::ALL_ENABLED,
        pow_limit: POW_LIMIT,
        pow_target_spacing: 600,
        allow_min_difficulty_blocks: true,
        no_retargeting: false,
        lwma_averaging_window: LWMA_AVERAGING_WINDOW,
        rule_change_activation_threshold: 1512,
        miner_confirmation_window: 2016,
        deployments: Deployments::new(
            Deployment::never_active(28),
            Deployment {
                bit: 2,
                start_time: 1_619_222_400,
                timeout: 1_628_640_000,
                min_activation_height: 0,
            },
        ),
        reward: default_reward_schedule(),
        subsidy_override: Some(SubsidyOverride {
            address: String::new(),
            height: 99_999_999_999,
            amount: 1000 * COIN,
        }),
        minimum_chain_work: u256_from_hex_const(
            "0000000000000000000000000000000000000000000005180c3bd8290da33a1a",
        ),
        default_assume_valid: h("0000000000004ae2f3896ca8ecd41c460a35bf6184e145d91558cece1c688a76"),
        signet_blocks: false,
        signet_challenge: Script::new(),
    }
}

/// Builds the testnet profile. Testnet has no snapshot.
pub fn chain_params(snapshot: &dyn SnapshotProvider) -> Result<ChainParams> {
    let source = SnapshotSource::none();
    let entries = snapshot.load(&source);
    let genesis_params = genesis_params();
    let (genesis, work_hash) = build_genesis(Network::TestNet, &genesis_params, &entries, &EXPECTED_GENESIS)?;

    let mut consensus = consensus_rules();
    consensus.genesis_hash = genesis.index_hash();
    consensus.genesis_work_hash = work_hash;

    Ok(ChainParams {
        profile: NetworkProfile::TestNet,
        consensus,
        message_start: [0x74, 0x6d, 0x62, 0x63],
        default_port: 16502,
        prune_after_height: 1000,
        size_hints: SizeHints {
            blockchain_size: 40,
            chain_state_size: 2,
        },
        genesis_params,
        genesis,
        snapshot: source,
        seeds: Vec::new(),
        base58_prefixes: Base58Prefixes::mainnet(),
        bech32_hrp: "tmbc".to_string(),
        flags: ChainFlags {
            default_consistency_checks: false,
            require_standard: false,
            is_test_chain: true,
            is_mockable_chain: false,
        },
        checkpoints: CheckpointData::empty(),
        chain_tx_data: ChainTxData::default(),
    })
}
