//! Main network.

use shared_types::{u256_from_hex_const, CompactTarget, Hash256, Script, U256, COIN};

use mbc_02_block_production::{GenesisParams, SubsidyOverride};

use super::{build_genesis, h, ExpectedGenesis};
use crate::chain_tx::ChainTxData;
use crate::checkpoints::CheckpointData;
use crate::consensus::{default_reward_schedule, BuriedForks, ConsensusRules, BASE_REWARD, LWMA_AVERAGING_WINDOW};
use crate::deployments::{Deployment, Deployments};
use crate::error::Result;
use crate::network::Network;
use crate::profile::{Base58Prefixes, ChainFlags, ChainParams, NetworkProfile, SizeHints};
use crate::snapshot::{SnapshotEndpoint, SnapshotProvider, SnapshotSource};

/// Coinbase commentary of the main genesis block.
pub const GENESIS_MESSAGE: &str =
    "The WSJ 09/Oct/2019 Nobel Prize in Chemistry Awarded to Developers of Lithium-Ion Batteries";

/// Main and test chain proof-of-work limit.
pub const POW_LIMIT: U256 =
    u256_from_hex_const("003fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff");

/// Hashes the main genesis must reproduce (snapshot-funded).
pub const EXPECTED_GENESIS: ExpectedGenesis = ExpectedGenesis {
    index_hash: h("14c03ecf20edc9887fb98bf34b53809f063fc491e73f588961f764fac88ecbae"),
    work_hash: Some(h("001cb6047ddf13074c4bce354ed3cf0cdd96a4287aa562b032eb81d03e183da8")),
    merkle_root: h("3426ccad3017e14a4ab6efddaa44cb31beca67a86c82f63de18705f1b6de88df"),
};

const CHECKPOINTS: [(u64, Hash256); 14] = [
    (10, h("eb419dcd2e22d73aeb7dcaf798fb17f06698f920b690ed03ede27406a0020ecb")),
    (1000, h("a7a83700b5cd157c4c7a6f4ceea38f27bd2ec7282d1811634d8ea95ed693d4d8")),
    (100000, h("fa30671130a2cad47cb18b89edeb44f897e2686da4c05af6e1452076af5df9a0")),
    (200000, h("a280e163ee97a474d6838f74d746012216cea1e3ab5bff04d65098128a0c1634")),
    (300000, h("8a4b61320029aa93498c1637a91dfed2c49118ab34d4ba73e269a32430d6e245")),
    (400000, h("6dac5851eadbc34b3d80171491743e6e4421f10b4a599c923585be4fdf101ba3")),
    (500000, h("31c4118122391706475cf0c5ee445f8dee1f5bb7c2b92041776e8cef55bd1307")),
    (600000, h("417a18f0afd2ac52c0f738d3f12b0b3dc1dc7c39cca531073b3148d6bce91829")),
    (700000, h("b1c25846f387c9a408ccecfe7919e946b53974e2131416e1514c1b3676a15b7b")),
    (800000, h("038389a836e6f90e0f379bdc6a0c74d841eb6dbec8b23e2b335a981be3d0a56f")),
    (900000, h("b7381d1d7c281eec55fa985fd28bdb0c3bf5373a936ea37b3d861a7520d128f4")),
    (1000000, h("849d3a7f266d3ba3ebce81c20f467f532832652a86e6495b03ec77985535efc9")),
    (2000000, h("a4ecd2833734ce7bb8fb1af7ae53bc33c4bf986dbc7eb87d8d01d6873fdb7ded")),
    (2600000, h("23eef88fbc540be75a7b61188bcf118c29db9d4f5fa663863d0458f74ba675b2")),
];

/// Main genesis recipe.
pub fn genesis_params() -> GenesisParams {
    GenesisParams {
        message: GENESIS_MESSAGE.to_string(),
        time: 1_570_625_829,
        nonce: 709,
        bits: CompactTarget(0x1f3f_ffff),
        version: 1,
        reward: BASE_REWARD,
    }
}

/// Where the main pre-funding snapshot is published.
pub fn snapshot_source() -> SnapshotSource {
    SnapshotSource {
        file_name: "mainnet.csv".to_string(),
        providers: vec![
            SnapshotEndpoint::new("http://snapshot.microbitcoin.org", "/mainnet.csv"),
            SnapshotEndpoint::new("http://micro.codepillow.io", "/mainnet.csv"),
        ],
    }
}

/// Main checkpoints.
pub fn checkpoints() -> Result<CheckpointData> {
    CheckpointData::from_ordered(CHECKPOINTS)
}

/// Main consensus rules, before the genesis hashes are filled in.
pub fn consensus_rules() -> ConsensusRules {
    ConsensusRules {
        genesis_hash: Hash256::ZERO,
        genesis_work_hash: None,
        buried: BuriedForks::ALL_ENABLED,
        pow_limit: POW_LIMIT,
        pow_target_spacing: 60,
        allow_min_difficulty_blocks: false,
        no_retargeting: false,
        lwma_averaging_window: LWMA_AVERAGING_WINDOW,
        rule_change_activation_threshold: 1815,
        miner_confirmation_window: 2016,
        deployments: Deployments::new(
            Deployment::never_active(28),
            Deployment {
                bit: 2,
                start_time: 1_634_541_943,
                timeout: Deployment::NO_TIMEOUT,
                min_activation_height: 1_056_905,
            },
        ),
        reward: default_reward_schedule(),
        subsidy_override: Some(SubsidyOverride {
            address: String::new(),
            height: 99_999_999_999,
            amount: 1000 * COIN,
        }),
        minimum_chain_work: u256_from_hex_const(
            "000000000000000000000000000000000000000000000000000054d62a0d6408",
        ),
        default_assume_valid: h("23eef88fbc540be75a7b61188bcf118c29db9d4f5fa663863d0458f74ba675b2"),
        signet_blocks: false,
        signet_challenge: Script::new(),
    }
}

/// Builds the main profile. The genesis block only matches when
/// `snapshot` yields the published main snapshot.
pub fn chain_params(snapshot: &dyn SnapshotProvider) -> Result<ChainParams> {
    let source = snapshot_source();
    let entries = snapshot.load(&source);
    let genesis_params = genesis_params();
    let (genesis, work_hash) = build_genesis(Network::Main, &genesis_params, &entries, &EXPECTED_GENESIS)?;

    let mut consensus = consensus_rules();
    consensus.genesis_hash = genesis.index_hash();
    consensus.genesis_work_hash = work_hash;

    Ok(ChainParams {
        profile: NetworkProfile::Main,
        consensus,
        message_start: [0x73, 0x6d, 0x62, 0x63],
        default_port: 6502,
        prune_after_height: 100_000,
        size_hints: SizeHints {
            blockchain_size: 420,
            chain_state_size: 6,
        },
        genesis_params,
        genesis,
        snapshot: source,
        seeds: Vec::new(),
        base58_prefixes: Base58Prefixes::mainnet(),
        bech32_hrp: "mbc".to_string(),
        flags: ChainFlags {
            default_consistency_checks: false,
            require_standard: true,
            is_test_chain: false,
            is_mockable_chain: false,
        },
        checkpoints: checkpoints()?,
        chain_tx_data: ChainTxData {
            time: 1_727_905_204,
            tx_count: 3_043_896,
            tx_rate: 0.01708408484745776,
        },
    })
}
