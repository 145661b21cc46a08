//! # Signet
//!
//! Blocks are valid when signed against a challenge script. The default
//! public signet uses a fixed 1-of-2 multisig challenge; operators may run
//! their own signet with `-signetchallenge`, which resets the trust
//! anchors and gives the network its own message start.

use shared_crypto::sha256d;
use shared_types::{u256_from_hex_const, write_compact_size, CompactTarget, Hash256, Script, U256};
use tracing::info;

use mbc_02_block_production::GenesisParams;

use super::{build_genesis, h, main, main::POW_LIMIT, ExpectedGenesis};
use crate::args::{ArgsSource, ARG_SIGNET_CHALLENGE, ARG_SIGNET_SEED_NODE};
use crate::chain_tx::ChainTxData;
use crate::checkpoints::CheckpointData;
use crate::consensus::{default_reward_schedule, BuriedForks, ConsensusRules, BASE_REWARD, LWMA_AVERAGING_WINDOW};
use crate::deployments::{Deployment, Deployments};
use crate::error::{ChainParamsError, Result};
use crate::network::Network;
use crate::profile::{Base58Prefixes, ChainFlags, ChainParams, NetworkProfile, SignetProfile, SizeHints};
use crate::snapshot::{SnapshotProvider, SnapshotSource};

/// Challenge of the default public signet.
pub const DEFAULT_CHALLENGE: &str = "512103ad5e0edad18cb1f0fc0d28a3d4f1f3e445640337489abb10404f2d1e086be430210359ef5021964fe22d6f8e05b2463c9540ce96883fe3b278760f048f5189f2e6c452ae";

/// Seeds of the default public signet.
pub const DEFAULT_SEEDS: [&str; 3] = [
    "178.128.221.177",
    "2a01:7c8:d005:390::5",
    "v7ajjeirttkbnt32wpy3c6w3emwnfr3fkla7hpxcfokr3ysd3kqtzmqd.onion:38333",
];

/// Hashes the signet genesis must reproduce. The work hash is not asserted.
pub const EXPECTED_GENESIS: ExpectedGenesis = ExpectedGenesis {
    index_hash: h("83468e58cd2bd0cb30f1b722c84db65029e0cd5718aabe6461294b33da809762"),
    work_hash: None,
    merkle_root: h("d5322aa9dc80dda1982ba855afe7970bf246589a18f3c5920320849a813eb0fc"),
};

const DEFAULT_MINIMUM_CHAIN_WORK: U256 =
    u256_from_hex_const("0000000000000000000000000000000000000000000000000000008546553c03");

const DEFAULT_ASSUME_VALID: Hash256 =
    h("000000187d4440e5bff91488b700a140441e089a8aaea707414982460edbfe54");

/// Signet genesis recipe. Shares the main commentary.
pub fn genesis_params() -> GenesisParams {
    GenesisParams {
        message: main::GENESIS_MESSAGE.to_string(),
        time: 1_598_918_400,
        nonce: 1487,
        bits: CompactTarget(0x1f3f_ffff),
        version: 1,
        reward: BASE_REWARD,
    }
}

/// First four bytes of SHA-256d over the serialized challenge.
pub fn message_start(challenge: &Script) -> [u8; 4] {
    let mut data = Vec::with_capacity(challenge.len() + 9);
    write_compact_size(&mut data, challenge.len() as u64);
    data.extend_from_slice(challenge.as_bytes());
    let hash = sha256d(&data);
    [hash[0], hash[1], hash[2], hash[3]]
}

struct Trust {
    challenge: Script,
    custom: bool,
    minimum_chain_work: U256,
    default_assume_valid: Hash256,
    size_hints: SizeHints,
    chain_tx_data: ChainTxData,
    seeds: Vec<String>,
}

fn trust_from_args(args: &dyn ArgsSource) -> Result<Trust> {
    if !args.is_arg_set(ARG_SIGNET_CHALLENGE) {
        let challenge = Script::from_hex(DEFAULT_CHALLENGE)
            .map_err(|_| ChainParamsError::InvalidSignetChallenge(DEFAULT_CHALLENGE.to_string()))?;
        return Ok(Trust {
            challenge,
            custom: false,
            minimum_chain_work: DEFAULT_MINIMUM_CHAIN_WORK,
            default_assume_valid: DEFAULT_ASSUME_VALID,
            size_hints: SizeHints {
                blockchain_size: 1,
                chain_state_size: 0,
            },
            chain_tx_data: ChainTxData {
                time: 1_626_696_658,
                tx_count: 387_761,
                tx_rate: 0.04035946932424404,
            },
            seeds: DEFAULT_SEEDS.iter().map(|s| s.to_string()).collect(),
        });
    }

    let values = args.get_args(ARG_SIGNET_CHALLENGE);
    let [raw] = values.as_slice() else {
        return Err(ChainParamsError::MultipleSignetChallenges);
    };
    let bytes = hex::decode(raw).map_err(|_| ChainParamsError::InvalidSignetChallenge(raw.clone()))?;
    info!(challenge = %raw, "Signet with challenge {}", raw);

    Ok(Trust {
        challenge: Script::from_bytes(bytes),
        custom: true,
        minimum_chain_work: U256::zero(),
        default_assume_valid: Hash256::ZERO,
        size_hints: SizeHints::default(),
        chain_tx_data: ChainTxData::default(),
        seeds: Vec::new(),
    })
}

/// Validates `-signetchallenge` without building a profile.
pub(crate) fn check_args(args: &dyn ArgsSource) -> Result<()> {
    trust_from_args(args).map(drop)
}

/// Builds the signet profile from `-signetchallenge` and `-signetseednode`.
pub fn chain_params(args: &dyn ArgsSource, snapshot: &dyn SnapshotProvider) -> Result<ChainParams> {
    let mut trust = trust_from_args(args)?;
    if args.is_arg_set(ARG_SIGNET_SEED_NODE) {
        trust.seeds = args.get_args(ARG_SIGNET_SEED_NODE);
    }

    let source = SnapshotSource::none();
    let entries = snapshot.load(&source);
    let genesis_params = genesis_params();
    let (genesis, _) = build_genesis(Network::Signet, &genesis_params, &entries, &EXPECTED_GENESIS)?;

    let consensus = ConsensusRules {
        genesis_hash: genesis.index_hash(),
        genesis_work_hash: None,
        buried: BuriedForks::ALL_ENABLED,
        pow_limit: POW_LIMIT,
        pow_target_spacing: 600,
        allow_min_difficulty_blocks: false,
        no_retargeting: false,
        lwma_averaging_window: LWMA_AVERAGING_WINDOW,
        rule_change_activation_threshold: 1815,
        miner_confirmation_window: 2016,
        deployments: Deployments::new(Deployment::never_active(28), Deployment::always_active(2)),
        reward: default_reward_schedule(),
        subsidy_override: None,
        minimum_chain_work: trust.minimum_chain_work,
        default_assume_valid: trust.default_assume_valid,
        signet_blocks: true,
        signet_challenge: trust.challenge.clone(),
    };

    Ok(ChainParams {
        profile: NetworkProfile::Signet(SignetProfile {
            challenge: trust.challenge.clone(),
            custom_challenge: trust.custom,
        }),
        message_start: message_start(&trust.challenge),
        consensus,
        default_port: 38333,
        prune_after_height: 1000,
        size_hints: trust.size_hints,
        genesis_params,
        genesis,
        snapshot: source,
        seeds: trust.seeds,
        base58_prefixes: Base58Prefixes::test_chains(),
        bech32_hrp: "tmbc".to_string(),
        flags: ChainFlags {
            default_consistency_checks: false,
            require_standard: true,
            is_test_chain: true,
            is_mockable_chain: false,
        },
        checkpoints: CheckpointData::empty(),
        chain_tx_data: trust.chain_tx_data,
    })
}
