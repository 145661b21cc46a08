//! # Chain Parameter Profile
//!
//! Everything a node needs to know about the chain it runs on. The four
//! networks share one struct; the network-specific payload (signet
//! challenge, regtest overrides) lives in [`NetworkProfile`].

use serde::{Deserialize, Serialize};
use shared_types::{Block, Hash256, Script};

use mbc_02_block_production::GenesisParams;

use crate::chain_tx::ChainTxData;
use crate::checkpoints::CheckpointData;
use crate::consensus::ConsensusRules;
use crate::deployments::VersionBitsOverride;
use crate::network::Network;
use crate::snapshot::SnapshotSource;

/// Address encoding version bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Base58Prefixes {
    /// P2PKH address prefix
    pub pubkey_address: Vec<u8>,
    /// P2SH address prefix
    pub script_address: Vec<u8>,
    /// WIF private key prefix
    pub secret_key: Vec<u8>,
    /// BIP32 extended public key prefix
    pub ext_public_key: Vec<u8>,
    /// BIP32 extended private key prefix
    pub ext_secret_key: Vec<u8>,
}

impl Base58Prefixes {
    /// Main-network prefixes.
    pub fn mainnet() -> Self {
        Self {
            pubkey_address: vec![26],
            script_address: vec![51],
            secret_key: vec![128],
            ext_public_key: vec![0x04, 0x88, 0xB2, 0x1E],
            ext_secret_key: vec![0x04, 0x88, 0xAD, 0xE4],
        }
    }

    /// Prefixes shared by signet and regtest.
    pub fn test_chains() -> Self {
        Self {
            pubkey_address: vec![111],
            script_address: vec![196],
            secret_key: vec![239],
            ext_public_key: vec![0x04, 0x35, 0x87, 0xCF],
            ext_secret_key: vec![0x04, 0x35, 0x83, 0x94],
        }
    }
}

/// Node policy defaults that are not consensus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainFlags {
    /// Run expensive internal consistency checks
    pub default_consistency_checks: bool,
    /// Relay and mine standard transactions only
    pub require_standard: bool,
    /// Test chain (relaxed policies)
    pub is_test_chain: bool,
    /// Allows mock time
    pub is_mockable_chain: bool,
}

/// Expected on-disk footprint in GB.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeHints {
    /// Full block data
    pub blockchain_size: u64,
    /// UTXO set
    pub chain_state_size: u64,
}

/// Signet payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignetProfile {
    /// Block signing challenge
    pub challenge: Script,
    /// `false` for the default public signet
    pub custom_challenge: bool,
}

/// Regtest payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegTestProfile {
    /// `-fastprune` was set
    pub fastprune: bool,
    /// Version-bits overrides applied, in order
    pub vbparams: Vec<VersionBitsOverride>,
}

/// Network discriminant plus its runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkProfile {
    /// Production chain
    Main,
    /// Public test chain
    TestNet,
    /// Signature-challenge chain
    Signet(SignetProfile),
    /// Local regression-test chain
    RegTest(RegTestProfile),
}

impl NetworkProfile {
    /// Network identifier.
    pub fn network(&self) -> Network {
        match self {
            NetworkProfile::Main => Network::Main,
            NetworkProfile::TestNet => Network::TestNet,
            NetworkProfile::Signet(_) => Network::Signet,
            NetworkProfile::RegTest(_) => Network::RegTest,
        }
    }
}

/// Complete, immutable parameters of one chain.
#[derive(Debug, Clone)]
pub struct ChainParams {
    /// Which chain, with its payload
    pub profile: NetworkProfile,
    /// Consensus constants
    pub consensus: ConsensusRules,
    /// P2P message start bytes
    pub message_start: [u8; 4],
    /// Default P2P port
    pub default_port: u16,
    /// Blocks kept before pruning may start
    pub prune_after_height: u64,
    /// Expected disk usage
    pub size_hints: SizeHints,
    /// Recipe the genesis block was built from
    pub genesis_params: GenesisParams,
    /// The verified genesis block
    pub genesis: Block,
    /// Where genesis pre-funding comes from
    pub snapshot: SnapshotSource,
    /// DNS or address seeds
    pub seeds: Vec<String>,
    /// Base58 address prefixes
    pub base58_prefixes: Base58Prefixes,
    /// Bech32 human-readable part
    pub bech32_hrp: String,
    /// Policy defaults
    pub flags: ChainFlags,
    /// Anti-reorg anchors
    pub checkpoints: CheckpointData,
    /// Progress estimate data
    pub chain_tx_data: ChainTxData,
}

impl ChainParams {
    /// Network identifier.
    pub fn network(&self) -> Network {
        self.profile.network()
    }

    /// Genesis index hash.
    pub fn genesis_hash(&self) -> Hash256 {
        self.consensus.genesis_hash
    }

    /// Test chain flag.
    pub fn is_test_chain(&self) -> bool {
        self.flags.is_test_chain
    }

    /// Mock-time flag.
    pub fn is_mockable_chain(&self) -> bool {
        self.flags.is_mockable_chain
    }

    /// Standardness policy flag.
    pub fn require_standard(&self) -> bool {
        self.flags.require_standard
    }
}
