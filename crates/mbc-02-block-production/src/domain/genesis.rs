//! Genesis Block Creation
//!
//! Builds the single coinbase-only block that seeds a chain. The coinbase
//! pays the full reward to a fixed network-wide script, then replays the
//! snapshot outputs verbatim. Construction is a pure function of its inputs.

use serde::{Deserialize, Serialize};
use shared_types::script::OP_CHECKSIG;
use shared_types::{
    Amount, Block, BlockHeader, CompactTarget, Hash256, Script, Transaction, TxIn, TxOut,
};

/// Uncompressed public key paid by output 0 of every genesis coinbase.
#[rustfmt::skip]
pub const GENESIS_PUBKEY: [u8; 65] = [
    0x04, 0xcb, 0x16, 0xc9, 0x0f, 0xdc, 0xd9, 0x62,
    0xe9, 0xb7, 0x8b, 0x2b, 0x09, 0xc7, 0x8b, 0x76,
    0xb6, 0x7e, 0xa2, 0x05, 0xcb, 0x93, 0xef, 0xa8,
    0x77, 0x2c, 0x2d, 0xf2, 0xab, 0x26, 0x5c, 0xbc,
    0x1b, 0x3b, 0xb4, 0xe6, 0xb1, 0x6f, 0x77, 0x37,
    0x8b, 0x76, 0x8d, 0x29, 0x3d, 0xe6, 0x2e, 0x6d,
    0x14, 0xa4, 0xb3, 0x48, 0xc6, 0x79, 0x06, 0x0f,
    0xa4, 0x3a, 0x44, 0xbf, 0xa7, 0x8a, 0x2f, 0x44,
    0x11,
];

/// First scriptSig push (0x1d00ffff as a script number).
const SCRIPT_SIG_BITS: i64 = 486_604_799;

/// Second scriptSig push.
const SCRIPT_SIG_EXTRA_NONCE: i64 = 4;

/// One pre-funded output replayed into the genesis coinbase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotEntry {
    /// Output script, copied unchanged.
    pub script: Script,
    /// Output value in base units.
    pub amount: Amount,
}

/// Everything that determines a genesis block besides the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisParams {
    /// Commentary embedded in the coinbase scriptSig.
    pub message: String,
    /// Header timestamp.
    pub time: u32,
    /// Header nonce.
    pub nonce: u32,
    /// Header compact target.
    pub bits: CompactTarget,
    /// Header version.
    pub version: i32,
    /// Value of the payout output.
    pub reward: Amount,
}

/// `<GENESIS_PUBKEY> OP_CHECKSIG`
pub fn genesis_payout_script() -> Script {
    Script::new()
        .push_slice(&GENESIS_PUBKEY)
        .push_opcode(OP_CHECKSIG)
}

/// Coinbase scriptSig: the fixed prefix followed by the commentary bytes.
pub fn genesis_script_sig(message: &str) -> Script {
    Script::new()
        .push_int(SCRIPT_SIG_BITS)
        .push_num(SCRIPT_SIG_EXTRA_NONCE)
        .push_slice(message.as_bytes())
}

/// The genesis coinbase: one symbolic input, the payout output, then one
/// output per snapshot entry in order.
pub fn genesis_coinbase(message: &str, reward: Amount, snapshot: &[SnapshotEntry]) -> Transaction {
    let payout = TxOut {
        value: reward,
        script_pubkey: genesis_payout_script(),
    };
    let replayed = snapshot.iter().map(|entry| TxOut {
        value: entry.amount,
        script_pubkey: entry.script.clone(),
    });

    Transaction {
        version: 1,
        inputs: vec![TxIn::coinbase(genesis_script_sig(message))],
        outputs: std::iter::once(payout).chain(replayed).collect(),
        lock_time: 0,
    }
}

/// Creates the genesis block from its recipe and snapshot.
pub fn create_genesis_block(params: &GenesisParams, snapshot: &[SnapshotEntry]) -> Block {
    let coinbase = genesis_coinbase(&params.message, params.reward, snapshot);

    let mut block = Block {
        header: BlockHeader {
            version: params.version,
            prev_blockhash: Hash256::ZERO,
            merkle_root: Hash256::ZERO,
            time: params.time,
            bits: params.bits,
            nonce: params.nonce,
        },
        transactions: vec![coinbase],
    };
    block.header.merkle_root = block.compute_merkle_root();
    block
}
