//! # Core Domain Entities
//!
//! Transactions, block headers and blocks in their consensus form.
//!
//! ## Dual hash scheme
//!
//! A header has two hashes over the same 80 serialized bytes:
//!
//! - **Index hash** (BLAKE2b-256): block identity, `prev_blockhash`
//!   linkage, checkpoints. Cheap.
//! - **Work hash** (yespower): compared against the decoded `bits` target.
//!   Expensive, memory-hard.

use serde::{Deserialize, Serialize};

use shared_crypto::{blake2b_256, sha256d, yespower, CryptoError, YespowerParams};

use crate::compact::CompactTarget;
use crate::encode::Encodable;
use crate::hash::Hash256;
use crate::merkle::merkle_root;
use crate::script::Script;

// =============================================================================
// AMOUNTS
// =============================================================================

/// Amount in base units.
pub type Amount = i64;

/// Base units per coin.
pub const COIN: Amount = 10_000;

// =============================================================================
// TRANSACTIONS
// =============================================================================

/// Reference to a previous transaction output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    /// Transaction id being spent.
    pub txid: Hash256,
    /// Output index within that transaction.
    pub vout: u32,
}

impl OutPoint {
    /// The null outpoint carried by coinbase inputs.
    pub const NULL: OutPoint = OutPoint {
        txid: Hash256::ZERO,
        vout: u32::MAX,
    };

    /// True for the coinbase outpoint.
    pub fn is_null(&self) -> bool {
        self.txid.is_zero() && self.vout == u32::MAX
    }
}

impl Default for OutPoint {
    fn default() -> Self {
        Self::NULL
    }
}

/// Transaction input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxIn {
    pub previous_output: OutPoint,
    pub script_sig: Script,
    pub sequence: u32,
}

impl TxIn {
    /// Sequence number that disables relative lock-time.
    pub const SEQUENCE_FINAL: u32 = u32::MAX;

    /// A coinbase input carrying `script_sig` as free-form data.
    pub fn coinbase(script_sig: Script) -> Self {
        Self {
            previous_output: OutPoint::NULL,
            script_sig,
            sequence: Self::SEQUENCE_FINAL,
        }
    }
}

/// Transaction output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxOut {
    pub value: Amount,
    pub script_pubkey: Script,
}

/// A legacy (non-witness) transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    pub version: i32,
    pub inputs: Vec<TxIn>,
    pub outputs: Vec<TxOut>,
    pub lock_time: u32,
}

impl Transaction {
    /// SHA-256d of the serialized transaction.
    pub fn txid(&self) -> Hash256 {
        Hash256(sha256d(&self.consensus_serialize()))
    }

    /// Exactly one input, spending the null outpoint.
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].previous_output.is_null()
    }

    /// Sum of output values.
    pub fn total_output(&self) -> Amount {
        self.outputs.iter().map(|o| o.value).sum()
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self {
            version: 1,
            inputs: Vec::new(),
            outputs: Vec::new(),
            lock_time: 0,
        }
    }
}

// =============================================================================
// BLOCKS
// =============================================================================

/// The 80-byte block header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BlockHeader {
    pub version: i32,
    /// Index hash of the parent (zero only for genesis).
    pub prev_blockhash: Hash256,
    pub merkle_root: Hash256,
    /// Unix seconds.
    pub time: u32,
    pub bits: CompactTarget,
    pub nonce: u32,
}

impl BlockHeader {
    /// Serialized header length.
    pub const SIZE: usize = 80;

    /// Serialize into the fixed 80-byte layout.
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0..4].copy_from_slice(&self.version.to_le_bytes());
        out[4..36].copy_from_slice(&self.prev_blockhash.0);
        out[36..68].copy_from_slice(&self.merkle_root.0);
        out[68..72].copy_from_slice(&self.time.to_le_bytes());
        out[72..76].copy_from_slice(&self.bits.0.to_le_bytes());
        out[76..80].copy_from_slice(&self.nonce.to_le_bytes());
        out
    }

    /// Block identity hash.
    pub fn index_hash(&self) -> Hash256 {
        Hash256(blake2b_256(&self.to_bytes()))
    }

    /// Proof-of-work hash. Fails only if yespower cannot run (allocation).
    pub fn work_hash(&self) -> Result<Hash256, CryptoError> {
        yespower(&self.to_bytes(), &YespowerParams::MICROBITCOIN).map(Hash256)
    }

    /// True for a header with no parent.
    pub fn is_genesis_shaped(&self) -> bool {
        self.prev_blockhash.is_zero()
    }
}

impl Encodable for BlockHeader {
    fn consensus_encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_bytes());
    }
}

/// A header plus its transactions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Merkle root over the transaction ids.
    pub fn compute_merkle_root(&self) -> Hash256 {
        let txids: Vec<Hash256> = self.transactions.iter().map(Transaction::txid).collect();
        merkle_root(&txids)
    }

    /// Index hash of the header.
    pub fn index_hash(&self) -> Hash256 {
        self.header.index_hash()
    }
}

impl Encodable for OutPoint {
    fn consensus_encode(&self, out: &mut Vec<u8>) {
        self.txid.consensus_encode(out);
        self.vout.consensus_encode(out);
    }
}

impl Encodable for TxIn {
    fn consensus_encode(&self, out: &mut Vec<u8>) {
        self.previous_output.consensus_encode(out);
        self.script_sig.consensus_encode(out);
        self.sequence.consensus_encode(out);
    }
}

impl Encodable for TxOut {
    fn consensus_encode(&self, out: &mut Vec<u8>) {
        self.value.consensus_encode(out);
        self.script_pubkey.consensus_encode(out);
    }
}

impl Encodable for Transaction {
    fn consensus_encode(&self, out: &mut Vec<u8>) {
        self.version.consensus_encode(out);
        self.inputs.consensus_encode(out);
        self.outputs.consensus_encode(out);
        self.lock_time.consensus_encode(out);
    }
}

impl Encodable for Block {
    fn consensus_encode(&self, out: &mut Vec<u8>) {
        self.header.consensus_encode(out);
        self.transactions.consensus_encode(out);
    }
}
