//! # Scripts
//!
//! Opaque script bytes plus the handful of builders needed to assemble
//! coinbase scriptSigs and payout scripts. Script interpretation is not
//! modelled here.

use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};

use crate::errors::TypesError;

/// Push the next byte as a length.
pub const OP_PUSHDATA1: u8 = 0x4c;
/// Push the next two bytes (LE) as a length.
pub const OP_PUSHDATA2: u8 = 0x4d;
/// Push the next four bytes (LE) as a length.
pub const OP_PUSHDATA4: u8 = 0x4e;
/// Push an empty vector.
pub const OP_0: u8 = 0x00;
/// Push the number -1.
pub const OP_1NEGATE: u8 = 0x4f;
/// Push the number 1 (`OP_2`..`OP_16` follow consecutively).
pub const OP_1: u8 = 0x51;
/// Return the script as unspendable.
pub const OP_RETURN: u8 = 0x6a;
/// Check a signature against a public key.
pub const OP_CHECKSIG: u8 = 0xac;
/// Check m-of-n signatures.
pub const OP_CHECKMULTISIG: u8 = 0xae;

/// Raw script bytes. Serializes as lowercase hex.
#[serde_as]
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script(#[serde_as(as = "Hex")] pub Vec<u8>);

impl Script {
    /// Empty script.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Wrap existing bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Parse from hex.
    pub fn from_hex(s: &str) -> Result<Self, TypesError> {
        hex::decode(s)
            .map(Self)
            .map_err(|e| TypesError::InvalidHex(e.to_string()))
    }

    /// Script bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Script length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the empty script.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a raw opcode.
    pub fn push_opcode(mut self, opcode: u8) -> Self {
        self.0.push(opcode);
        self
    }

    /// Append a data push with the smallest length prefix.
    pub fn push_slice(mut self, data: &[u8]) -> Self {
        let len = data.len();
        if len < OP_PUSHDATA1 as usize {
            self.0.push(len as u8);
        } else if len <= 0xff {
            self.0.push(OP_PUSHDATA1);
            self.0.push(len as u8);
        } else if len <= 0xffff {
            self.0.push(OP_PUSHDATA2);
            self.0.extend_from_slice(&(len as u16).to_le_bytes());
        } else {
            self.0.push(OP_PUSHDATA4);
            self.0.extend_from_slice(&(len as u32).to_le_bytes());
        }
        self.0.extend_from_slice(data);
        self
    }

    /// Append an integer, using the small-integer opcodes for -1 and
    /// 0..=16 and a script-number data push otherwise.
    pub fn push_int(self, value: i64) -> Self {
        match value {
            -1 => self.push_opcode(OP_1NEGATE),
            0 => self.push_opcode(OP_0),
            1..=16 => self.push_opcode(OP_1 + (value as u8 - 1)),
            _ => self.push_num(value),
        }
    }

    /// Append an integer as a script-number data push, even for small
    /// values.
    pub fn push_num(self, value: i64) -> Self {
        let encoded = scriptnum_encode(value);
        self.push_slice(&encoded)
    }
}

/// Minimal little-endian sign-magnitude encoding used for numbers inside
/// scripts.
pub fn scriptnum_encode(value: i64) -> Vec<u8> {
    if value == 0 {
        return Vec::new();
    }

    let negative = value < 0;
    let mut abs = value.unsigned_abs();
    let mut out = Vec::with_capacity(9);
    while abs > 0 {
        out.push((abs & 0xff) as u8);
        abs >>= 8;
    }

    // Top bit of the last byte is the sign.
    let last = out.len() - 1;
    if out[last] & 0x80 != 0 {
        out.push(if negative { 0x80 } else { 0x00 });
    } else if negative {
        out[last] |= 0x80;
    }
    out
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({self})")
    }
}

impl FromStr for Script {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<Vec<u8>> for Script {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Script {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Named script-verification flags, as exposed by the consensus library
/// ABI. Only the flag values live here; evaluation does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ScriptVerifyFlags(pub u32);

impl ScriptVerifyFlags {
    /// No checks.
    pub const NONE: Self = Self(0);
    /// Evaluate P2SH (BIP16) subscripts.
    pub const P2SH: Self = Self(1 << 0);
    /// Enforce strict DER (BIP66) compliance.
    pub const DERSIG: Self = Self(1 << 2);
    /// Enforce NULLDUMMY (BIP147).
    pub const NULLDUMMY: Self = Self(1 << 4);
    /// Enable CHECKLOCKTIMEVERIFY (BIP65).
    pub const CHECKLOCKTIMEVERIFY: Self = Self(1 << 9);
    /// Enable CHECKSEQUENCEVERIFY (BIP112).
    pub const CHECKSEQUENCEVERIFY: Self = Self(1 << 10);
    /// Enable WITNESS (BIP141).
    pub const WITNESS: Self = Self(1 << 11);
    /// Every flag above.
    pub const ALL: Self = Self(
        Self::P2SH.0
            | Self::DERSIG.0
            | Self::NULLDUMMY.0
            | Self::CHECKLOCKTIMEVERIFY.0
            | Self::CHECKSEQUENCEVERIFY.0
            | Self::WITNESS.0,
    );

    /// Raw bit set.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True when every bit of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True when only known flags are set.
    pub const fn is_valid(self) -> bool {
        self.0 & !Self::ALL.0 == 0
    }
}

impl BitOr for ScriptVerifyFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_slice_length_prefixes() {
        let short = Script::new().push_slice(&[0xaa; 75]);
        assert_eq!(short.0[0], 75);
        assert_eq!(short.len(), 76);

        let medium = Script::new().push_slice(&[0xaa; 76]);
        assert_eq!(&medium.0[..2], &[OP_PUSHDATA1, 76]);

        let long = Script::new().push_slice(&[0xaa; 300]);
        assert_eq!(&long.0[..3], &[OP_PUSHDATA2, 0x2c, 0x01]);
    }

    #[test]
    fn test_coinbase_prefix() {
        let script = Script::new().push_int(486_604_799).push_num(4);
        assert_eq!(script.to_string(), "04ffff001d0104");
    }

    #[test]
    fn test_small_ints_use_opcodes() {
        let script = Script::new().push_int(0).push_int(1).push_int(16).push_int(-1);
        assert_eq!(script.0, vec![OP_0, OP_1, OP_1 + 15, OP_1NEGATE]);
    }

    #[test]
    fn test_scriptnum_encoding() {
        assert!(scriptnum_encode(0).is_empty());
        assert_eq!(scriptnum_encode(1), vec![0x01]);
        assert_eq!(scriptnum_encode(-1), vec![0x81]);
        assert_eq!(scriptnum_encode(127), vec![0x7f]);
        assert_eq!(scriptnum_encode(128), vec![0x80, 0x00]);
        assert_eq!(scriptnum_encode(-128), vec![0x80, 0x80]);
        assert_eq!(scriptnum_encode(255), vec![0xff, 0x00]);
        assert_eq!(scriptnum_encode(256), vec![0x00, 0x01]);
    }

    #[test]
    fn test_hex_and_serde() {
        let script = Script::from_hex("51ac").unwrap();
        assert_eq!(script.0, vec![OP_1, OP_CHECKSIG]);
        assert_eq!(serde_json::to_string(&script).unwrap(), "\"51ac\"");
        let back: Script = serde_json::from_str("\"51ac\"").unwrap();
        assert_eq!(back, script);
        assert!(Script::from_hex("xyz").is_err());
    }

    #[test]
    fn test_verify_flag_values() {
        assert_eq!(ScriptVerifyFlags::NONE.bits(), 0);
        assert_eq!(ScriptVerifyFlags::CHECKLOCKTIMEVERIFY.bits(), 512);
        assert_eq!(ScriptVerifyFlags::ALL.bits(), 0x0e15);
        assert!(ScriptVerifyFlags::ALL.contains(ScriptVerifyFlags::WITNESS));
        assert!(ScriptVerifyFlags::ALL.is_valid());
        assert!(!ScriptVerifyFlags(1 << 20).is_valid());

        let combined = ScriptVerifyFlags::P2SH | ScriptVerifyFlags::DERSIG;
        assert_eq!(combined.bits(), 0b101);
    }
}
