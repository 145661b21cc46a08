//! # 256-bit Hashes
//!
//! `Hash256` stores bytes in serialization order. Text forms (Display,
//! FromStr, serde) use the conventional byte-reversed hex, so a hash
//! printed by a node and the literal in source read the same.

use std::fmt;
use std::str::FromStr;

use primitive_types::U256;
use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::errors::TypesError;

/// A 32-byte hash in serialization (little-endian) byte order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, SerializeDisplay, DeserializeFromStr)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    /// The all-zero hash (null previous-block hash).
    pub const ZERO: Hash256 = Hash256([0u8; 32]);

    /// Wrap raw bytes in serialization order.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse display-order hex at compile time.
    ///
    /// Intended for `const` items: an invalid literal fails the build.
    pub const fn from_hex_const(s: &str) -> Self {
        let bytes = s.as_bytes();
        let digits = if bytes.len() >= 2 && bytes[0] == b'0' && (bytes[1] == b'x' || bytes[1] == b'X') {
            2
        } else {
            0
        };
        if bytes.len() - digits != 64 {
            panic!("hash literal must have 64 hex digits");
        }

        let mut out = [0u8; 32];
        let mut i = 0;
        while i < 32 {
            let hi = hex_nibble(bytes[digits + 2 * i]);
            let lo = hex_nibble(bytes[digits + 2 * i + 1]);
            out[31 - i] = (hi << 4) | lo;
            i += 1;
        }
        Self(out)
    }

    /// Raw bytes in serialization order.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// True for the null hash.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Interpret the hash as an unsigned 256-bit integer (little-endian).
    pub fn to_u256(&self) -> U256 {
        U256::from_little_endian(&self.0)
    }

    /// Inverse of [`Hash256::to_u256`].
    pub fn from_u256(value: U256) -> Self {
        let mut bytes = [0u8; 32];
        value.to_little_endian(&mut bytes);
        Self(bytes)
    }
}

/// Build a `U256` from display-order hex at compile time.
pub const fn u256_from_hex_const(s: &str) -> U256 {
    let hash = Hash256::from_hex_const(s);
    let mut words = [0u64; 4];
    let mut w = 0;
    while w < 4 {
        let mut b = 0;
        let mut word = 0u64;
        while b < 8 {
            word |= (hash.0[w * 8 + b] as u64) << (8 * b);
            b += 1;
        }
        words[w] = word;
        w += 1;
    }
    U256(words)
}

const fn hex_nibble(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => panic!("invalid hex digit in hash literal"),
    }
}

impl From<[u8; 32]> for Hash256 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0.iter().rev() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash256({self})")
    }
}

impl FromStr for Hash256 {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let decoded = hex::decode(digits).map_err(|e| TypesError::InvalidHex(e.to_string()))?;
        let mut bytes: [u8; 32] =
            decoded
                .as_slice()
                .try_into()
                .map_err(|_| TypesError::InvalidLength {
                    expected: 32,
                    actual: decoded.len(),
                })?;
        bytes.reverse();
        Ok(Self(bytes))
    }
}
