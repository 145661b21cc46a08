//! # Compact Targets
//!
//! The 32-bit `bits` field of a block header: an 8-bit base-256 exponent
//! and a 24-bit mantissa whose top bit is a sign flag.
//!
//! **Target is a CEILING**: a header is valid when its work hash, read as
//! an unsigned 256-bit integer, is less than or equal to the decoded
//! target. Higher target = easier.

use std::fmt;

use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// Compact ("nBits") encoding of a 256-bit target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CompactTarget(pub u32);

/// Result of decoding a compact target, including the flags a consensus
/// check must reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedTarget {
    /// Decoded magnitude (zero when the encoding overflows)
    pub target: U256,
    /// Sign bit was set on a non-zero mantissa
    pub negative: bool,
    /// Magnitude does not fit in 256 bits
    pub overflow: bool,
}

impl CompactTarget {
    /// Wrap the raw header field.
    pub const fn from_consensus(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw header field.
    pub const fn to_consensus(self) -> u32 {
        self.0
    }

    /// Decode to a 256-bit magnitude plus sign and overflow flags.
    pub fn decode(self) -> DecodedTarget {
        let size = self.0 >> 24;
        let mut word = self.0 & 0x007f_ffff;
        if size <= 3 {
            word >>= 8 * (3 - size);
        }

        // Flags are computed on the shifted mantissa.
        let negative = word != 0 && (self.0 & 0x0080_0000) != 0;
        let overflow = word != 0
            && (size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32));

        let target = if overflow || word == 0 {
            U256::zero()
        } else if size <= 3 {
            U256::from(word)
        } else {
            U256::from(word) << ((8 * (size - 3)) as usize)
        };

        DecodedTarget {
            target,
            negative,
            overflow,
        }
    }

    /// Decoded target when it is usable as a proof-of-work bound: not
    /// negative, not overflowing and not zero.
    pub fn target(self) -> Option<U256> {
        let decoded = self.decode();
        if decoded.negative || decoded.overflow || decoded.target.is_zero() {
            None
        } else {
            Some(decoded.target)
        }
    }

    /// Encode a non-negative target (rounds down to 24 bits of precision).
    pub fn from_target(target: U256) -> Self {
        Self::encode(target, false)
    }

    /// Encode a magnitude with an explicit sign.
    pub fn encode(target: U256, negative: bool) -> Self {
        let mut size = (target.bits() + 7) / 8;
        let mut compact = if size <= 3 {
            (target.low_u64() << (8 * (3 - size))) as u32
        } else {
            (target >> (8 * (size - 3))).low_u64() as u32
        };

        // The mantissa's top bit is the sign; shift into the next byte.
        if compact & 0x0080_0000 != 0 {
            compact >>= 8;
            size += 1;
        }
        compact |= (size as u32) << 24;
        if negative && (compact & 0x007f_ffff) != 0 {
            compact |= 0x0080_0000;
        }
        Self(compact)
    }
}

impl fmt::Display for CompactTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

impl From<u32> for CompactTarget {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn decode(bits: u32) -> DecodedTarget {
        CompactTarget(bits).decode()
    }

    #[test]
    fn test_zero_and_subnormal_encodings_decode_to_zero() {
        for bits in [
            0x0000_0000u32,
            0x0012_3456,
            0x0100_3456,
            0x0200_0056,
            0x0300_0000,
            0x0400_0000,
            0x0092_3456,
            0x0180_3456,
            0x0280_0056,
            0x0380_0000,
            0x0480_0000,
        ] {
            let d = decode(bits);
            assert!(d.target.is_zero(), "bits {bits:08x}");
            assert!(!d.negative && !d.overflow, "bits {bits:08x}");
            assert_eq!(CompactTarget::from_target(d.target).0, 0);
        }
    }

    #[test]
    fn test_small_exponents() {
        assert_eq!(decode(0x0112_3456).target, U256::from(0x12));
        assert_eq!(CompactTarget::from_target(U256::from(0x12)).0, 0x0112_0000);

        assert_eq!(decode(0x0212_3456).target, U256::from(0x1234));
        assert_eq!(CompactTarget::from_target(U256::from(0x1234)).0, 0x0212_3400);

        assert_eq!(decode(0x0312_3456).target, U256::from(0x12_3456));
        assert_eq!(CompactTarget::from_target(U256::from(0x12_3456)).0, 0x0312_3456);

        assert_eq!(decode(0x0412_3456).target, U256::from(0x1234_5600u64));
        assert_eq!(decode(0x0500_9234).target, U256::from(0x9234_0000u64));
        assert_eq!(
            CompactTarget::from_target(U256::from(0x9234_0000u64)).0,
            0x0500_9234
        );
    }

    #[test]
    fn test_negative_flag() {
        let d = decode(0x01fe_dcba);
        assert!(d.negative);
        assert_eq!(d.target, U256::from(0x7e));
        assert_eq!(CompactTarget::encode(d.target, true).0, 0x01fe_0000);

        let d = decode(0x0492_3456);
        assert!(d.negative);
        assert_eq!(d.target, U256::from(0x1234_5600u64));
        assert_eq!(CompactTarget::encode(d.target, true).0, 0x0492_3456);

        assert_eq!(CompactTarget(0x0492_3456).target(), None);
    }

    #[test]
    fn test_large_exponent_and_overflow() {
        let d = decode(0x2012_3456);
        assert_eq!(d.target, U256::from(0x12_3456) << 232);
        assert_eq!(CompactTarget::from_target(d.target).0, 0x2012_3456);

        let d = decode(0xff12_3456);
        assert!(d.overflow);
        assert_eq!(CompactTarget(0xff12_3456).target(), None);
    }

    #[test]
    fn test_network_limits() {
        let main = CompactTarget(0x1f3f_ffff).target().unwrap();
        assert_eq!(main, U256::from(0x3f_ffff) << 224);

        let regtest = CompactTarget(0x207f_ffff).target().unwrap();
        assert_eq!(regtest, U256::from(0x7f_ffff) << 232);
        assert_eq!(CompactTarget::from_target(regtest), CompactTarget(0x207f_ffff));
    }

    #[test]
    fn test_maximum_mantissa_moves_to_next_byte() {
        // 0x800000 would set the sign bit, so it is stored as 0x008000 with
        // a larger exponent.
        let target = U256::from(0x80_0000);
        assert_eq!(CompactTarget::from_target(target).0, 0x0400_8000);
        assert_eq!(decode(0x0400_8000).target, target);
    }

    #[test]
    fn test_display() {
        assert_eq!(CompactTarget(0x1f3f_ffff).to_string(), "1f3fffff");
    }

    proptest! {
        #[test]
        fn prop_canonical_encoding_round_trips(words in prop::array::uniform4(any::<u64>()), shift in 0usize..256) {
            let target = U256(words) >> shift;
            let compact = CompactTarget::from_target(target);
            let decoded = compact.decode();
            prop_assert!(!decoded.negative);
            prop_assert!(!decoded.overflow);
            prop_assert!(decoded.target <= target);
            prop_assert_eq!(CompactTarget::from_target(decoded.target), compact);
        }

        #[test]
        fn prop_decode_then_encode_is_stable(exp in 0u32..=0x22, mant in 0u32..=0xff_ffff) {
            let decoded = CompactTarget((exp << 24) | mant).decode();
            prop_assume!(!decoded.overflow);
            let once = CompactTarget::encode(decoded.target, decoded.negative);
            let twice = CompactTarget::encode(once.decode().target, once.decode().negative);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_canonical_bits_survive_decode_encode(
            exp in 1u32..=0x20,
            top in 1u32..=0x7f,
            rest in 0u32..=0xffff,
            negative in any::<bool>(),
        ) {
            // Exponents below 3 drop the mantissa's low bytes.
            let rest = match exp {
                1 => 0,
                2 => rest & 0xff00,
                _ => rest,
            };
            let sign = if negative { 0x0080_0000 } else { 0 };
            let bits = (exp << 24) | sign | (top << 16) | rest;

            let decoded = CompactTarget(bits).decode();
            prop_assert!(!decoded.overflow);
            prop_assert_eq!(decoded.negative, negative);
            prop_assert_eq!(CompactTarget::encode(decoded.target, decoded.negative).0, bits);
        }
    }
}
