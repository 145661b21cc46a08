//! # Consensus Serialization
//!
//! Byte layout shared by every implementation of the protocol. All
//! integers are little-endian; variable-length fields carry a compact-size
//! prefix.

use crate::compact::CompactTarget;
use crate::hash::Hash256;
use crate::script::Script;

/// Types with a canonical consensus byte encoding.
pub trait Encodable {
    /// Append the encoding to `out`.
    fn consensus_encode(&self, out: &mut Vec<u8>);

    /// Encode into a fresh buffer.
    fn consensus_serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.consensus_encode(&mut out);
        out
    }
}

/// Write a compact-size ("varint") length prefix.
pub fn write_compact_size(out: &mut Vec<u8>, n: u64) {
    match n {
        0..=0xfc => out.push(n as u8),
        0xfd..=0xffff => {
            out.push(0xfd);
            out.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            out.push(0xfe);
            out.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            out.push(0xff);
            out.extend_from_slice(&n.to_le_bytes());
        }
    }
}

macro_rules! impl_encodable_le {
    ($($ty:ty),*) => {
        $(
            impl Encodable for $ty {
                fn consensus_encode(&self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_le_bytes());
                }
            }
        )*
    };
}

impl_encodable_le!(u8, u16, u32, u64, i32, i64);

impl Encodable for Hash256 {
    fn consensus_encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.0);
    }
}

impl Encodable for CompactTarget {
    fn consensus_encode(&self, out: &mut Vec<u8>) {
        self.0.consensus_encode(out);
    }
}

impl Encodable for Script {
    fn consensus_encode(&self, out: &mut Vec<u8>) {
        write_compact_size(out, self.len() as u64);
        out.extend_from_slice(self.as_bytes());
    }
}

impl<T: Encodable> Encodable for Vec<T> {
    fn consensus_encode(&self, out: &mut Vec<u8>) {
        write_compact_size(out, self.len() as u64);
        for item in self {
            item.consensus_encode(out);
        }
    }
}
