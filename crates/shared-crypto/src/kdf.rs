//! # BLAKE2b Keyed Hashing
//!
//! HMAC and PBKDF2 built on BLAKE2b-256, as used inside the yespower work
//! hash. The HMAC pads keys to 64 bytes (the SHA-256 block size the
//! construction was ported from), not to BLAKE2b's native 128-byte block,
//! so the generic `hmac` crate cannot be used here.

use blake2::Digest;

use crate::hashing::{blake2b_256, Blake2b256, Hash};

/// Key padding length of the HMAC construction.
const HMAC_PAD_LEN: usize = 64;

/// HMAC-BLAKE2b-256 with a 64-byte key pad.
pub fn hmac_blake2b_256(key: &[u8], message: &[u8]) -> Hash {
    let mut padded = [0u8; HMAC_PAD_LEN];
    if key.len() > HMAC_PAD_LEN {
        padded[..32].copy_from_slice(&blake2b_256(key));
    } else {
        padded[..key.len()].copy_from_slice(key);
    }

    let mut ipad = [0x36u8; HMAC_PAD_LEN];
    let mut opad = [0x5cu8; HMAC_PAD_LEN];
    for i in 0..HMAC_PAD_LEN {
        ipad[i] ^= padded[i];
        opad[i] ^= padded[i];
    }

    let mut inner = Blake2b256::new();
    inner.update(ipad);
    inner.update(message);
    let inner_hash = inner.finalize();

    let mut outer = Blake2b256::new();
    outer.update(opad);
    outer.update(inner_hash);
    outer.finalize().into()
}

/// PBKDF2 with HMAC-BLAKE2b-256 as the PRF. Fills `output` completely.
pub fn pbkdf2_blake2b_256(password: &[u8], salt: &[u8], iterations: u32, output: &mut [u8]) {
    let mut salted = Vec::with_capacity(salt.len() + 4);
    for (index, chunk) in output.chunks_mut(32).enumerate() {
        salted.clear();
        salted.extend_from_slice(salt);
        salted.extend_from_slice(&(index as u32 + 1).to_be_bytes());

        let mut u = hmac_blake2b_256(password, &salted);
        let mut t = u;
        for _ in 1..iterations {
            u = hmac_blake2b_256(password, &u);
            for (acc, byte) in t.iter_mut().zip(u.iter()) {
                *acc ^= byte;
            }
        }
        chunk.copy_from_slice(&t[..chunk.len()]);
    }
}
