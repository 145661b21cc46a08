//! # yespower 1.0 (BLAKE2b)
//!
//! Memory-hard proof-of-work hash. The mixing core is yespower 1.0
//! (pwxform with three S-boxes, Salsa20/2, the `smix1`/`smix2` schedule);
//! the prehash, PBKDF2 and final HMAC use BLAKE2b-256 where the reference
//! uses SHA-256.
//!
//! Word layout: blocks are held in the "SIMD shuffled" order used by the
//! reference implementation (`X[i] = B[i * 5 % 16]` per 64-byte
//! sub-block). pwxform lanes and S-box contents are defined over that
//! order, so the shuffle is part of the algorithm, not an optimisation.

use crate::errors::CryptoError;
use crate::hashing::{blake2b_256, Hash};
use crate::kdf::{hmac_blake2b_256, pbkdf2_blake2b_256};

const PWX_SIMPLE: usize = 2;
const PWX_GATHER: usize = 4;
const PWX_ROUNDS: usize = 3;
const SWIDTH: u32 = 11;
const SALSA20_ROUNDS: usize = 2;

/// 64-bit words per S-box.
const SBOX_WORDS: usize = (1 << SWIDTH) * PWX_SIMPLE;
/// Total S-box size in bytes (three boxes).
const SBOX_BYTES: usize = 3 * SBOX_WORDS * 8;
const SMASK: u32 = ((1 << SWIDTH) - 1) * (PWX_SIMPLE as u32) * 8;

/// yespower cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YespowerParams {
    /// Number of 128r-byte blocks in the main scratchpad (power of two)
    pub n: u32,
    /// Block size factor
    pub r: u32,
    /// Personalization string (PBKDF2 salt)
    pub pers: &'static [u8],
}

impl YespowerParams {
    /// Parameters of the MicroBitcoin work hash.
    pub const MICROBITCOIN: Self = Self {
        n: 2048,
        r: 32,
        pers: b"Now I am become Death, the destroyer of worlds",
    };

    /// Reject parameters outside the range the algorithm is defined for.
    pub fn validate(&self) -> Result<(), CryptoError> {
        let n_ok = (1024..=512 * 1024).contains(&self.n) && self.n.is_power_of_two();
        let r_ok = (8..=32).contains(&self.r);
        if n_ok && r_ok {
            Ok(())
        } else {
            Err(CryptoError::InvalidYespowerParams {
                n: self.n,
                r: self.r,
            })
        }
    }

    /// Scratchpad bytes needed for one hash.
    pub fn memory_cost(&self) -> usize {
        128 * self.r as usize * self.n as usize + SBOX_BYTES
    }
}

/// Compute the yespower hash of `input`.
///
/// The output is in hash byte order: compare it as a little-endian 256-bit
/// integer against a target.
pub fn yespower(input: &[u8], params: &YespowerParams) -> Result<Hash, CryptoError> {
    params.validate()?;
    let n = params.n as usize;
    let r = params.r as usize;
    let s = 32 * r;

    let prehash = blake2b_256(input);
    // Only the first 128 bytes seed the state; the remaining blocks are
    // expanded from block 0 inside smix1.
    let mut seed = [0u8; 128];
    pbkdf2_blake2b_256(&prehash, params.pers, 1, &mut seed);
    let mut hmac_message = [0u8; 32];
    hmac_message.copy_from_slice(&seed[..32]);

    let mut b = alloc_words(s)?;
    for (word, bytes) in b.iter_mut().zip(seed.chunks_exact(4)) {
        *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }
    let mut x = alloc_words(s)?;

    let mut sbox_words = alloc_words(SBOX_BYTES / 4)?;
    shuffle_in(&b[..32], &mut x[..32]);
    fill(&mut x[..32], &mut sbox_words, SBOX_BYTES / 128, blockmix_salsa);
    shuffle_out(&x[..32], &mut b[..32]);
    let mut ctx = Pwxform::new(&sbox_words);
    drop(sbox_words);

    let mut v = alloc_words(s * n)?;
    smix1(&mut b, r, n, &mut v, &mut x, &mut ctx);

    let mut nloop_all = (n + 2) / 3;
    let mut nloop_rw = nloop_all;
    nloop_all = (nloop_all + 1) & !1;
    nloop_rw = (nloop_rw + 1) & !1;
    smix2(&mut b, r, n, nloop_rw, &mut v, &mut x, &mut ctx);
    smix2(&mut b, r, n, nloop_all - nloop_rw, &mut v, &mut x, &mut ctx);

    let mut tail = [0u8; 64];
    for (bytes, word) in tail.chunks_exact_mut(4).zip(&b[s - 16..]) {
        bytes.copy_from_slice(&word.to_le_bytes());
    }
    Ok(hmac_blake2b_256(&tail, &hmac_message))
}

fn alloc_words(len: usize) -> Result<Vec<u32>, CryptoError> {
    let mut words = Vec::new();
    words
        .try_reserve_exact(len)
        .map_err(|_| CryptoError::OutOfMemory { bytes: len * 4 })?;
    words.resize(len, 0);
    Ok(words)
}

/// pwxform state: the three S-boxes live in one buffer, addressed by
/// rotating offsets.
struct Pwxform {
    s: Vec<u64>,
    s0: usize,
    s1: usize,
    s2: usize,
    w: usize,
}

impl Pwxform {
    fn new(words: &[u32]) -> Self {
        let s = words
            .chunks_exact(2)
            .map(|pair| u64::from(pair[0]) | (u64::from(pair[1]) << 32))
            .collect();
        Self {
            s,
            s0: 0,
            s1: SBOX_WORDS,
            s2: 2 * SBOX_WORDS,
            w: 0,
        }
    }

    fn transform(&mut self, x: &mut [u32]) {
        let (s0, s1) = (self.s0, self.s1);
        let mut w = self.w;

        for round in 0..PWX_ROUNDS {
            for j in 0..PWX_GATHER {
                let lane = j * PWX_SIMPLE * 2;
                let p0 = s0 + ((x[lane] & SMASK) / 8) as usize;
                let p1 = s1 + ((x[lane + 1] & SMASK) / 8) as usize;

                for k in 0..PWX_SIMPLE {
                    let lo = lane + 2 * k;
                    let product = u64::from(x[lo + 1]) * u64::from(x[lo]);
                    let value = product.wrapping_add(self.s[p0 + k]) ^ self.s[p1 + k];
                    x[lo] = value as u32;
                    x[lo + 1] = (value >> 32) as u32;
                }

                if round == 0 || j < PWX_GATHER / 2 {
                    if j & 1 == 1 {
                        for k in 0..PWX_SIMPLE {
                            self.s[s1 + w] = lane_word(x, lane + 2 * k);
                            w += 1;
                        }
                    } else {
                        for k in 0..PWX_SIMPLE {
                            self.s[s0 + w + k] = lane_word(x, lane + 2 * k);
                        }
                    }
                }
            }
        }

        self.s0 = self.s2;
        self.s1 = s0;
        self.s2 = s1;
        self.w = w & (SBOX_WORDS - 1);
    }

    fn blockmix(&mut self, b: &mut [u32], r: usize) {
        let r1 = 2 * r;
        let mut x = [0u32; 16];
        x.copy_from_slice(&b[(r1 - 1) * 16..r1 * 16]);

        for i in 0..r1 {
            let block = &mut b[i * 16..(i + 1) * 16];
            xor_into(&mut x, block);
            self.transform(&mut x);
            block.copy_from_slice(&x);
        }

        salsa20(&mut b[(r1 - 1) * 16..r1 * 16]);
    }
}

#[inline]
fn lane_word(x: &[u32], lo: usize) -> u64 {
    u64::from(x[lo]) | (u64::from(x[lo + 1]) << 32)
}

#[inline]
fn xor_into(dst: &mut [u32], src: &[u32]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= s;
    }
}

fn shuffle_in(b: &[u32], x: &mut [u32]) {
    for (xb, bb) in x.chunks_exact_mut(16).zip(b.chunks_exact(16)) {
        for i in 0..16 {
            xb[i] = bb[i * 5 % 16];
        }
    }
}

fn shuffle_out(x: &[u32], b: &mut [u32]) {
    for (bb, xb) in b.chunks_exact_mut(16).zip(x.chunks_exact(16)) {
        for i in 0..16 {
            bb[i * 5 % 16] = xb[i];
        }
    }
}

/// Sequential-write loop shared by the S-box fill and `smix1`.
fn fill(x: &mut [u32], v: &mut [u32], n: usize, mut mix: impl FnMut(&mut [u32])) {
    let s = x.len();
    for i in 0..n {
        v[i * s..(i + 1) * s].copy_from_slice(x);
        if i > 1 {
            let j = wrap(x[s - 16] as usize, i);
            xor_into(x, &v[j * s..(j + 1) * s]);
        }
        mix(x);
    }
}

/// `(x mod p2floor(i)) + (i - p2floor(i))`
#[inline]
fn wrap(x: usize, i: usize) -> usize {
    let n = 1usize << (usize::BITS - 1 - i.leading_zeros());
    (x & (n - 1)) + (i - n)
}

fn smix1(b: &mut [u32], r: usize, n: usize, v: &mut [u32], x: &mut [u32], ctx: &mut Pwxform) {
    shuffle_in(b, x);
    for k in 1..r {
        x.copy_within((k - 1) * 32..k * 32, k * 32);
        ctx.blockmix(&mut x[k * 32..(k + 1) * 32], 1);
    }
    fill(x, v, n, |x| ctx.blockmix(x, r));
    shuffle_out(x, b);
}

fn smix2(
    b: &mut [u32],
    r: usize,
    n: usize,
    nloop: usize,
    v: &mut [u32],
    x: &mut [u32],
    ctx: &mut Pwxform,
) {
    let s = 32 * r;
    shuffle_in(b, x);
    for _ in 0..nloop {
        let j = x[s - 16] as usize & (n - 1);
        let slot = &mut v[j * s..(j + 1) * s];
        xor_into(x, slot);
        if nloop != 2 {
            slot.copy_from_slice(x);
        }
        ctx.blockmix(x, r);
    }
    shuffle_out(x, b);
}

fn blockmix_salsa(b: &mut [u32]) {
    let mut x = [0u32; 16];
    x.copy_from_slice(&b[16..32]);
    for i in 0..2 {
        let block = &mut b[i * 16..(i + 1) * 16];
        xor_into(&mut x, block);
        salsa20(&mut x);
        block.copy_from_slice(&x);
    }
}

#[inline(always)]
fn quarter(x: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    x[b] ^= x[a].wrapping_add(x[d]).rotate_left(7);
    x[c] ^= x[b].wrapping_add(x[a]).rotate_left(9);
    x[d] ^= x[c].wrapping_add(x[b]).rotate_left(13);
    x[a] ^= x[d].wrapping_add(x[c]).rotate_left(18);
}

/// Salsa20 core on a shuffled 16-word block.
fn salsa20(b: &mut [u32]) {
    let mut x = [0u32; 16];
    for i in 0..16 {
        x[i * 5 % 16] = b[i];
    }
    for _ in (0..SALSA20_ROUNDS).step_by(2) {
        quarter(&mut x, 0, 4, 8, 12);
        quarter(&mut x, 5, 9, 13, 1);
        quarter(&mut x, 10, 14, 2, 6);
        quarter(&mut x, 15, 3, 7, 11);
        quarter(&mut x, 0, 1, 2, 3);
        quarter(&mut x, 5, 6, 7, 4);
        quarter(&mut x, 10, 11, 8, 9);
        quarter(&mut x, 15, 12, 13, 14);
    }
    for i in 0..16 {
        b[i] = b[i].wrapping_add(x[i * 5 % 16]);
    }
}
