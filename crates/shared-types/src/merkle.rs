//! # Merkle Root
//!
//! SHA-256d binary tree over transaction ids. Odd levels duplicate their
//! last node. A single leaf is its own root.

use shared_crypto::sha256d_many;

use crate::hash::Hash256;

/// Merkle root of `leaves`, or the zero hash for an empty list.
pub fn merkle_root(leaves: &[Hash256]) -> Hash256 {
    if leaves.is_empty() {
        return Hash256::ZERO;
    }

    let mut level: Vec<Hash256> = leaves.to_vec();
    while level.len() > 1 {
        if level.len() % 2 == 1 {
            if let Some(last) = level.last().copied() {
                level.push(last);
            }
        }
        level = level
            .chunks_exact(2)
            .map(|pair| Hash256(sha256d_many(&[&pair[0].0, &pair[1].0])))
            .collect();
    }
    level[0]
}
