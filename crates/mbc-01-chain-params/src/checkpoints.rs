//! # Checkpoints
//!
//! Hard-coded `(height, index hash)` anchors. A chain that disagrees with a
//! checkpoint at its height is rejected regardless of its work, so history
//! at or below the last checkpoint cannot be reorganised.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shared_types::Hash256;

use crate::error::{ChainParamsError, Result};

/// Ordered checkpoint set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointData {
    checkpoints: BTreeMap<u64, Hash256>,
}

impl CheckpointData {
    /// No checkpoints.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the set from pairs that must be listed in strictly
    /// increasing height order.
    pub fn from_ordered<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u64, Hash256)>,
    {
        let mut checkpoints = BTreeMap::new();
        let mut previous: Option<u64> = None;
        for (height, hash) in entries {
            if let Some(prev) = previous {
                if height <= prev {
                    return Err(ChainParamsError::UnorderedCheckpoints {
                        previous: prev,
                        next: height,
                    });
                }
            }
            checkpoints.insert(height, hash);
            previous = Some(height);
        }
        Ok(Self { checkpoints })
    }

    /// `false` only when a checkpoint exists at `height` and names a
    /// different block.
    pub fn verify(&self, height: u64, hash: &Hash256) -> bool {
        self.checkpoints
            .get(&height)
            .map_or(true, |expected| expected == hash)
    }

    /// Checkpoint at exactly `height`.
    pub fn get(&self, height: u64) -> Option<&Hash256> {
        self.checkpoints.get(&height)
    }

    /// Highest checkpointed height, if any.
    pub fn last_checkpoint_height(&self) -> Option<u64> {
        self.checkpoints.keys().next_back().copied()
    }

    /// Number of checkpoints.
    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    /// `true` when there are no checkpoints.
    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    /// Checkpoints in ascending height order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &Hash256)> {
        self.checkpoints.iter().map(|(h, hash)| (*h, hash))
    }
}
