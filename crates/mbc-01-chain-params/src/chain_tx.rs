//! Historical transaction statistics, used for sync progress estimates only.

use serde::{Deserialize, Serialize};

/// Snapshot of chain activity at a known block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChainTxData {
    /// UNIX time of the sampled block
    pub time: i64,
    /// Total transactions up to that block
    pub tx_count: u64,
    /// Transactions per second after that block
    pub tx_rate: f64,
}

impl ChainTxData {
    /// Expected total transaction count at `at_time`.
    pub fn estimate_tx_count(&self, at_time: i64) -> f64 {
        let elapsed = (at_time - self.time).max(0) as f64;
        self.tx_count as f64 + elapsed * self.tx_rate
    }
}
