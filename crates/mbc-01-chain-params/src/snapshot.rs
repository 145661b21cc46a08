//! # Snapshot Boundary
//!
//! Pre-funding outputs for a genesis block come from an external provider.
//! Each network names where its snapshot lives; fetching and decoding the
//! file is the provider's job, including any fallback between hosts.

use serde::{Deserialize, Serialize};

pub use mbc_02_block_production::SnapshotEntry;

/// One download location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEndpoint {
    /// Base URL
    pub host: String,
    /// Path on the host
    pub path: String,
}

impl SnapshotEndpoint {
    /// Endpoint from host and path.
    pub fn new(host: &str, path: &str) -> Self {
        Self {
            host: host.to_string(),
            path: path.to_string(),
        }
    }
}

/// Where a network's snapshot is published.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotSource {
    /// Local cache file name, empty when the network has no snapshot
    pub file_name: String,
    /// Candidate hosts, in preference order
    pub providers: Vec<SnapshotEndpoint>,
}

impl SnapshotSource {
    /// No snapshot for this network.
    pub fn none() -> Self {
        Self::default()
    }

    /// `true` when nothing is published.
    pub fn is_none(&self) -> bool {
        self.file_name.is_empty() && self.providers.is_empty()
    }
}

/// Produces the ordered snapshot outputs for a source.
pub trait SnapshotProvider: Send + Sync {
    /// Entries in coinbase output order. Empty when no snapshot applies.
    fn load(&self, source: &SnapshotSource) -> Vec<SnapshotEntry>;
}

/// Provider that never funds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptySnapshot;

impl SnapshotProvider for EmptySnapshot {
    fn load(&self, _source: &SnapshotSource) -> Vec<SnapshotEntry> {
        Vec::new()
    }
}

/// Provider returning a fixed list for any source that publishes one.
#[derive(Debug, Clone, Default)]
pub struct StaticSnapshot {
    entries: Vec<SnapshotEntry>,
}

impl StaticSnapshot {
    /// Wrap a preloaded list.
    pub fn new(entries: Vec<SnapshotEntry>) -> Self {
        Self { entries }
    }
}

impl SnapshotProvider for StaticSnapshot {
    fn load(&self, source: &SnapshotSource) -> Vec<SnapshotEntry> {
        if source.is_none() {
            Vec::new()
        } else {
            self.entries.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::Script;

    fn mainnet_source() -> SnapshotSource {
        SnapshotSource {
            file_name: "mainnet.csv".into(),
            providers: vec![SnapshotEndpoint::new("http://snapshot.microbitcoin.org", "/mainnet.csv")],
        }
    }

    #[test]
    fn test_empty_provider() {
        assert!(EmptySnapshot.load(&mainnet_source()).is_empty());
    }

    #[test]
    fn test_static_provider_respects_source() {
        let entry = SnapshotEntry {
            script: Script::from_bytes(vec![0x51]),
            amount: 7,
        };
        let provider = StaticSnapshot::new(vec![entry.clone()]);
        assert_eq!(provider.load(&mainnet_source()), vec![entry]);
        assert!(provider.load(&SnapshotSource::none()).is_empty());
    }
}
