//! Configuration types for block production

use serde::Deserialize;

/// Nonces per search batch, and the progress-report interval.
pub const DEFAULT_BATCH_SIZE: u32 = 4096;

/// Runtime configuration for the genesis nonce search
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MinerConfig {
    /// Nonces hashed per batch; progress is logged once per batch
    pub batch_size: u32,

    /// Worker threads (0 = one per core)
    pub threads: usize,

    /// Override the candidate's starting nonce
    pub start_nonce: Option<u32>,

    /// Override the candidate's starting timestamp
    pub start_time: Option<u32>,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            threads: 0,
            start_nonce: None,
            start_time: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MinerConfig::default();
        assert_eq!(config.batch_size, 4096);
        assert_eq!(config.threads, 0);
        assert!(config.start_nonce.is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: MinerConfig = serde_json::from_str(r#"{"threads": 2, "start_nonce": 10}"#).unwrap();
        assert_eq!(config.threads, 2);
        assert_eq!(config.start_nonce, Some(10));
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
    }
}
