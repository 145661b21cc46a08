//! Network identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChainParamsError;

/// The four supported chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Network {
    /// Production chain
    Main,
    /// Public test chain
    TestNet,
    /// Signature-challenge test chain
    Signet,
    /// Local regression-test chain
    RegTest,
}

impl Network {
    /// All networks, in canonical order.
    pub const ALL: [Network; 4] = [
        Network::Main,
        Network::TestNet,
        Network::Signet,
        Network::RegTest,
    ];

    /// Canonical name used on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Network::Main => "main",
            Network::TestNet => "test",
            Network::Signet => "signet",
            Network::RegTest => "regtest",
        }
    }

    /// Only signet and regtest accept runtime overrides.
    pub const fn accepts_overrides(self) -> bool {
        matches!(self, Network::Signet | Network::RegTest)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ChainParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Network::ALL
            .into_iter()
            .find(|n| n.as_str() == s)
            .ok_or_else(|| ChainParamsError::UnknownChain(s.to_string()))
    }
}

impl TryFrom<String> for Network {
    type Error = ChainParamsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Network> for String {
    fn from(network: Network) -> Self {
        network.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for network in Network::ALL {
            assert_eq!(network.to_string().parse::<Network>().unwrap(), network);
        }
        assert_eq!("test".parse::<Network>().unwrap(), Network::TestNet);
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(
            "testnet".parse::<Network>(),
            Err(ChainParamsError::UnknownChain("testnet".into()))
        );
    }

    #[test]
    fn test_serde_uses_names() {
        assert_eq!(serde_json::to_string(&Network::RegTest).unwrap(), "\"regtest\"");
        assert!(serde_json::from_str::<Network>("\"mainnet\"").is_err());
    }
}
