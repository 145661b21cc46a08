//! # Chain Selection
//!
//! `create_chain_params` builds a profile as a plain value; callers that
//! can pass it around explicitly should. `select_params` installs one
//! profile for the whole process. Selection happens once: repeating it
//! for the same network returns the installed profile, asking for a
//! different network fails. A repeat call still parses its overrides and
//! reports bad ones, but valid overrides never replace the installed
//! profile.

use std::sync::OnceLock;

use tracing::info;

use crate::args::ArgsSource;
use crate::error::{ChainParamsError, Result};
use crate::network::Network;
use crate::networks;
use crate::profile::ChainParams;
use crate::snapshot::SnapshotProvider;

static SELECTED: OnceLock<ChainParams> = OnceLock::new();

/// Builds and verifies the profile of `network`.
pub fn create_chain_params(
    network: Network,
    args: &dyn ArgsSource,
    snapshot: &dyn SnapshotProvider,
) -> Result<ChainParams> {
    let params = match network {
        Network::Main => networks::main::chain_params(snapshot)?,
        Network::TestNet => networks::testnet::chain_params(snapshot)?,
        Network::Signet => networks::signet::chain_params(args, snapshot)?,
        Network::RegTest => networks::regtest::chain_params(args, snapshot)?,
    };
    info!(
        %network,
        genesis = %params.genesis_hash(),
        port = params.default_port,
        magic = %hex::encode(params.message_start),
        "Chain parameters ready"
    );
    Ok(params)
}

/// [`create_chain_params`] from a network name.
pub fn create_chain_params_by_name(
    chain: &str,
    args: &dyn ArgsSource,
    snapshot: &dyn SnapshotProvider,
) -> Result<ChainParams> {
    create_chain_params(chain.parse()?, args, snapshot)
}

/// Installs the process-wide profile for `network`.
pub fn select_params(
    network: Network,
    args: &dyn ArgsSource,
    snapshot: &dyn SnapshotProvider,
) -> Result<&'static ChainParams> {
    if let Some(current) = SELECTED.get() {
        let current = same_network(current, network)?;
        networks::validate_overrides(network, args)?;
        return Ok(current);
    }

    let params = create_chain_params(network, args, snapshot)?;
    // A concurrent selection may have won; the stored value decides.
    let current = SELECTED.get_or_init(|| params);
    same_network(current, network)
}

fn same_network(current: &'static ChainParams, network: Network) -> Result<&'static ChainParams> {
    if current.network() == network {
        Ok(current)
    } else {
        Err(ChainParamsError::AlreadySelected(current.network()))
    }
}

/// The process-wide profile, if one was selected.
pub fn params() -> Option<&'static ChainParams> {
    SELECTED.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::ArgsMap;
    use crate::snapshot::EmptySnapshot;

    #[test]
    fn test_unknown_chain() {
        let err = create_chain_params_by_name("bogus", &ArgsMap::new(), &EmptySnapshot).unwrap_err();
        assert_eq!(err, ChainParamsError::UnknownChain("bogus".into()));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_create_is_independent_of_selection() {
        let a = create_chain_params(Network::RegTest, &ArgsMap::new(), &EmptySnapshot).unwrap();
        let b = create_chain_params_by_name("regtest", &ArgsMap::new(), &EmptySnapshot).unwrap();
        assert_eq!(a.genesis_hash(), b.genesis_hash());
        assert_eq!(a.consensus, b.consensus);
    }
}
