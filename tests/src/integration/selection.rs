//! # Profile Selection
//!
//! Construction from argument sources and the one-per-process global.

#[cfg(test)]
mod tests {
    use mbc_01_chain_params::{
        create_chain_params, params, select_params, ArgsMap, ChainOptions, ChainParamsError,
        DeploymentPos, EmptySnapshot, Network, NetworkProfile,
    };

    #[test]
    fn test_global_selection_is_idempotent() {
        let first = select_params(Network::RegTest, &ArgsMap::new(), &EmptySnapshot).unwrap();
        let again = select_params(Network::RegTest, &ArgsMap::new(), &EmptySnapshot).unwrap();
        assert!(std::ptr::eq(first, again));
        assert!(std::ptr::eq(params().unwrap(), first));

        let err = select_params(Network::Signet, &ArgsMap::new(), &EmptySnapshot).unwrap_err();
        assert_eq!(err, ChainParamsError::AlreadySelected(Network::RegTest));
        assert!(err.is_fatal());

        let bad = ArgsMap::new().with("vbparams", "bogus");
        let err = select_params(Network::RegTest, &bad, &EmptySnapshot).unwrap_err();
        assert_eq!(err, ChainParamsError::MalformedVbParams);
        assert!(err.is_config_error());
        assert!(std::ptr::eq(params().unwrap(), first));
    }

    #[test]
    fn test_json_options_drive_regtest() {
        let options = ChainOptions::from_json(
            r#"{"vbparams": ["testdummy:10:20:30"], "fastprune": true}"#,
        )
        .unwrap();
        let params = create_chain_params(Network::RegTest, &options, &EmptySnapshot).unwrap();

        assert_eq!(params.prune_after_height, 100);
        let dummy = params.consensus.deployment(DeploymentPos::TestDummy);
        assert_eq!((dummy.start_time, dummy.timeout, dummy.min_activation_height), (10, 20, 30));
        assert!(params.consensus.validate_deployment_bits());
    }

    #[test]
    fn test_overrides_ignored_off_test_chains() {
        let args = ArgsMap::new()
            .with("vbparams", "nonsense")
            .with("signetchallenge", "zz");
        let params = create_chain_params(Network::TestNet, &args, &EmptySnapshot).unwrap();
        assert_eq!(params.network(), Network::TestNet);
        assert!(matches!(params.profile, NetworkProfile::TestNet));
    }

    #[test]
    fn test_network_constants() {
        let regtest = create_chain_params(Network::RegTest, &ArgsMap::new(), &EmptySnapshot).unwrap();
        let signet = create_chain_params(Network::Signet, &ArgsMap::new(), &EmptySnapshot).unwrap();
        let testnet = create_chain_params(Network::TestNet, &ArgsMap::new(), &EmptySnapshot).unwrap();

        assert_eq!((regtest.default_port, regtest.bech32_hrp.as_str()), (18444, "rmbc"));
        assert_eq!((signet.default_port, signet.bech32_hrp.as_str()), (38333, "tmbc"));
        assert_eq!((testnet.default_port, testnet.bech32_hrp.as_str()), (16502, "tmbc"));
        assert_eq!(testnet.message_start, [0x74, 0x6d, 0x62, 0x63]);
        assert_eq!(regtest.base58_prefixes, signet.base58_prefixes);
        assert_eq!(testnet.base58_prefixes.pubkey_address, vec![26]);
        assert!(!testnet.require_standard());
        assert!(testnet.is_test_chain());
        for params in [&regtest, &signet, &testnet] {
            assert_eq!(params.consensus.lwma_averaging_window, 90);
            assert!(params.consensus.buried.segwit);
        }
    }
}
