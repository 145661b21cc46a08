//! # Genesis Vectors
//!
//! Each network's recipe must rebuild the canonical genesis block. These
//! hashes are the cross-implementation oracle for the serializer, the
//! merkle tree, BLAKE2b and yespower together.

#[cfg(test)]
mod tests {
    use mbc_01_chain_params::networks::{regtest, signet, testnet};
    use mbc_01_chain_params::{
        create_chain_params, expected_genesis, genesis_params, verify_genesis, ArgsMap,
        ChainParamsError, EmptySnapshot, Network,
    };
    use mbc_02_block_production::{create_genesis_block, CachedHeader};
    use shared_types::{Encodable, Hash256};

    const TESTNET_HEADER: &str = "010000000000000000000000000000000000000000000000000000000000000000000000f63ae42800b59c4fcc043ed52750cfdb80b2f374d04c7fabbe1c953cc769c4ea11a76b61ffff3f1f53080000";

    #[test]
    fn test_regtest_signet_testnet_rebuild() {
        for network in [Network::RegTest, Network::Signet, Network::TestNet] {
            let params = create_chain_params(network, &ArgsMap::new(), &EmptySnapshot).unwrap();
            let expected = expected_genesis(network);

            assert_eq!(params.genesis_hash(), expected.index_hash, "{network}");
            assert_eq!(params.genesis.header.merkle_root, expected.merkle_root, "{network}");
            assert_eq!(params.consensus.genesis_work_hash, expected.work_hash, "{network}");
            assert!(params.genesis.header.prev_blockhash.is_zero());
            assert_eq!(params.genesis.transactions.len(), 1);
            assert_eq!(params.genesis.transactions[0].outputs.len(), 1);
        }
    }

    #[test]
    fn test_testnet_header_bytes_and_work_hash() {
        let block = create_genesis_block(&testnet::genesis_params(), &[]);
        assert_eq!(hex::encode(block.header.to_bytes()), TESTNET_HEADER);

        let cached = CachedHeader::new(block.header);
        let work = cached.work_hash_cached().unwrap();
        assert_eq!(
            work.to_string(),
            "002ccba2978484648cc5b9ebd95a277fa2d26a56e29e787279e14452cc195fb5"
        );
        assert!(work.to_u256() <= block.header.bits.target().unwrap());
    }

    #[test]
    fn test_single_transaction_root_is_txid() {
        for network in [Network::RegTest, Network::Signet, Network::TestNet] {
            let block = create_genesis_block(&genesis_params(network), &[]);
            assert_eq!(block.header.merkle_root, block.transactions[0].txid());
        }
    }

    #[test]
    fn test_recipe_change_is_caught() {
        let mut recipe = regtest::genesis_params();
        recipe.time += 1;
        let block = create_genesis_block(&recipe, &[]);
        let err = verify_genesis(Network::RegTest, &block, &regtest::EXPECTED_GENESIS).unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(
            err,
            ChainParamsError::GenesisMismatch { what: "index hash", .. }
        ));
    }

    #[test]
    fn test_wrong_work_hash_is_caught() {
        let block = create_genesis_block(&testnet::genesis_params(), &[]);
        let mut expected = testnet::EXPECTED_GENESIS;
        expected.work_hash = Some(Hash256::ZERO);
        let err = verify_genesis(Network::TestNet, &block, &expected).unwrap_err();
        assert!(matches!(
            err,
            ChainParamsError::GenesisMismatch { what: "work hash", .. }
        ));
    }

    #[test]
    fn test_signet_genesis_shares_main_message() {
        let signet_block = create_genesis_block(&signet::genesis_params(), &[]);
        let main_recipe = genesis_params(Network::Main);
        let main_block = create_genesis_block(&main_recipe, &[]);
        // Same coinbase, different header.
        assert_eq!(signet_block.transactions[0].consensus_serialize(), main_block.transactions[0].consensus_serialize());
        assert_ne!(signet_block.index_hash(), main_block.index_hash());
    }

    #[test]
    fn test_main_without_snapshot_is_fatal() {
        let err = create_chain_params(Network::Main, &ArgsMap::new(), &EmptySnapshot).unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(
            err,
            ChainParamsError::GenesisMismatch { network: Network::Main, what: "index hash", .. }
        ));
    }
}
