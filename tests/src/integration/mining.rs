//! # Genesis Mining
//!
//! End-to-end nonce search with the production hash functions.

#[cfg(test)]
mod tests {
    use mbc_01_chain_params::networks::regtest;
    use mbc_02_block_production::{create_genesis_block, GenesisMiner, MinerConfig};

    #[test]
    fn test_regtest_search_from_zero_finds_canonical_nonce() {
        let mut recipe = regtest::genesis_params();
        recipe.nonce = 0;
        let mut header = create_genesis_block(&recipe, &[]).header;

        let miner = GenesisMiner::new(MinerConfig {
            batch_size: 2,
            threads: 1,
            ..MinerConfig::default()
        });
        let mined = miner.mine(&mut header).unwrap();

        assert_eq!(mined.nonce, 1);
        assert_eq!(mined.time, recipe.time);
        assert_eq!(mined.attempts, 2);
        assert_eq!(mined.index_hash, regtest::EXPECTED_GENESIS.index_hash);
        assert_eq!(mined.merkle_root, regtest::EXPECTED_GENESIS.merkle_root);
        assert!(mined.work_hash.to_u256() <= header.bits.target().unwrap());

        let json = serde_json::to_value(&mined).unwrap();
        assert_eq!(json["nonce"], 1);
    }
}
