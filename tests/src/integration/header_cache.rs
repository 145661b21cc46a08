//! # Header Cache Concurrency
//!
//! Many readers racing on a fresh [`CachedHeader`] must share a single
//! work-hash computation.

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use mbc_01_chain_params::networks::regtest;
    use mbc_02_block_production::{create_genesis_block, CachedHeader, HeaderHasher};
    use shared_crypto::CryptoError;
    use shared_types::{BlockHeader, Hash256};

    struct SlowCountingHasher {
        calls: AtomicUsize,
    }

    impl HeaderHasher for SlowCountingHasher {
        fn index_hash(&self, header: &BlockHeader) -> Hash256 {
            header.index_hash()
        }

        fn work_hash(&self, header: &BlockHeader) -> Result<Hash256, CryptoError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(20));
            Ok(Hash256(shared_crypto::sha256(&header.to_bytes())))
        }
    }

    #[test]
    fn test_concurrent_first_readers_compute_once() {
        let header = create_genesis_block(&regtest::genesis_params(), &[]).header;
        let cached = CachedHeader::new(header);
        let hasher = SlowCountingHasher {
            calls: AtomicUsize::new(0),
        };

        let results: Vec<Hash256> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| cached.work_hash_cached_with(&hasher).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(hasher.calls.load(Ordering::SeqCst), 1);
        assert!(results.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(cached.cached().unwrap().index, regtest::EXPECTED_GENESIS.index_hash);
    }

    #[test]
    fn test_tampered_genesis_header_is_fatal() {
        let header = create_genesis_block(&regtest::genesis_params(), &[]).header;
        let mut cached = CachedHeader::new(header);
        cached.work_hash_cached().unwrap();

        cached.header_mut().time += 1;
        let err = cached.work_hash_cached().unwrap_err();
        assert!(err.is_fatal());
    }
}
