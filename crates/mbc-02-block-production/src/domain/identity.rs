//! Block Header Identity
//!
//! A header carries two hashes: the cheap index hash (identity) and the
//! memory-hard work hash (proof of work). `CachedHeader` computes the work
//! hash at most once and re-checks the index hash on every read.
//!
//! ## Tamper check
//!
//! The cache records the index hash it was computed for. A read that finds
//! a different index hash means the header changed after caching; that is
//! reported as `HeaderTampered`, never answered with a stale or recomputed
//! value.

use parking_lot::Mutex;
use shared_crypto::CryptoError;
use shared_types::{BlockHeader, Hash256};

use crate::error::{BlockProductionError, Result};

/// The two hash functions applied to a serialized header.
pub trait HeaderHasher: Send + Sync {
    /// Fast identity hash.
    fn index_hash(&self, header: &BlockHeader) -> Hash256;

    /// Memory-hard proof-of-work hash.
    fn work_hash(&self, header: &BlockHeader) -> std::result::Result<Hash256, CryptoError>;
}

/// BLAKE2b-256 index hash and yespower work hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroHasher;

impl HeaderHasher for MicroHasher {
    fn index_hash(&self, header: &BlockHeader) -> Hash256 {
        header.index_hash()
    }

    fn work_hash(&self, header: &BlockHeader) -> std::result::Result<Hash256, CryptoError> {
        header.work_hash()
    }
}

/// Hash pair recorded by the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderHashes {
    /// Index hash the work hash was computed for
    pub index: Hash256,
    /// Cached work hash
    pub work: Hash256,
}

/// A header with a lazily computed, lock-guarded work hash.
#[derive(Debug)]
pub struct CachedHeader {
    header: BlockHeader,
    cache: Mutex<Option<HeaderHashes>>,
}

impl CachedHeader {
    /// Wrap a header with an empty cache.
    pub fn new(header: BlockHeader) -> Self {
        Self {
            header,
            cache: Mutex::new(None),
        }
    }

    /// The wrapped header.
    pub fn header(&self) -> &BlockHeader {
        &self.header
    }

    /// Mutable access. Mutating after the work hash was cached makes the
    /// next cached read fail with `HeaderTampered`.
    pub fn header_mut(&mut self) -> &mut BlockHeader {
        &mut self.header
    }

    /// Unwrap, dropping the cache.
    pub fn into_inner(self) -> BlockHeader {
        self.header
    }

    /// Index hash of the header as it is now. Never cached.
    pub fn index_hash(&self) -> Hash256 {
        self.header.index_hash()
    }

    /// Hashes recorded by the cache, if any.
    pub fn cached(&self) -> Option<HeaderHashes> {
        *self.cache.lock()
    }

    /// Cached work hash using the production hash functions.
    pub fn work_hash_cached(&self) -> Result<Hash256> {
        self.work_hash_cached_with(&MicroHasher)
    }

    /// Cached work hash using `hasher`.
    ///
    /// The lock is held across the work-hash computation, so concurrent
    /// first readers compute it exactly once and all observe one result.
    pub fn work_hash_cached_with(&self, hasher: &dyn HeaderHasher) -> Result<Hash256> {
        let current = hasher.index_hash(&self.header);

        let mut slot = self.cache.lock();
        if let Some(cached) = *slot {
            if cached.index != current {
                tracing::error!(
                    cached = %cached.index,
                    current = %current,
                    "block header changed after its work hash was cached"
                );
                return Err(BlockProductionError::HeaderTampered {
                    cached: cached.index,
                    current,
                });
            }
            return Ok(cached.work);
        }

        let work = hasher.work_hash(&self.header)?;
        *slot = Some(HeaderHashes {
            index: current,
            work,
        });
        Ok(work)
    }
}

impl Clone for CachedHeader {
    fn clone(&self) -> Self {
        Self {
            header: self.header,
            cache: Mutex::new(self.cached()),
        }
    }
}

impl From<BlockHeader> for CachedHeader {
    fn from(header: BlockHeader) -> Self {
        Self::new(header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::CompactTarget;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Cheap stand-in for yespower that counts invocations.
    struct CountingHasher {
        calls: AtomicUsize,
    }

    impl HeaderHasher for CountingHasher {
        fn index_hash(&self, header: &BlockHeader) -> Hash256 {
            header.index_hash()
        }

        fn work_hash(&self, header: &BlockHeader) -> std::result::Result<Hash256, CryptoError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut bytes = header.index_hash().0;
            bytes.reverse();
            Ok(Hash256(bytes))
        }
    }

    struct FailingHasher;

    impl HeaderHasher for FailingHasher {
        fn index_hash(&self, header: &BlockHeader) -> Hash256 {
            header.index_hash()
        }

        fn work_hash(&self, _: &BlockHeader) -> std::result::Result<Hash256, CryptoError> {
            Err(CryptoError::OutOfMemory { bytes: 1 << 23 })
        }
    }

    fn header() -> BlockHeader {
        BlockHeader {
            version: 1,
            time: 1_670_163_306,
            bits: CompactTarget(0x207f_ffff),
            nonce: 7,
            ..BlockHeader::default()
        }
    }

    #[test]
    fn test_work_hash_computed_once() {
        let hasher = CountingHasher {
            calls: AtomicUsize::new(0),
        };
        let cached = CachedHeader::new(header());

        let first = cached.work_hash_cached_with(&hasher).unwrap();
        let second = cached.work_hash_cached_with(&hasher).unwrap();

        assert_eq!(first, second);
        assert_eq!(hasher.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cached.cached().unwrap().index, cached.index_hash());
    }

    #[test]
    fn test_mutation_after_caching_is_detected() {
        let hasher = CountingHasher {
            calls: AtomicUsize::new(0),
        };
        let mut cached = CachedHeader::new(header());
        let before = cached.work_hash_cached_with(&hasher).unwrap();
        let original_index = cached.index_hash();

        cached.header_mut().nonce += 1;

        let err = cached.work_hash_cached_with(&hasher).unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(
            err,
            BlockProductionError::HeaderTampered {
                cached: original_index,
                current: cached.index_hash(),
            }
        );
        assert_eq!(cached.cached().unwrap().work, before);
        assert_eq!(hasher.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_mutation_before_caching_is_allowed() {
        let hasher = CountingHasher {
            calls: AtomicUsize::new(0),
        };
        let mut cached = CachedHeader::new(header());
        cached.header_mut().nonce = 99;
        assert!(cached.work_hash_cached_with(&hasher).is_ok());
    }

    #[test]
    fn test_primitive_failure_is_fatal_and_not_cached() {
        let cached = CachedHeader::new(header());
        let err = cached.work_hash_cached_with(&FailingHasher).unwrap_err();
        assert!(err.is_fatal());
        assert!(cached.cached().is_none());
    }

    #[test]
    fn test_clone_keeps_cache() {
        let hasher = CountingHasher {
            calls: AtomicUsize::new(0),
        };
        let cached = CachedHeader::new(header());
        cached.work_hash_cached_with(&hasher).unwrap();

        let copy = cached.clone();
        copy.work_hash_cached_with(&hasher).unwrap();
        assert_eq!(hasher.calls.load(Ordering::SeqCst), 1);
    }
}
