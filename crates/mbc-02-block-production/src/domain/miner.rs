//! Genesis Nonce Search
//!
//! Offline proof-of-work search for a candidate genesis header. Nonces are
//! hashed in batches across a rayon pool; `find_first` keeps the result
//! identical to a sequential scan (the lowest passing nonce wins).
//!
//! Termination is probabilistic. When the nonce space at one timestamp is
//! exhausted the nonce wraps to zero and the timestamp advances by one.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use shared_types::{BlockHeader, Hash256};
use tracing::{info, warn};

use crate::config::MinerConfig;
use crate::domain::identity::{HeaderHasher, MicroHasher};
use crate::error::{BlockProductionError, Result};

/// Outcome of a successful search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinedGenesis {
    /// Winning nonce
    pub nonce: u32,
    /// Timestamp the nonce was found at (advanced on wrap)
    pub time: u32,
    /// Identity hash of the mined header
    pub index_hash: Hash256,
    /// Work hash that met the target
    pub work_hash: Hash256,
    /// Merkle root, unchanged by the search
    pub merkle_root: Hash256,
    /// Work hashes evaluated in sequential order up to and including the
    /// winning nonce.
    pub attempts: u64,
}

/// Parallel nonce searcher.
#[derive(Debug, Clone, Default)]
pub struct GenesisMiner {
    config: MinerConfig,
}

impl GenesisMiner {
    /// Create a miner with the given configuration
    pub fn new(config: MinerConfig) -> Self {
        Self { config }
    }

    /// Search with the production hash functions.
    pub fn mine(&self, header: &mut BlockHeader) -> Result<MinedGenesis> {
        self.mine_with(header, &MicroHasher)
    }

    /// Increment `header.nonce` until its work hash is at or below the
    /// decoded target. On success `header` holds the winning nonce and time.
    pub fn mine_with(
        &self,
        header: &mut BlockHeader,
        hasher: &dyn HeaderHasher,
    ) -> Result<MinedGenesis> {
        let target = header
            .bits
            .target()
            .ok_or(BlockProductionError::InvalidTarget { bits: header.bits })?;

        if let Some(nonce) = self.config.start_nonce {
            header.nonce = nonce;
        }
        if let Some(time) = self.config.start_time {
            header.time = time;
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.threads)
            .build()
            .map_err(|e| BlockProductionError::MinerSetup(e.to_string()))?;
        let batch = self.config.batch_size.max(1);
        let mut attempts: u64 = 0;

        info!(
            bits = %header.bits,
            nonce = header.nonce,
            time = header.time,
            threads = pool.current_num_threads(),
            "Searching for genesis nonce"
        );

        loop {
            let start = header.nonce;
            let last = start.saturating_add(batch - 1);
            let template = *header;

            let found = pool.install(|| {
                (start..=last)
                    .into_par_iter()
                    .map(|nonce| {
                        let mut candidate = template;
                        candidate.nonce = nonce;
                        hasher.work_hash(&candidate).map(|work| (nonce, work))
                    })
                    .find_first(|result| match result {
                        Ok((_, work)) => work.to_u256() <= target,
                        Err(_) => true,
                    })
            });

            match found {
                Some(Ok((nonce, work_hash))) => {
                    attempts += u64::from(nonce - start) + 1;
                    header.nonce = nonce;
                    let mined = MinedGenesis {
                        nonce,
                        time: header.time,
                        index_hash: hasher.index_hash(header),
                        work_hash,
                        merkle_root: header.merkle_root,
                        attempts,
                    };
                    info!(
                        nonce = mined.nonce,
                        time = mined.time,
                        index_hash = %mined.index_hash,
                        work_hash = %mined.work_hash,
                        attempts = mined.attempts,
                        "Genesis nonce found"
                    );
                    return Ok(mined);
                }
                Some(Err(e)) => return Err(e.into()),
                None => {}
            }

            attempts += u64::from(last - start) + 1;
            info!(nonce = last, time = header.time, attempts, "Genesis search progress");

            if last == u32::MAX {
                header.nonce = 0;
                header.time = header.time.wrapping_add(1);
                warn!(time = header.time, "Nonce wrapped, incrementing time");
            } else {
                header.nonce = last + 1;
            }
        }
    }
}
