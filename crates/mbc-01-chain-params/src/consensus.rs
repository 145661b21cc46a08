//! # Consensus Rules
//!
//! The per-network constants every validation component reads. Built once
//! by the network profiles and never mutated afterwards (regtest
//! `-vbparams` overrides are applied during construction).

use serde::{Deserialize, Serialize};
use shared_types::{Amount, Hash256, Script, U256, COIN};

use mbc_02_block_production::{block_subsidy, RewardSchedule, SubsidyOverride};

use crate::deployments::{Deployment, DeploymentPos, Deployments};

/// Base reward of epoch 0.
pub const BASE_REWARD: Amount = 5500 * COIN;

/// Blocks per reward epoch (two years of one-minute blocks).
pub const REWARD_EPOCH: u64 = 525_960 * 2;

/// Fraction of the reward removed each epoch.
pub const REWARD_EPOCH_RATE: f64 = 0.3;

/// Blocks averaged by the LWMA difficulty algorithm.
pub const LWMA_AVERAGING_WINDOW: u64 = 90;

/// Soft forks enforced from genesis rather than signalled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuriedForks {
    /// Height in coinbase
    pub bip34: bool,
    /// OP_CHECKLOCKTIMEVERIFY
    pub bip65: bool,
    /// Strict DER signatures
    pub bip66: bool,
    /// Segregated witness
    pub segwit: bool,
    /// Relative lock-time (BIP68/112/113)
    pub csv: bool,
}

impl BuriedForks {
    /// Every buried fork enabled.
    pub const ALL_ENABLED: Self = Self {
        bip34: true,
        bip65: true,
        bip66: true,
        segwit: true,
        csv: true,
    };
}

/// Standard reward schedule shared by every network.
pub const fn default_reward_schedule() -> RewardSchedule {
    RewardSchedule {
        base_reward: BASE_REWARD,
        epoch: REWARD_EPOCH,
        rate: REWARD_EPOCH_RATE,
    }
}

/// Consensus constants of one network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusRules {
    /// Index hash of the genesis block
    pub genesis_hash: Hash256,
    /// Work hash of the genesis block, on networks that assert it
    pub genesis_work_hash: Option<Hash256>,
    /// Forks active from genesis
    pub buried: BuriedForks,
    /// Loosest target ever accepted
    pub pow_limit: U256,
    /// Desired seconds between blocks
    pub pow_target_spacing: u64,
    /// Allow minimum-difficulty blocks after a long gap
    pub allow_min_difficulty_blocks: bool,
    /// Keep difficulty fixed
    pub no_retargeting: bool,
    /// LWMA window in blocks
    pub lwma_averaging_window: u64,
    /// Signalling blocks needed within a window to lock in
    pub rule_change_activation_threshold: u32,
    /// Signalling window size
    pub miner_confirmation_window: u32,
    /// Version-bits deployments
    pub deployments: Deployments,
    /// Block reward decay
    pub reward: RewardSchedule,
    /// One-time payment at a fixed height
    pub subsidy_override: Option<SubsidyOverride>,
    /// Minimum accumulated work of an acceptable best chain
    pub minimum_chain_work: U256,
    /// Scripts below this block are assumed valid
    pub default_assume_valid: Hash256,
    /// Blocks are validated by signature instead of work
    pub signet_blocks: bool,
    /// Signet challenge script (empty elsewhere)
    pub signet_challenge: Script,
}

impl ConsensusRules {
    /// Blocks covered by one difficulty calculation.
    pub fn difficulty_adjustment_interval(&self) -> u64 {
        self.lwma_averaging_window
    }

    /// Seconds spanned by one averaging window at target spacing.
    pub fn lwma_timespan(&self) -> u64 {
        self.lwma_averaging_window * self.pow_target_spacing
    }

    /// Subsidy paid at `height`, including the one-time override.
    pub fn block_subsidy(&self, height: u64) -> Amount {
        block_subsidy(height, &self.reward, self.subsidy_override.as_ref())
    }

    /// Deployment parameters for `pos`.
    pub fn deployment(&self, pos: DeploymentPos) -> &Deployment {
        self.deployments.get(pos)
    }

    /// Every bit is in range and no two deployments that can signal at the
    /// same time share a bit.
    pub fn validate_deployment_bits(&self) -> bool {
        let entries: Vec<_> = self.deployments.iter().collect();
        if entries.iter().any(|(_, d)| !d.validate()) {
            return false;
        }
        entries.iter().enumerate().all(|(i, (_, a))| {
            entries[i + 1..]
                .iter()
                .all(|(_, b)| a.bit != b.bit || !a.overlaps(b))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(deployments: Deployments) -> ConsensusRules {
        ConsensusRules {
            genesis_hash: Hash256::ZERO,
            genesis_work_hash: None,
            buried: BuriedForks::ALL_ENABLED,
            pow_limit: U256::MAX,
            pow_target_spacing: 600,
            allow_min_difficulty_blocks: true,
            no_retargeting: true,
            lwma_averaging_window: LWMA_AVERAGING_WINDOW,
            rule_change_activation_threshold: 108,
            miner_confirmation_window: 144,
            deployments,
            reward: default_reward_schedule(),
            subsidy_override: Some(SubsidyOverride {
                address: "rmbc1qe6dtjj50gc4fq0k3pal73zargq96c9mgvljrd6".into(),
                height: 200,
                amount: 1000 * COIN,
            }),
            minimum_chain_work: U256::zero(),
            default_assume_valid: Hash256::ZERO,
            signet_blocks: false,
            signet_challenge: Script::new(),
        }
    }

    #[test]
    fn test_difficulty_window() {
        let r = rules(Deployments::new(Deployment::never_active(28), Deployment::always_active(2)));
        assert_eq!(r.difficulty_adjustment_interval(), 90);
        assert_eq!(r.lwma_timespan(), 54_000);
    }

    #[test]
    fn test_subsidy_includes_override() {
        let r = rules(Deployments::new(Deployment::never_active(28), Deployment::always_active(2)));
        assert_eq!(r.block_subsidy(0), 55_000_000);
        assert_eq!(r.block_subsidy(200), 65_000_000);
        assert_eq!(r.block_subsidy(REWARD_EPOCH), 38_500_000);
    }

    #[test]
    fn test_deployment_bit_conflicts() {
        let window = Deployment {
            bit: 3,
            start_time: 100,
            timeout: 200,
            min_activation_height: 0,
        };
        assert!(rules(Deployments::new(window, Deployment::always_active(3))).validate_deployment_bits());
        assert!(!rules(Deployments::new(window, window)).validate_deployment_bits());
        assert!(rules(Deployments::new(
            window,
            Deployment { start_time: 200, timeout: 300, ..window }
        ))
        .validate_deployment_bits());
        assert!(!rules(Deployments::new(Deployment::never_active(29), window)).validate_deployment_bits());
    }
}
