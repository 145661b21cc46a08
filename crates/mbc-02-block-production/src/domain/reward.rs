//! Block Reward Schedule
//!
//! Geometric decay: the base reward is multiplied by `(1 - rate)` once per
//! epoch. There is no halving and no terminal zero.
//!
//! A separate one-time subsidy can be configured for a single height. It is
//! paid on top of the decayed reward for that height.

use serde::{Deserialize, Serialize};
use shared_types::Amount;

/// Per-epoch geometric decay of the block reward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardSchedule {
    /// Reward of epoch 0, in base units
    pub base_reward: Amount,
    /// Blocks per epoch
    pub epoch: u64,
    /// Fraction removed each epoch (0.3 keeps 70%)
    pub rate: f64,
}

impl RewardSchedule {
    /// Epoch index of `height`.
    pub fn epoch_of(&self, height: u64) -> u64 {
        if self.epoch == 0 {
            0
        } else {
            height / self.epoch
        }
    }

    /// Decayed reward at `height`, truncated to whole base units.
    pub fn subsidy_at(&self, height: u64) -> Amount {
        let epochs = self.epoch_of(height) as f64;
        (self.base_reward as f64 * (1.0 - self.rate).powf(epochs)) as Amount
    }
}

/// One-time payment at a fixed height.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsidyOverride {
    /// Recipient address (empty when unused)
    pub address: String,
    /// Height that receives the payment
    pub height: u64,
    /// Extra amount in base units
    pub amount: Amount,
}

/// Total subsidy at `height`: the decayed reward, plus the override
/// amount at the override height.
pub fn block_subsidy(
    height: u64,
    schedule: &RewardSchedule,
    subsidy_override: Option<&SubsidyOverride>,
) -> Amount {
    let decayed = schedule.subsidy_at(height);
    match subsidy_override {
        Some(o) if o.height == height => decayed.saturating_add(o.amount),
        _ => decayed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use shared_types::COIN;

    const EPOCH: u64 = 525_960 * 2;

    fn schedule() -> RewardSchedule {
        RewardSchedule {
            base_reward: 5500 * COIN,
            epoch: EPOCH,
            rate: 0.3,
        }
    }

    #[test]
    fn test_first_epoch_pays_base() {
        assert_eq!(schedule().subsidy_at(0), 55_000_000);
        assert_eq!(schedule().subsidy_at(EPOCH - 1), 55_000_000);
    }

    #[test]
    fn test_decay_per_epoch() {
        let s = schedule();
        for k in 1..=10u64 {
            let expected = (55_000_000f64 * 0.7f64.powf(k as f64)) as Amount;
            assert_eq!(s.subsidy_at(k * EPOCH), expected, "epoch {k}");
        }
        let second = s.subsidy_at(2 * EPOCH);
        assert!((26_949_999..=26_950_000).contains(&second));
    }

    #[test]
    fn test_override_is_added_at_its_height_only() {
        let o = SubsidyOverride {
            address: "rmbc1qe6dtjj50gc4fq0k3pal73zargq96c9mgvljrd6".into(),
            height: 200,
            amount: 1000 * COIN,
        };
        let s = schedule();
        assert_eq!(block_subsidy(199, &s, Some(&o)), 55_000_000);
        assert_eq!(block_subsidy(200, &s, Some(&o)), 55_000_000 + 10_000_000);
        assert_eq!(block_subsidy(201, &s, Some(&o)), 55_000_000);
        assert_eq!(block_subsidy(200, &s, None), 55_000_000);
    }

    #[test]
    fn test_zero_epoch_never_decays() {
        let s = RewardSchedule {
            epoch: 0,
            ..schedule()
        };
        assert_eq!(s.subsidy_at(u64::MAX), 55_000_000);
    }

    proptest! {
        #[test]
        fn prop_constant_within_epoch(k in 0u64..20, offset in 0u64..EPOCH) {
            let s = schedule();
            prop_assert_eq!(s.subsidy_at(k * EPOCH + offset), s.subsidy_at(k * EPOCH));
        }

        #[test]
        fn prop_never_increases(h in 0u64..(40 * EPOCH)) {
            let s = schedule();
            prop_assert!(s.subsidy_at(h + EPOCH) <= s.subsidy_at(h));
        }
    }
}
