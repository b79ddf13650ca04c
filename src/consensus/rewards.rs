//! Super-stake reward tiers
//!
//! A super-stake block advertises its tier with a bit flag. Each tier fixes the
//! minimum staked value, the reward paid and the timespan between rewards.
//! Flags may coexist in one integer; the lowest tier present wins.

use serde::Serialize;
use crate::constants::{COIN, MAX_MONEY};

/// SuperStake 5K block flag
pub const SUPER_STAKE_5K: u32 = 1 << 10;
/// SuperStake 15K block flag
pub const SUPER_STAKE_15K: u32 = 1 << 11;
/// SuperStake 60K block flag
pub const SUPER_STAKE_60K: u32 = 1 << 12;

/// Timespan reported when no tier applies
pub const NO_TIER_TIMESPAN: i64 = -1;

const HOUR: i64 = 60 * 60;

/// Recognized super-stake tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RewardTier {
    Stake5K,
    Stake15K,
    Stake60K,
}

impl RewardTier {
    /// Resolve the governing tier, checking 5K, then 15K, then 60K
    pub fn from_flags(flags: u32) -> Option<Self> {
        if flags & SUPER_STAKE_5K != 0 {
            Some(RewardTier::Stake5K)
        } else if flags & SUPER_STAKE_15K != 0 {
            Some(RewardTier::Stake15K)
        } else if flags & SUPER_STAKE_60K != 0 {
            Some(RewardTier::Stake60K)
        } else {
            None
        }
    }

    pub fn flag(self) -> u32 {
        match self {
            RewardTier::Stake5K => SUPER_STAKE_5K,
            RewardTier::Stake15K => SUPER_STAKE_15K,
            RewardTier::Stake60K => SUPER_STAKE_60K,
        }
    }

    pub fn schedule(self) -> RewardSchedule {
        match self {
            RewardTier::Stake5K => RewardSchedule {
                min_value: 50_000 * COIN,
                reward: 5_000 * COIN,
                timespan: HOUR,
            },
            RewardTier::Stake15K => RewardSchedule {
                min_value: 100_000 * COIN,
                reward: 15_000 * COIN,
                timespan: 8 * HOUR,
            },
            RewardTier::Stake60K => RewardSchedule {
                min_value: 300_000 * COIN,
                reward: 60_000 * COIN,
                timespan: 24 * HOUR,
            },
        }
    }
}

/// (minimum stake, reward, timespan) for one tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RewardSchedule {
    /// Minimum staked value in base units
    pub min_value: i64,
    /// Reward in base units
    pub reward: i64,
    /// Seconds between rewards, or `NO_TIER_TIMESPAN`
    pub timespan: i64,
}

impl RewardSchedule {
    /// Sentinel for flags without a recognized tier.
    ///
    /// The minimum equals `MAX_MONEY`, so no real stake ever qualifies.
    pub const NOT_APPLICABLE: RewardSchedule = RewardSchedule {
        min_value: MAX_MONEY,
        reward: 0,
        timespan: NO_TIER_TIMESPAN,
    };

    pub fn is_applicable(&self) -> bool {
        self.timespan != NO_TIER_TIMESPAN
    }
}

/// Resolve the reward schedule for raw tier flags
pub fn resolve_reward_tier(flags: u32) -> RewardSchedule {
    RewardTier::from_flags(flags)
        .map(RewardTier::schedule)
        .unwrap_or(RewardSchedule::NOT_APPLICABLE)
}

/// Minimum staked value for a super-stake block
pub fn super_stake_min_value_in(flags: u32) -> i64 {
    resolve_reward_tier(flags).min_value
}

/// Reward paid to a super-stake block
pub fn super_stake_reward(flags: u32) -> i64 {
    resolve_reward_tier(flags).reward
}

/// Timespan between super-stake rewards
pub fn super_stake_timespan(flags: u32) -> i64 {
    resolve_reward_tier(flags).timespan
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_5k() {
        assert_eq!(
            resolve_reward_tier(SUPER_STAKE_5K),
            RewardSchedule {
                min_value: 50_000 * COIN,
                reward: 5_000 * COIN,
                timespan: 3_600,
            }
        );
    }

    #[test]
    fn test_tier_15k() {
        assert_eq!(
            resolve_reward_tier(SUPER_STAKE_15K),
            RewardSchedule {
                min_value: 100_000 * COIN,
                reward: 15_000 * COIN,
                timespan: 8 * 3_600,
            }
        );
    }

    #[test]
    fn test_tier_60k() {
        assert_eq!(
            resolve_reward_tier(SUPER_STAKE_60K),
            RewardSchedule {
                min_value: 300_000 * COIN,
                reward: 60_000 * COIN,
                timespan: 24 * 3_600,
            }
        );
    }

    #[test]
    fn test_no_tier_is_sentinel() {
        let schedule = resolve_reward_tier(0);
        assert_eq!(schedule.min_value, 2_000_000_000 * COIN);
        assert_eq!(schedule.reward, 0);
        assert_eq!(schedule.timespan, -1);
        assert!(!schedule.is_applicable());
    }

    #[test]
    fn test_unrelated_bits_ignored() {
        assert_eq!(resolve_reward_tier(1 << 9), RewardSchedule::NOT_APPLICABLE);
        assert_eq!(resolve_reward_tier(1 << 13), RewardSchedule::NOT_APPLICABLE);
        assert_eq!(
            resolve_reward_tier(SUPER_STAKE_15K | 1),
            RewardTier::Stake15K.schedule()
        );
    }

    #[test]
    fn test_lowest_tier_governs() {
        let all = SUPER_STAKE_5K | SUPER_STAKE_15K | SUPER_STAKE_60K;
        assert_eq!(RewardTier::from_flags(all), Some(RewardTier::Stake5K));
        assert_eq!(
            RewardTier::from_flags(SUPER_STAKE_15K | SUPER_STAKE_60K),
            Some(RewardTier::Stake15K)
        );
        assert_eq!(super_stake_reward(all), 5_000 * COIN);
        assert_eq!(super_stake_min_value_in(all), 50_000 * COIN);
        assert_eq!(super_stake_timespan(all), 3_600);
    }

    #[test]
    fn test_flag_roundtrip() {
        for tier in [RewardTier::Stake5K, RewardTier::Stake15K, RewardTier::Stake60K] {
            assert_eq!(RewardTier::from_flags(tier.flag()), Some(tier));
        }
    }
}
