//! Time-weighted reward accrual.
//!
//! A single monotone accumulator tracks reward-per-share; each holder
//! carries a personal marker of the accumulator value they were last
//! settled at, so earnings are computed without iterating holders. The
//! accumulator grows with elapsed time at a fixed protocol rate and is
//! deliberately NOT normalized by total shares: pool size does not change
//! how fast one share earns.
//!
//! Settlement is staged: [`RewardState::settle`] computes a checkpoint as a
//! pure value, and the pool applies it only after every fallible step of
//! the surrounding operation has succeeded.

use std::collections::HashMap;

use alloy::primitives::U256;

use crate::utils::constants::{REWARD_RATE, WAD};

use super::token::AccountId;

/// Pool-wide accumulator plus per-holder settlement markers.
pub struct RewardState {
    /// Accumulator value at the last checkpoint, monotone non-decreasing.
    reward_per_share_stored: U256,
    /// Timestamp of the last checkpoint, seconds.
    last_update_time: u64,
    /// Accumulator value each holder was last settled at.
    user_reward_per_share_paid: HashMap<AccountId, U256>,
    /// Accrued-but-unclaimed reward per holder.
    rewards: HashMap<AccountId, U256>,
}

/// A computed-but-uncommitted settlement for one holder.
///
/// Applying it advances the pool accumulator to `reward_per_share`, stamps
/// the holder's paid marker, and banks `accrued` as their pending reward.
pub struct Settlement {
    /// Accumulator value as of the settlement instant.
    reward_per_share: U256,
    /// Settlement instant, seconds.
    now: u64,
    /// The holder's total pending reward after this settlement.
    accrued: U256,
}

impl Settlement {
    /// The holder's total pending reward after this settlement.
    #[must_use]
    pub const fn accrued(&self) -> U256 {
        self.accrued
    }
}

impl RewardState {
    /// Fresh state with the accumulator anchored at `now`.
    #[must_use]
    pub fn new(now: u64) -> Self {
        Self {
            reward_per_share_stored: U256::ZERO,
            last_update_time: now,
            user_reward_per_share_paid: HashMap::new(),
            rewards: HashMap::new(),
        }
    }

    /// Accumulator value as of `now`: the stored checkpoint plus
    /// `elapsed * REWARD_RATE / WAD` (floor).
    #[must_use]
    pub fn reward_per_share(&self, now: u64) -> U256 {
        let elapsed = U256::from(now.saturating_sub(self.last_update_time));
        self.reward_per_share_stored + elapsed * REWARD_RATE / WAD
    }

    /// Total reward `holder` could claim as of `now`, given their current
    /// share balance: banked rewards plus the unsettled accumulator delta
    /// scaled by their shares.
    #[must_use]
    pub fn earned(&self, holder: AccountId, share_balance: U256, now: u64) -> U256 {
        let delta = self
            .reward_per_share(now)
            .saturating_sub(self.paid(holder));
        self.pending(holder) + share_balance * delta / WAD
    }

    /// Computes the checkpoint that would settle `holder` at `now`.
    ///
    /// Pure: call before mutating the holder's share balance, apply after
    /// the operation's fallible work is done.
    #[must_use]
    pub fn settle(&self, holder: AccountId, share_balance: U256, now: u64) -> Settlement {
        Settlement {
            reward_per_share: self.reward_per_share(now),
            now,
            accrued: self.earned(holder, share_balance, now),
        }
    }

    /// Commits a settlement for `holder`.
    pub fn apply(&mut self, holder: AccountId, settlement: &Settlement) {
        self.reward_per_share_stored = settlement.reward_per_share;
        self.last_update_time = settlement.now;
        self.user_reward_per_share_paid
            .insert(holder, settlement.reward_per_share);
        self.rewards.insert(holder, settlement.accrued);
    }

    /// Commits a settlement and drains the holder's pending reward,
    /// returning the claimed amount.
    pub fn claim(&mut self, holder: AccountId, settlement: &Settlement) -> U256 {
        self.apply(holder, settlement);
        self.rewards.insert(holder, U256::ZERO);
        settlement.accrued
    }

    /// The accumulator marker `holder` was last settled at.
    fn paid(&self, holder: AccountId) -> U256 {
        self.user_reward_per_share_paid
            .get(&holder)
            .copied()
            .unwrap_or_default()
    }

    /// Banked rewards for `holder`.
    fn pending(&self, holder: AccountId) -> U256 {
        self.rewards.get(&holder).copied().unwrap_or_default()
    }
}
