use crate::error::ErrorCode;
use crate::math::reward_per_token_delta;
use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// StakeInfo Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive the global staking info account.
pub const STAKE_INFO_SEED: &str = "stake_info";

/// Global stake total and the WNCG emission index.
///
/// Every instruction that touches stake or rewards first calls
/// [`StakeInfo::update_reward_per_token`] so the index reflects the emission
/// up to the current second before any balance moves.
#[account]
#[derive(Default, Debug)]
pub struct StakeInfo {
    /// PDA bump for this account.
    pub bump: u8,

    /// Sum of every user's `staked_balance`.
    pub total_staked: u64,

    /// WNCG reward per staked unit, scaled by `SCALE`. Never decreases.
    pub reward_per_token_stored: u128,

    /// Last UNIX timestamp (seconds) the index was brought forward to.
    pub last_update_timestamp: u64,

    /// Total WNCG paid out to stakers.
    pub total_wncg_claimed: u64,

    /// Total BAL harvested from the yield position, before fees.
    pub total_bal_harvested: u64,

    pub total_operation_fees: u64,

    pub total_earmark_incentives: u64,
}

impl StakeInfo {
    /// Fixed serialized size of the account (for allocation at initialization).
    ///
    /// Breakdown:
    /// - 8: account discriminator
    /// - 1: bump
    /// - 8 * 6: six `u64` fields
    /// - 16: one `u128` field
    pub const LEN: usize = 8 + 1 + 8 * 6 + 16;

    /// Index value at `now` without writing it back.
    pub fn reward_per_token(&self, now: u64, emission_per_second: u64) -> Result<u128> {
        let elapsed = now.saturating_sub(self.last_update_timestamp);
        let delta = reward_per_token_delta(elapsed, emission_per_second, self.total_staked)?;
        self.reward_per_token_stored
            .checked_add(delta)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))
    }

    /// Brings the index forward to `now` and returns it.
    pub fn update_reward_per_token(&mut self, now: u64, emission_per_second: u64) -> Result<u128> {
        let stored = self.reward_per_token(now, emission_per_second)?;
        self.reward_per_token_stored = stored;
        self.last_update_timestamp = self.last_update_timestamp.max(now);
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::SCALE;

    #[test]
    fn account_size_covers_serialized_form() {
        let info = StakeInfo::default();
        let mut data = Vec::new();
        info.try_serialize(&mut data).unwrap();
        assert_eq!(data.len(), StakeInfo::LEN);
    }

    #[test]
    fn index_is_frozen_while_nothing_is_staked() {
        let mut info = StakeInfo {
            last_update_timestamp: 100,
            ..Default::default()
        };
        assert_eq!(info.update_reward_per_token(1_000, 5).unwrap(), 0);
        assert_eq!(info.last_update_timestamp, 1_000);
    }

    #[test]
    fn index_grows_with_elapsed_time() {
        let mut info = StakeInfo {
            total_staked: 4,
            last_update_timestamp: 100,
            ..Default::default()
        };
        let peek = info.reward_per_token(110, 1_000).unwrap();
        assert_eq!(info.reward_per_token_stored, 0);
        assert_eq!(info.update_reward_per_token(110, 1_000).unwrap(), peek);
        assert_eq!(peek, 2_500 * SCALE);
    }

    #[test]
    fn clock_going_backwards_does_not_rewind() {
        let mut info = StakeInfo {
            total_staked: 1,
            last_update_timestamp: 500,
            reward_per_token_stored: 7,
            ..Default::default()
        };
        assert_eq!(info.update_reward_per_token(400, 10).unwrap(), 7);
        assert_eq!(info.last_update_timestamp, 500);
    }
}
