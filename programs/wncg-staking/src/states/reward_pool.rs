use crate::error::ErrorCode;
use crate::math::reward_per_token_delta;
use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// RewardPool Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive the BAL reward pool (`REWARD_POOL_SEED + secondary_mint`).
pub const REWARD_POOL_SEED: &str = "reward_pool";

/// Rewards stream out over this many seconds once notified: 7 days.
pub const REWARD_DURATION: u64 = 604_800;

/// Per-mille threshold below which queued rewards restart the period early.
pub const NEW_REWARD_RATIO: u64 = 830;

/// Streams harvested BAL to stakers.
///
/// Shares are the stakers' principal, so `total_shares` always equals
/// `StakeInfo::total_staked`. Incoming rewards are queued and released over
/// `duration` seconds; an in-progress period is only restarted when the new
/// rewards are large relative to what the current period has paid so far.
#[account]
#[derive(Default, Debug)]
pub struct RewardPool {
    /// PDA bump for this account.
    pub bump: u8,

    /// Mint of the streamed reward (BAL).
    pub reward_mint: Pubkey,

    pub total_shares: u64,

    /// Reward per share, scaled by `SCALE`. Never decreases.
    pub reward_per_token_stored: u128,

    /// Reward units released per second during the current period.
    pub reward_rate: u64,

    /// End of the current period (UNIX seconds).
    pub period_finish: u64,

    /// Last instant (capped at `period_finish`) the index was brought forward to.
    pub last_update_timestamp: u64,

    /// Rewards waiting for the next period.
    pub queued_rewards: u64,

    /// Amount the current period was started with, leftover included.
    pub current_rewards: u64,

    /// Everything ever notified into the pool.
    pub historical_rewards: u64,

    pub duration: u64,

    pub new_reward_ratio: u64,
}

impl RewardPool {
    /// Fixed serialized size of the account (for allocation at initialization).
    ///
    /// Breakdown:
    /// - 8: account discriminator
    /// - 1: bump
    /// - 32: reward mint
    /// - 8 * 9: nine `u64` fields
    /// - 16: one `u128` field
    pub const LEN: usize = 8 + 1 + 32 + 8 * 9 + 16;

    pub fn initialize(&mut self, bump: u8, reward_mint: Pubkey) {
        self.bump = bump;
        self.reward_mint = reward_mint;
        self.duration = REWARD_DURATION;
        self.new_reward_ratio = NEW_REWARD_RATIO;
    }

    pub fn last_time_reward_applicable(&self, now: u64) -> u64 {
        now.min(self.period_finish)
    }

    /// Index value at `now` without writing it back.
    pub fn reward_per_token(&self, now: u64) -> Result<u128> {
        let elapsed = self
            .last_time_reward_applicable(now)
            .saturating_sub(self.last_update_timestamp);
        let delta = reward_per_token_delta(elapsed, self.reward_rate, self.total_shares)?;
        self.reward_per_token_stored
            .checked_add(delta)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))
    }

    /// Stores an index computed by [`Self::reward_per_token`] at `now`.
    pub fn checkpoint(&mut self, reward_per_token: u128, now: u64) {
        self.reward_per_token_stored = reward_per_token;
        self.last_update_timestamp = self
            .last_update_timestamp
            .max(self.last_time_reward_applicable(now));
    }

    /// Adds `rewards` to the queue and starts a new period when warranted.
    ///
    /// A new period starts immediately if the current one has finished, or
    /// if what the current period has released so far is less than
    /// `new_reward_ratio`/1000 of the pending amount. Otherwise the rewards
    /// wait in the queue for `process_idle_rewards` or the next harvest.
    pub fn queue_new_rewards(&mut self, rewards: u64, now: u64) -> Result<()> {
        let rewards = rewards
            .checked_add(self.queued_rewards)
            .ok_or(ErrorCode::MathOverflow)?;
        if rewards == 0 {
            return Ok(());
        }
        if now >= self.period_finish {
            self.notify_reward_amount(rewards, now)?;
            self.queued_rewards = 0;
            return Ok(());
        }

        let period_start = self.period_finish.saturating_sub(self.duration);
        let elapsed = now.saturating_sub(period_start);
        let current_at_now = u128::from(self.reward_rate) * u128::from(elapsed);
        let queued_ratio = current_at_now * 1_000 / u128::from(rewards);
        if queued_ratio < u128::from(self.new_reward_ratio) {
            self.notify_reward_amount(rewards, now)?;
            self.queued_rewards = 0;
        } else {
            self.queued_rewards = rewards;
        }
        Ok(())
    }

    /// Starts a new period of `duration` seconds paying `reward`, plus what
    /// the running period had not released yet.
    pub fn notify_reward_amount(&mut self, reward: u64, now: u64) -> Result<()> {
        let reward_per_token_stored = self.reward_per_token(now)?;
        let historical_rewards = self
            .historical_rewards
            .checked_add(reward)
            .ok_or(ErrorCode::MathOverflow)?;

        let reward = if now >= self.period_finish {
            reward
        } else {
            let remaining = self.period_finish - now;
            let leftover = remaining
                .checked_mul(self.reward_rate)
                .ok_or(ErrorCode::MathOverflow)?;
            reward.checked_add(leftover).ok_or(ErrorCode::MathOverflow)?
        };
        require_gt!(self.duration, 0, ErrorCode::MathOverflow);
        let period_finish = now
            .checked_add(self.duration)
            .ok_or(ErrorCode::MathOverflow)?;

        self.reward_per_token_stored = reward_per_token_stored;
        self.historical_rewards = historical_rewards;
        self.reward_rate = reward / self.duration;
        self.current_rewards = reward;
        self.last_update_timestamp = now;
        self.period_finish = period_finish;

        #[cfg(feature = "enable-log")]
        msg!(
            "reward pool notified: reward={}, rate={}, period_finish={}",
            reward,
            self.reward_rate,
            self.period_finish
        );
        Ok(())
    }

    /// Starts a period from the queue once the previous one has finished.
    /// Returns the amount released.
    pub fn process_idle_rewards(&mut self, now: u64) -> Result<u64> {
        if now < self.period_finish || self.queued_rewards == 0 {
            return Ok(0);
        }
        let queued = self.queued_rewards;
        self.notify_reward_amount(queued, now)?;
        self.queued_rewards = 0;
        Ok(queued)
    }
}
