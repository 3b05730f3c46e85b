//! Cooldown-then-window withdrawal gating.
//!
//! A cooldown start of `0` means no cooldown. Otherwise, with
//! `c = cooldown_seconds` and `w = unstake_window`:
//!
//! ```text
//!   start            start + c              start + c + w
//!     |-- CoolingDown --|---- Withdrawable ----|-- Expired ...
//! ```

use crate::error::ErrorCode;
use anchor_lang::prelude::*;

/// Where an account stands relative to its cooldown at a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CooldownState {
    /// No cooldown was started, or it was reset by a full withdrawal
    Inactive,
    /// Waiting for `cooldown_seconds` to elapse
    CoolingDown,
    /// Withdrawal allowed
    Withdrawable,
    /// Window missed; behaves like `Inactive` until `cooldown` is called again
    Expired,
}

/// The two configured durations, copied out of the global config.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CooldownWindow {
    pub cooldown_seconds: u64,
    pub unstake_window: u64,
}

impl CooldownWindow {
    pub fn new(cooldown_seconds: u64, unstake_window: u64) -> Self {
        Self {
            cooldown_seconds,
            unstake_window,
        }
    }

    /// First instant at which withdrawal is allowed.
    pub fn cooldown_end(&self, start: u64) -> u64 {
        start.saturating_add(self.cooldown_seconds)
    }

    /// First instant at which withdrawal is no longer allowed.
    pub fn withdraw_end(&self, start: u64) -> u64 {
        self.cooldown_end(start).saturating_add(self.unstake_window)
    }

    pub fn state(&self, start: u64, now: u64) -> CooldownState {
        if start == 0 {
            CooldownState::Inactive
        } else if now < self.cooldown_end(start) {
            CooldownState::CoolingDown
        } else if now < self.withdraw_end(start) {
            CooldownState::Withdrawable
        } else {
            CooldownState::Expired
        }
    }

    /// Fails unless `start` puts the account in its withdraw window at `now`.
    pub fn check_withdrawable(&self, start: u64, now: u64) -> Result<()> {
        match self.state(start, now) {
            CooldownState::Withdrawable => Ok(()),
            CooldownState::CoolingDown => err!(ErrorCode::InsufficientCooldown),
            CooldownState::Expired => err!(ErrorCode::UnstakeWindowFinished),
            CooldownState::Inactive => err!(ErrorCode::InvalidBalanceOnCooldown),
        }
    }

    /// Cooldown start an account should carry after receiving `incoming`
    /// units whose own cooldown started at `from`.
    ///
    /// - an account without a cooldown keeps none;
    /// - an expired cooldown is first reset to `now`;
    /// - a zero or expired `from` counts as `now`;
    /// - if `from` is older than the account's start, the start is kept;
    /// - otherwise the start moves toward `from`, weighted by amounts:
    ///   `start + incoming * (from - start) / (balance + incoming)`.
    pub fn next_cooldown_timestamp(
        &self,
        from: u64,
        incoming: u64,
        to_start: u64,
        to_balance: u64,
        now: u64,
    ) -> u64 {
        if to_start == 0 {
            return 0;
        }
        let to_start = if self.state(to_start, now) == CooldownState::Expired {
            now
        } else {
            to_start
        };
        let from = match self.state(from, now) {
            CooldownState::Inactive | CooldownState::Expired => now,
            _ => from,
        };
        if from <= to_start {
            return to_start;
        }

        let total = u128::from(to_balance) + u128::from(incoming);
        if total == 0 {
            return to_start;
        }
        // incoming * (from - to_start) < 2^128 and the quotient is at most
        // from - to_start, so the result never exceeds `from`
        let shift = u128::from(incoming) * u128::from(from - to_start) / total;
        to_start + shift as u64
    }
}
