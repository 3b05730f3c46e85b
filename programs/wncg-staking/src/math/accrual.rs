//! Reward-per-token accumulator arithmetic.
//!
//! Both reward streams use the same scheme: a global index grows by
//! `emitted * SCALE / total_staked` and every account keeps a checkpoint of
//! the index it was last settled at. All divisions round down, so the sum of
//! what accounts can claim never exceeds what was emitted.

use crate::error::ErrorCode;
use anchor_lang::prelude::*;

// The anchor prelude's one-parameter `Result` must not be in scope here.
mod wide {
    uint::construct_uint! {
        /// 256-bit unsigned integer for intermediate products.
        pub struct U256(4);
    }
}
pub use wide::U256;

/// Fixed-point scale of the reward-per-token indices (1e18).
pub const SCALE: u128 = 1_000_000_000_000_000_000;

/// Computes `a * b / c`, rounding down, with a 256-bit intermediate.
///
/// Fails with `MathOverflow` when `c == 0` or the quotient does not fit in
/// a `u128`.
pub fn mul_div_floor(a: u128, b: u128, c: u128) -> Result<u128> {
    require!(c != 0, ErrorCode::MathOverflow);
    let product = U256::from(a)
        .checked_mul(U256::from(b))
        .ok_or(ErrorCode::MathOverflow)?;
    let quotient = product / U256::from(c);
    require!(quotient <= U256::from(u128::MAX), ErrorCode::MathOverflow);
    Ok(quotient.low_u128())
}

/// Index growth for `elapsed` seconds at `rate` units per second spread over
/// `total_staked` units of stake.
///
/// Returns zero when nothing is staked: growth freezes instead of dividing
/// by zero.
pub fn reward_per_token_delta(elapsed: u64, rate: u64, total_staked: u64) -> Result<u128> {
    if total_staked == 0 || elapsed == 0 || rate == 0 {
        return Ok(0);
    }
    // u64 * u64 always fits in u128
    let emitted = u128::from(elapsed) * u128::from(rate);
    mul_div_floor(emitted, SCALE, u128::from(total_staked))
}

/// Rewards earned by `balance` between the `paid` checkpoint and the
/// `current` index.
pub fn earned_since(balance: u64, current: u128, paid: u128) -> Result<u64> {
    let index_delta = current.checked_sub(paid).ok_or(ErrorCode::MathOverflow)?;
    if balance == 0 || index_delta == 0 {
        return Ok(0);
    }
    let earned = mul_div_floor(u128::from(balance), index_delta, SCALE)?;
    u64::try_from(earned).map_err(|_| error!(ErrorCode::MathOverflow))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn wide_product_survives_u128_overflow() {
        // (2^128 - 1) * 2^64 needs more than 128 bits before the division
        let a = u128::MAX;
        let b = 1u128 << 64;
        assert_eq!(mul_div_floor(a, b, b).unwrap(), a);
        let parsed = U256::from_dec_str("340282366920938463463374607431768211455").unwrap();
        assert_eq!(parsed, U256::from(u128::MAX));
    }

    #[test]
    fn empty_pool_freezes_growth() {
        assert_eq!(reward_per_token_delta(3_600, 1_000, 0).unwrap(), 0);
    }

    #[test]
    fn single_staker_collects_full_emission() {
        let delta = reward_per_token_delta(10, 1_000, 2).unwrap();
        assert_eq!(delta, 5_000 * SCALE);
        assert_eq!(earned_since(2, delta, 0).unwrap(), 10_000);
    }

    #[test]
    fn checkpoint_ahead_of_index_is_rejected() {
        assert!(earned_since(1, 5, 6).is_err());
    }

    #[test]
    fn mul_div_handles_products_beyond_u128() {
        let a = u128::MAX / 2;
        assert_eq!(mul_div_floor(a, 4, 8).unwrap(), a / 2);
        assert!(mul_div_floor(u128::MAX, 2, 1).is_err());
        assert!(mul_div_floor(1, 1, 0).is_err());
    }

    proptest! {
        #[test]
        fn accrual_is_within_one_unit_of_exact(
            total in 1u64..1_000_000_000_000,
            share_bps in 1u64..=10_000,
            rate in 0u64..1_000_000_000,
            elapsed in 0u64..10_000_000,
        ) {
            let balance = (u128::from(total) * u128::from(share_bps) / 10_000).max(1) as u64;
            let delta = reward_per_token_delta(elapsed, rate, total).unwrap();
            let earned = earned_since(balance, delta, 0).unwrap();

            let exact = U256::from(balance) * U256::from(rate) * U256::from(elapsed)
                / U256::from(total);
            let exact = exact.low_u128();
            prop_assert!(u128::from(earned) <= exact);
            prop_assert!(exact - u128::from(earned) <= 1);
        }

        #[test]
        fn split_stakes_never_over_distribute(
            a in 1u64..1_000_000_000,
            b in 1u64..1_000_000_000,
            rate in 1u64..1_000_000_000,
            elapsed in 1u64..1_000_000,
        ) {
            let total = a + b;
            let delta = reward_per_token_delta(elapsed, rate, total).unwrap();
            let paid = u128::from(earned_since(a, delta, 0).unwrap())
                + u128::from(earned_since(b, delta, 0).unwrap());
            prop_assert!(paid <= u128::from(rate) * u128::from(elapsed));
        }
    }
}
