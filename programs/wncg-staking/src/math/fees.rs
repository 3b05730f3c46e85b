//! Harvest fee calculations

/// Fee rates are expressed in basis points of this denominator.
pub const FEE_RATE_DENOMINATOR_VALUE: u64 = 10_000;

/// Outcome of splitting one harvest between the protocol, the keeper and
/// the reward pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeSplit {
    /// Amount routed to the BAL operation vault
    pub operation_fee: u64,
    /// Amount paid to whoever triggered the harvest
    pub earmark_incentive: u64,
    /// Amount queued into the reward pool for stakers
    pub remainder: u64,
}

pub struct Fees {}

impl Fees {
    fn rate_of(amount: u64, rate: u64) -> Option<u64> {
        let fee = u128::from(amount)
            .checked_mul(u128::from(rate))?
            .checked_div(u128::from(FEE_RATE_DENOMINATOR_VALUE))?;
        u64::try_from(fee).ok()
    }

    /// Protocol share of a harvest, rounded down
    pub fn operation_fee(amount: u64, operation_fee_rate: u64) -> Option<u64> {
        Self::rate_of(amount, operation_fee_rate)
    }

    /// Keeper share of a harvest, rounded down
    pub fn earmark_incentive(amount: u64, earmark_incentive_rate: u64) -> Option<u64> {
        Self::rate_of(amount, earmark_incentive_rate)
    }

    /// Splits `harvested` so that the three parts always add back up to it.
    ///
    /// Returns `None` if the rates together exceed the denominator.
    pub fn split(
        harvested: u64,
        operation_fee_rate: u64,
        earmark_incentive_rate: u64,
    ) -> Option<FeeSplit> {
        let operation_fee = Self::operation_fee(harvested, operation_fee_rate)?;
        let earmark_incentive = Self::earmark_incentive(harvested, earmark_incentive_rate)?;
        let remainder = harvested
            .checked_sub(operation_fee)?
            .checked_sub(earmark_incentive)?;
        Some(FeeSplit {
            operation_fee,
            earmark_incentive,
            remainder,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_rates_split_as_expected() {
        let split = Fees::split(1_000_000, 1_900, 100).unwrap();
        assert_eq!(split.operation_fee, 190_000);
        assert_eq!(split.earmark_incentive, 10_000);
        assert_eq!(split.remainder, 800_000);
    }

    #[test]
    fn dust_rounds_toward_stakers() {
        let split = Fees::split(99, 1_900, 100).unwrap();
        assert_eq!(split.operation_fee, 18);
        assert_eq!(split.earmark_incentive, 0);
        assert_eq!(split.remainder, 81);
    }

    #[test]
    fn rates_above_denominator_are_rejected() {
        assert!(Fees::split(100, 9_000, 2_000).is_none());
    }

    proptest! {
        #[test]
        fn split_conserves_harvest(
            harvested in any::<u64>(),
            operation_fee_rate in 0u64..=5_000,
            earmark_incentive_rate in 0u64..=5_000,
        ) {
            let split = Fees::split(harvested, operation_fee_rate, earmark_incentive_rate).unwrap();
            prop_assert_eq!(
                u128::from(split.operation_fee)
                    + u128::from(split.earmark_incentive)
                    + u128::from(split.remainder),
                u128::from(harvested)
            );
        }
    }
}
