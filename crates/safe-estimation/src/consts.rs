//! Fixed gas cost table for safe transactions.

/// Base cost of any Ethereum transaction.
pub const MINIMUM_TRANSACTION_GAS: u64 = 21_000;

/// Approximate gas spent verifying one owner signature, rounded up.
pub const GAS_REQUIRED_PER_SIGNATURE: u64 = 8_000;

/// Gas attributed to the safe transaction call data. Combined with the fixed
/// costs when estimation fails and a conservative fallback is needed.
pub const SAFE_TX_GAS_DATA_COST: u64 = 6_000;

/// Multiplier applied to the total gas units as a margin against
/// underestimation and gas price volatility. Preserved as observed; do not
/// re-derive.
pub const ESTIMATION_SAFETY_FACTOR: u64 = 2;

/// Fixed overhead outside the transaction execution itself: the base
/// transaction cost plus signature verification per required confirmation.
pub fn fixed_gas_costs(threshold: u32) -> u64 {
    MINIMUM_TRANSACTION_GAS + u64::from(threshold.max(1)) * GAS_REQUIRED_PER_SIGNATURE
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fixed_costs_scale_with_threshold() {
        assert_eq!(fixed_gas_costs(1), 29_000);
        assert_eq!(fixed_gas_costs(3), 45_000);
    }

    #[test]
    fn zero_threshold_is_treated_as_one() {
        assert_eq!(fixed_gas_costs(0), fixed_gas_costs(1));
    }
}
