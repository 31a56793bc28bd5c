//! Gas price resolution and cost computation.
//!
//! All on-chain amounts stay in [U256]; decimal strings only appear at the
//! display edge.

use alloy_primitives::U256;
use async_trait::async_trait;

use crate::consts::{fixed_gas_costs, ESTIMATION_SAFETY_FACTOR};
use crate::error::EstimationError;
use crate::transaction_data::NativeCoin;

/// Source of the network's current gas price.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait GasPriceOracle: Send + Sync {
    /// Current gas price in wei.
    async fn current_gas_price(&self) -> Result<U256, EstimationError>;
}

/// Resolves the gas price to use for a cycle: a manual override in gwei
/// takes precedence over the network price.
pub async fn resolve_gas_price<O>(
    oracle: &O,
    manual_gwei: Option<&str>,
) -> Result<U256, EstimationError>
where
    O: GasPriceOracle + ?Sized,
{
    match manual_gwei {
        Some(manual) => token_units::gwei_to_wei(manual)
            .ok_or_else(|| EstimationError::Pricing(format!("invalid manual gas price: {manual}"))),
        None => oracle.current_gas_price().await,
    }
}

/// Total gas units to submit with: the raw estimate plus the threshold's
/// fixed overhead, scaled by the safety factor.
pub fn total_gas_units(raw_estimate: u64, threshold: u32) -> u64 {
    (raw_estimate + fixed_gas_costs(threshold)) * ESTIMATION_SAFETY_FACTOR
}

/// Total cost in wei for the given gas units and price.
pub fn gas_cost_in_wei(total_gas_units: u64, gas_price: U256) -> U256 {
    U256::from(total_gas_units) * gas_price
}

/// Renders a wei cost as the exact native-coin decimal string plus its
/// bounded display form.
pub fn display_cost(cost_wei: U256, coin: &NativeCoin) -> (String, String) {
    let cost = token_units::from_smallest_unit(cost_wei, coin.decimals);
    let formatted = token_units::format_amount(&cost);
    (cost, formatted)
}
