//! Coordinates one estimation cycle per input change: classification, chain
//! estimation, pricing, and publication of the consolidated result.
//!
//! Cycles are identified by a monotonic counter. When inputs change while a
//! cycle is still awaiting the chain, the newer cycle claims the counter and
//! the stale cycle's result is discarded right before publication
//! (last-started-wins, not last-completed-wins).

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::U256;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::classification;
use crate::consts::{fixed_gas_costs, SAFE_TX_GAS_DATA_COST};
use crate::error::EstimationError;
use crate::estimator::{estimate_transaction_gas, TransactionEstimator};
use crate::pricing::{self, GasPriceOracle};
use crate::transaction_data::{
    EstimationStatus, ExecutionClassification, GasEstimationResult, NativeCoin, SafeState,
    TransactionDraft,
};

/// Bound on each external call so a dead RPC cannot hold a cycle in the
/// loading state forever.
const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Gas price reported by the fallback result.
const FALLBACK_GAS_PRICE: &str = "1";

/// Inputs tracked by the orchestrator; any change warrants a new cycle.
#[derive(Debug, Clone)]
pub struct EstimationInputs {
    pub draft: TransactionDraft,
    pub safe: SafeState,
    /// Manual gas price override in gwei.
    pub manual_gas_price: Option<String>,
}

/// Owns the published-result slot and runs estimation cycles against the
/// chain estimation and gas price collaborators.
pub struct GasEstimationOrchestrator<E, O> {
    estimator: Arc<E>,
    oracle: Arc<O>,
    native_coin: NativeCoin,
    call_timeout: Duration,
    cycle: AtomicU64,
    result_tx: watch::Sender<GasEstimationResult>,
}

impl<E, O> GasEstimationOrchestrator<E, O>
where
    E: TransactionEstimator,
    O: GasPriceOracle,
{
    pub fn new(estimator: Arc<E>, oracle: Arc<O>) -> Self {
        Self::with_native_coin(estimator, oracle, NativeCoin::default())
    }

    pub fn with_native_coin(estimator: Arc<E>, oracle: Arc<O>, native_coin: NativeCoin) -> Self {
        let (result_tx, _) = watch::channel(GasEstimationResult::initial());

        Self {
            estimator,
            oracle,
            native_coin,
            call_timeout: DEFAULT_CALL_TIMEOUT,
            cycle: AtomicU64::new(0),
            result_tx,
        }
    }

    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    /// Read-only subscription to the latest published result.
    pub fn subscribe(&self) -> watch::Receiver<GasEstimationResult> {
        self.result_tx.subscribe()
    }

    /// Snapshot of the latest published result.
    pub fn latest(&self) -> GasEstimationResult {
        self.result_tx.borrow().clone()
    }

    /// Runs one estimation cycle for the given inputs.
    ///
    /// Returns the published result, or `None` when the cycle was a no-op
    /// (empty transaction data) or was superseded by a newer cycle before it
    /// finished. Recoverable failures are absorbed into a `Failure` result;
    /// only caller contract violations surface as `Err`.
    pub async fn estimate(
        &self,
        inputs: EstimationInputs,
    ) -> Result<Option<GasEstimationResult>, EstimationError> {
        if inputs.draft.data.is_empty() {
            return Ok(None);
        }

        let cycle_id = self.cycle.fetch_add(1, Ordering::SeqCst) + 1;

        // Re-enter the loading state for this cycle.
        self.publish(cycle_id, GasEstimationResult::initial());

        let classification = classification::classify(&inputs.safe);
        let fixed_costs = fixed_gas_costs(inputs.safe.threshold);

        let result = match self.run_cycle(&inputs, &classification).await {
            Ok(result) => result,
            Err(err) if err.is_recoverable() => {
                warn!(cycle_id, error = %err, "gas estimation failed, using fixed fallback costs");
                self.fallback_result(fixed_costs, &classification)
            }
            Err(err) => return Err(err),
        };

        if self.publish(cycle_id, result.clone()) {
            Ok(Some(result))
        } else {
            debug!(cycle_id, "discarding result of superseded estimation cycle");
            Ok(None)
        }
    }

    async fn run_cycle(
        &self,
        inputs: &EstimationInputs,
        classification: &ExecutionClassification,
    ) -> Result<GasEstimationResult, EstimationError> {
        let raw_estimate = self
            .bounded(estimate_transaction_gas(
                self.estimator.as_ref(),
                &inputs.safe,
                &inputs.draft,
                classification,
            ))
            .await?;

        let gas_price = self
            .bounded(pricing::resolve_gas_price(
                self.oracle.as_ref(),
                inputs.manual_gas_price.as_deref(),
            ))
            .await?;

        let total_units = pricing::total_gas_units(raw_estimate, inputs.safe.threshold);
        let cost_wei = pricing::gas_cost_in_wei(total_units, gas_price);
        let (gas_cost, gas_cost_formatted) = pricing::display_cost(cost_wei, &self.native_coin);

        // A zero estimate means the execution would revert; only acceptable
        // when the confirmation can be collected off-chain instead.
        let status = if raw_estimate == 0 && !classification.is_off_chain_signature {
            EstimationStatus::Failure
        } else {
            EstimationStatus::Success
        };

        Ok(GasEstimationResult {
            status,
            gas_estimation: raw_estimate,
            gas_cost,
            gas_cost_formatted,
            gas_price: gas_price.to_string(),
            gas_price_formatted: token_units::wei_to_gwei(gas_price),
            gas_limit: total_units.to_string(),
            is_creation: classification.is_creation,
            is_execution: classification.is_execution,
            is_approval_and_execution: classification.is_approval_and_execution,
            is_off_chain_signature: classification.is_off_chain_signature,
        })
    }

    /// Conservative result offered when estimation or pricing failed, so the
    /// caller can still attempt a manual execution. The estimate is not
    /// accurate and the transaction will probably fail.
    fn fallback_result(
        &self,
        fixed_costs: u64,
        classification: &ExecutionClassification,
    ) -> GasEstimationResult {
        let gas_estimation = fixed_costs + SAFE_TX_GAS_DATA_COST;
        let (gas_cost, gas_cost_formatted) =
            pricing::display_cost(U256::from(gas_estimation), &self.native_coin);

        GasEstimationResult {
            status: EstimationStatus::Failure,
            gas_estimation,
            gas_cost,
            gas_cost_formatted,
            gas_price: FALLBACK_GAS_PRICE.to_string(),
            gas_price_formatted: FALLBACK_GAS_PRICE.to_string(),
            gas_limit: "0".to_string(),
            is_creation: classification.is_creation,
            is_execution: classification.is_execution,
            is_approval_and_execution: classification.is_approval_and_execution,
            is_off_chain_signature: classification.is_off_chain_signature,
        }
    }

    async fn bounded<F, T>(&self, call: F) -> Result<T, EstimationError>
    where
        F: Future<Output = Result<T, EstimationError>>,
    {
        tokio::time::timeout(self.call_timeout, call)
            .await
            .map_err(|_| EstimationError::Timeout(self.call_timeout))?
    }

    /// Writes to the published-result slot unless a newer cycle has been
    /// started. The check and the write happen under the slot's own lock,
    /// so a stale cycle can never overwrite a newer result.
    fn publish(&self, cycle_id: u64, result: GasEstimationResult) -> bool {
        let mut published = false;
        self.result_tx.send_if_modified(|slot| {
            if self.cycle.load(Ordering::SeqCst) != cycle_id {
                return false;
            }

            *slot = result;
            published = true;
            true
        });

        published
    }
}
