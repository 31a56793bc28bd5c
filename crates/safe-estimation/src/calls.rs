//! Provider-backed implementation of the estimation and gas price
//! collaborators, simulating the three submission paths against the chain.

use std::marker::PhantomData;

use alloy_network::TransactionBuilder;
use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_provider::Provider;
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::SolCall;
use alloy_transport::Transport;
use async_trait::async_trait;

use crate::contracts::Safe;
use crate::error::EstimationError;
use crate::estimator::{
    ApprovalEstimate, CreationEstimate, ExecutionEstimate, TransactionEstimator,
};
use crate::pricing::GasPriceOracle;

/// Length of one packed owner signature in the safe's signature blob.
const SIGNATURE_LENGTH: usize = 65;

/// Builds the packed signature blob `execTransaction` expects, using the
/// pre-validated encoding: `r` is the owner address left-padded to 32 bytes,
/// `s` is zero, `v` is 1. The safe accepts such a signature when the owner
/// has an on-chain approval or is `msg.sender`. Owners are packed in
/// ascending address order, as the safe's signature check requires.
pub fn pre_validated_signatures(confirmations: &[Address], pre_approving: Option<Address>) -> Bytes {
    let mut owners = confirmations.to_vec();
    if let Some(owner) = pre_approving {
        if !owners.contains(&owner) {
            owners.push(owner);
        }
    }
    owners.sort();

    let mut packed = Vec::with_capacity(owners.len() * SIGNATURE_LENGTH);
    for owner in owners {
        packed.extend_from_slice(&[0u8; 12]);
        packed.extend_from_slice(owner.as_slice());
        packed.extend_from_slice(&[0u8; 32]);
        packed.push(1);
    }

    packed.into()
}

/// Estimates safe transactions through an Ethereum JSON-RPC provider.
pub struct RpcGasEstimator<T, P> {
    provider: P,
    _transport: PhantomData<T>,
}

impl<T, P> RpcGasEstimator<T, P>
where
    T: Transport + Clone,
    P: Provider<T>,
{
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            _transport: PhantomData,
        }
    }

    async fn estimate(&self, req: &TransactionRequest) -> Result<u64, EstimationError> {
        self.provider
            .estimate_gas(req)
            .await
            .map_err(|e| EstimationError::Estimation(e.to_string()))
    }

    async fn call_and_decode<C: SolCall>(
        &self,
        call: C,
        to: Address,
    ) -> Result<C::Return, EstimationError> {
        let mut req = TransactionRequest::default().to(to);
        req.set_input(call.abi_encode());

        let data = self
            .provider
            .call(&req)
            .await
            .map_err(|e| EstimationError::Estimation(e.to_string()))?;

        C::abi_decode_returns(data.as_ref(), true)
            .map_err(|e| EstimationError::Estimation(e.to_string()))
    }

    async fn safe_nonce(&self, safe: Address) -> Result<U256, EstimationError> {
        let Safe::nonceReturn { _0: nonce } =
            self.call_and_decode(Safe::nonceCall::new(()), safe).await?;

        Ok(nonce)
    }

    /// Computes the safe transaction hash an approval refers to, using the
    /// safe's current nonce and defaulted execution parameters.
    async fn safe_tx_hash(&self, params: &ApprovalEstimate) -> Result<B256, EstimationError> {
        let nonce = self.safe_nonce(params.safe_address).await?;

        let call = Safe::getTransactionHashCall::new((
            params.recipient,
            params.value,
            params.data.clone(),
            u8::from(params.operation),
            U256::ZERO,
            U256::ZERO,
            U256::ZERO,
            Address::ZERO,
            Address::ZERO,
            nonce,
        ));

        let Safe::getTransactionHashReturn { _0: tx_hash } =
            self.call_and_decode(call, params.safe_address).await?;

        Ok(tx_hash)
    }
}

#[async_trait]
impl<T, P> TransactionEstimator for RpcGasEstimator<T, P>
where
    T: Transport + Clone,
    P: Provider<T>,
{
    async fn estimate_creation(&self, params: CreationEstimate) -> Result<u64, EstimationError> {
        // Estimate the inner call as if the safe itself executed it; the
        // signature and bookkeeping overhead is covered by the fixed cost
        // table.
        let mut req = TransactionRequest::default().to(params.recipient);
        req.set_from(params.safe_address);
        req.set_value(params.value);
        req.set_input(params.data.to_vec());

        let estimate = self.estimate(&req).await?;
        Ok(estimate.max(params.safe_tx_gas.unwrap_or(0)))
    }

    async fn estimate_execution(&self, params: ExecutionEstimate) -> Result<u64, EstimationError> {
        let pre_approving = params.approval_and_execution.then_some(params.sender);
        let signatures = pre_validated_signatures(&params.confirmations, pre_approving);

        let call = Safe::execTransactionCall::new((
            params.recipient,
            params.value,
            params.data.clone(),
            u8::from(params.operation),
            U256::from(params.options.safe_tx_gas),
            U256::ZERO,
            params.options.gas_price,
            params.options.gas_token,
            params.options.refund_receiver,
            signatures,
        ));

        let mut req = TransactionRequest::default().to(params.safe_address);
        req.set_from(params.sender);
        req.set_input(call.abi_encode());

        self.estimate(&req).await
    }

    async fn estimate_approval(&self, params: ApprovalEstimate) -> Result<u64, EstimationError> {
        // An off-chain signature skips the confirmation transaction
        // entirely.
        if params.off_chain_signature {
            return Ok(0);
        }

        let tx_hash = self.safe_tx_hash(&params).await?;
        let call = Safe::approveHashCall::new((tx_hash,));

        let mut req = TransactionRequest::default().to(params.safe_address);
        req.set_from(params.sender);
        req.set_input(call.abi_encode());

        self.estimate(&req).await
    }
}

#[async_trait]
impl<T, P> GasPriceOracle for RpcGasEstimator<T, P>
where
    T: Transport + Clone,
    P: Provider<T>,
{
    async fn current_gas_price(&self) -> Result<U256, EstimationError> {
        let price = self
            .provider
            .get_gas_price()
            .await
            .map_err(|e| EstimationError::Pricing(e.to_string()))?;

        Ok(U256::from(price))
    }
}
