//! Dispatch of a classified transaction onto the matching chain estimation
//! path.

use alloy_primitives::{Address, Bytes, U256};
use async_trait::async_trait;

use crate::error::EstimationError;
use crate::transaction_data::{
    ExecutionClassification, ExecutionOptions, OperationType, SafeState, TransactionDraft,
};

/// Parameters for estimating the first submission of a brand-new safe
/// transaction.
#[derive(Debug, Clone)]
pub struct CreationEstimate {
    pub safe_address: Address,
    pub recipient: Address,
    pub data: Bytes,
    pub value: U256,
    pub operation: OperationType,
    /// Manual `safeTxGas` floor, when the caller supplied one.
    pub safe_tx_gas: Option<u64>,
}

/// Parameters for estimating the on-chain execution of an aggregated
/// multisig transaction.
#[derive(Debug, Clone)]
pub struct ExecutionEstimate {
    pub safe_address: Address,
    pub recipient: Address,
    pub data: Bytes,
    pub value: U256,
    pub operation: OperationType,
    pub sender: Address,
    /// Owners that already confirmed the transaction.
    pub confirmations: Vec<Address>,
    pub options: ExecutionOptions,
    /// The execution bundles the sender's own final approval.
    pub approval_and_execution: bool,
}

/// Parameters for estimating a confirmation-only submission.
#[derive(Debug, Clone)]
pub struct ApprovalEstimate {
    pub safe_address: Address,
    pub recipient: Address,
    pub data: Bytes,
    pub value: U256,
    pub operation: OperationType,
    pub sender: Address,
    /// The signature can be collected off-chain, skipping the broadcast.
    pub off_chain_signature: bool,
}

/// Chain-backed estimation service for the three submission paths.
///
/// Implementations may fail with [EstimationError::Estimation] on RPC or
/// simulation errors; the orchestrator applies the fallback policy.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait TransactionEstimator: Send + Sync {
    async fn estimate_creation(&self, params: CreationEstimate) -> Result<u64, EstimationError>;

    async fn estimate_execution(&self, params: ExecutionEstimate) -> Result<u64, EstimationError>;

    async fn estimate_approval(&self, params: ApprovalEstimate) -> Result<u64, EstimationError>;
}

/// Picks the estimation path for a classified draft and runs it.
///
/// Creation wins over execution (a threshold-of-one safe is both) and needs
/// no sender; every other path fails with [EstimationError::MissingSender]
/// when the draft carries none.
pub async fn estimate_transaction_gas<E>(
    estimator: &E,
    safe: &SafeState,
    draft: &TransactionDraft,
    classification: &ExecutionClassification,
) -> Result<u64, EstimationError>
where
    E: TransactionEstimator + ?Sized,
{
    if classification.is_creation {
        return estimator
            .estimate_creation(CreationEstimate {
                safe_address: safe.address,
                recipient: draft.recipient,
                data: draft.data.clone(),
                value: draft.value,
                operation: draft.operation,
                safe_tx_gas: draft.safe_tx_gas,
            })
            .await;
    }

    let sender = draft.sender.ok_or(EstimationError::MissingSender)?;

    if classification.is_execution {
        return estimator
            .estimate_execution(ExecutionEstimate {
                safe_address: safe.address,
                recipient: draft.recipient,
                data: draft.data.clone(),
                value: draft.value,
                operation: draft.operation,
                sender,
                confirmations: safe.confirmations.clone(),
                options: ExecutionOptions {
                    safe_tx_gas: draft.safe_tx_gas.unwrap_or(0),
                    ..Default::default()
                },
                approval_and_execution: classification.is_approval_and_execution,
            })
            .await;
    }

    estimator
        .estimate_approval(ApprovalEstimate {
            safe_address: safe.address,
            recipient: draft.recipient,
            data: draft.data.clone(),
            value: draft.value,
            operation: draft.operation,
            sender,
            off_chain_signature: classification.is_off_chain_signature,
        })
        .await
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::transaction_data::TransactionType;
    use alloy_primitives::address;

    const SAFE: Address = address!("0000000000000000000000000000000000005afe");
    const SENDER: Address = address!("0000000000000000000000000000000000000005");
    const RECIPIENT: Address = address!("000000000000000000000000000000000000000b");

    fn safe_state(threshold: u32, confirmations: Vec<Address>) -> SafeState {
        SafeState {
            address: SAFE,
            threshold,
            confirmations,
            tx_type: TransactionType::Ordinary,
            pre_approving_owner: None,
            version: "1.3.0".to_string(),
            smart_contract_wallet: false,
        }
    }

    fn draft(sender: Option<Address>) -> TransactionDraft {
        TransactionDraft {
            sender,
            ..TransactionDraft::new(RECIPIENT, Bytes::from_static(b"\x00"), U256::ZERO)
        }
    }

    #[tokio::test]
    async fn creation_path_wins_even_with_a_sender_present() {
        let mut estimator = MockTransactionEstimator::new();
        estimator
            .expect_estimate_creation()
            .withf(|params| params.safe_address == SAFE && params.safe_tx_gas.is_none())
            .returning(|_| Ok(60_000));

        let classification = ExecutionClassification {
            is_creation: true,
            is_execution: true,
            ..Default::default()
        };

        let gas = estimate_transaction_gas(
            &estimator,
            &safe_state(1, vec![]),
            &draft(Some(SENDER)),
            &classification,
        )
        .await
        .unwrap();
        assert_eq!(gas, 60_000);
    }

    #[tokio::test]
    async fn non_creation_without_sender_is_rejected() {
        let estimator = MockTransactionEstimator::new();

        let classification = ExecutionClassification {
            is_execution: true,
            ..Default::default()
        };

        let err = estimate_transaction_gas(
            &estimator,
            &safe_state(2, vec![SENDER]),
            &draft(None),
            &classification,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, EstimationError::MissingSender));
    }

    #[tokio::test]
    async fn execution_path_defaults_optional_fields() {
        let mut estimator = MockTransactionEstimator::new();
        estimator
            .expect_estimate_execution()
            .withf(|params| {
                params.sender == SENDER
                    && params.options.gas_token == Address::ZERO
                    && params.options.refund_receiver == Address::ZERO
                    && params.options.safe_tx_gas == 0
                    && params.approval_and_execution
            })
            .returning(|_| Ok(120_000));

        let classification = ExecutionClassification {
            is_execution: true,
            is_approval_and_execution: true,
            ..Default::default()
        };

        let gas = estimate_transaction_gas(
            &estimator,
            &safe_state(2, vec![SENDER]),
            &draft(Some(SENDER)),
            &classification,
        )
        .await
        .unwrap();
        assert_eq!(gas, 120_000);
    }

    #[tokio::test]
    async fn manual_safe_tx_gas_reaches_the_execution_path() {
        let mut estimator = MockTransactionEstimator::new();
        estimator
            .expect_estimate_execution()
            .withf(|params| params.options.safe_tx_gas == 42_000)
            .returning(|_| Ok(100_000));

        let classification = ExecutionClassification {
            is_execution: true,
            ..Default::default()
        };

        let mut draft = draft(Some(SENDER));
        draft.safe_tx_gas = Some(42_000);

        estimate_transaction_gas(&estimator, &safe_state(2, vec![SENDER]), &draft, &classification)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn approval_path_carries_the_off_chain_flag() {
        let mut estimator = MockTransactionEstimator::new();
        estimator
            .expect_estimate_approval()
            .withf(|params| params.off_chain_signature && params.sender == SENDER)
            .returning(|_| Ok(0));

        let classification = ExecutionClassification {
            is_off_chain_signature: true,
            ..Default::default()
        };

        let gas = estimate_transaction_gas(
            &estimator,
            &safe_state(3, vec![SENDER]),
            &draft(Some(SENDER)),
            &classification,
        )
        .await
        .unwrap();
        assert_eq!(gas, 0);
    }
}
