use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

/// How the safe performs the inner call of a transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationType {
    #[default]
    Call = 0,
    DelegateCall = 1,
}

impl From<OperationType> for u8 {
    fn from(operation: OperationType) -> Self {
        operation as u8
    }
}

/// Tag distinguishing ordinary multisig transactions from spending-limit
/// transactions, which bypass the confirmation flow entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionType {
    #[default]
    Ordinary,
    SpendingLimit,
}

/// Immutable draft of the transaction being estimated, built by the caller
/// per user action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    pub recipient: Address,
    pub data: Bytes,
    pub value: U256,
    #[serde(default)]
    pub operation: OperationType,
    /// Manual `safeTxGas` override; `None` lets the estimation decide.
    #[serde(default)]
    pub safe_tx_gas: Option<u64>,
    /// Connected account submitting the confirmation or execution. Not
    /// required for the creation path.
    #[serde(default)]
    pub sender: Option<Address>,
}

impl TransactionDraft {
    pub fn new(recipient: Address, data: Bytes, value: U256) -> Self {
        Self {
            recipient,
            data,
            value,
            operation: OperationType::Call,
            safe_tx_gas: None,
            sender: None,
        }
    }
}

/// Read-only snapshot of the safe's confirmation state for the draft
/// transaction. The source of truth lives in the surrounding wallet store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeState {
    pub address: Address,
    /// Minimum number of owner confirmations required to execute.
    pub threshold: u32,
    /// Owners that already confirmed the draft transaction.
    pub confirmations: Vec<Address>,
    #[serde(default)]
    pub tx_type: TransactionType,
    /// Owner whose approval is bundled into the submission itself.
    #[serde(default)]
    pub pre_approving_owner: Option<Address>,
    /// Safe contract version string, e.g. "1.3.0" or "1.3.0+L2".
    pub version: String,
    /// Whether the connected signer is itself a smart-contract wallet.
    #[serde(default)]
    pub smart_contract_wallet: bool,
}

impl SafeState {
    pub fn confirmation_count(&self) -> usize {
        self.confirmations.len()
    }
}

/// Derived execution classification of a draft transaction. Never stored;
/// recomputed on every input change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionClassification {
    /// First submission of an ordinary multisig transaction.
    pub is_creation: bool,
    /// Submitting will execute the transaction on-chain.
    pub is_execution: bool,
    /// Submitting both approves and immediately executes in one transaction.
    pub is_approval_and_execution: bool,
    /// The confirmation can be collected as an off-chain signature instead
    /// of a broadcast transaction.
    pub is_off_chain_signature: bool,
}

/// Defaults applied to the optional execution parameters of
/// `execTransaction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionOptions {
    pub gas_price: U256,
    pub gas_token: Address,
    pub refund_receiver: Address,
    pub safe_tx_gas: u64,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            gas_price: U256::ZERO,
            gas_token: Address::ZERO,
            refund_receiver: Address::ZERO,
            safe_tx_gas: 0,
        }
    }
}

/// Native coin of the network, used to render gas costs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NativeCoin {
    pub symbol: String,
    pub decimals: u8,
}

impl Default for NativeCoin {
    fn default() -> Self {
        Self {
            symbol: "ETH".to_string(),
            decimals: 18,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstimationStatus {
    Loading,
    Success,
    Failure,
}

/// Consolidated outcome of one estimation cycle, published to subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GasEstimationResult {
    pub status: EstimationStatus,
    /// Raw gas units needed to execute or approve the transaction.
    pub gas_estimation: u64,
    /// Total cost in the native coin, as an exact decimal string.
    pub gas_cost: String,
    /// Total cost formatted for display, e.g. "< 0.001".
    pub gas_cost_formatted: String,
    /// Gas price in wei.
    pub gas_price: String,
    /// Gas price in gwei.
    pub gas_price_formatted: String,
    /// Gas limit to submit with, including fixed overhead and safety margin.
    pub gas_limit: String,
    pub is_creation: bool,
    pub is_execution: bool,
    pub is_approval_and_execution: bool,
    pub is_off_chain_signature: bool,
}

impl GasEstimationResult {
    /// State a fresh estimation cycle starts from.
    pub fn initial() -> Self {
        Self {
            status: EstimationStatus::Loading,
            gas_estimation: 0,
            gas_cost: "0".to_string(),
            gas_cost_formatted: token_units::DISPLAY_FLOOR.to_string(),
            gas_price: "0".to_string(),
            gas_price_formatted: "0".to_string(),
            gas_limit: "0".to_string(),
            is_creation: false,
            is_execution: false,
            is_approval_and_execution: false,
            is_off_chain_signature: false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn serializes_result_with_camel_case_keys() {
        let json = serde_json::to_value(GasEstimationResult::initial()).unwrap();
        assert_eq!(json["status"], "LOADING");
        assert_eq!(json["gasEstimation"], 0);
        assert_eq!(json["gasCostFormatted"], "< 0.001");
        assert_eq!(json["isOffChainSignature"], false);
    }

    #[test]
    fn execution_options_default_to_zero_values() {
        let options = ExecutionOptions::default();
        assert_eq!(options.gas_token, Address::ZERO);
        assert_eq!(options.refund_receiver, Address::ZERO);
        assert_eq!(options.gas_price, U256::ZERO);
        assert_eq!(options.safe_tx_gas, 0);
    }

    #[test]
    fn operation_type_converts_to_contract_encoding() {
        assert_eq!(u8::from(OperationType::Call), 0);
        assert_eq!(u8::from(OperationType::DelegateCall), 1);
    }
}
