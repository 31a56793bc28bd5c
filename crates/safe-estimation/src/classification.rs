//! Pure classification of a pending safe transaction against the
//! confirmation threshold.
//!
//! All functions here are deterministic and side-effect free; they are
//! re-evaluated on every input change and never cached across draft edits.
//! Absent optional inputs are treated as absent, not as zero.

use alloy_primitives::Address;
use semver::Version;

use crate::transaction_data::{ExecutionClassification, SafeState, TransactionType};

/// Whether submitting this confirmation executes the transaction on-chain.
///
/// True for a threshold-of-one safe, for spending-limit transactions (which
/// always self-execute), or once the existing confirmations reach the
/// threshold. With a pre-approving owner, the bundled approval counts
/// towards the threshold as well.
pub fn is_execution(
    threshold: u32,
    pre_approving_owner: Option<Address>,
    confirmation_count: Option<usize>,
    tx_type: Option<TransactionType>,
) -> bool {
    if threshold == 1
        || tx_type == Some(TransactionType::SpendingLimit)
        || confirmation_count.is_some_and(|count| count >= threshold as usize)
    {
        return true;
    }

    // The pre-approval arm only applies once at least one confirmation
    // exists.
    if pre_approving_owner.is_some() {
        if let Some(count) = confirmation_count.filter(|count| *count > 0) {
            return count + 1 == threshold as usize;
        }
    }

    false
}

/// Whether submitting this confirmation both approves and immediately
/// triggers on-chain execution in one transaction. Requires a pre-approving
/// owner.
pub fn is_approval_and_execution(
    threshold: u32,
    confirmation_count: usize,
    tx_type: Option<TransactionType>,
    pre_approving_owner: Option<Address>,
) -> bool {
    if pre_approving_owner.is_none() {
        return false;
    }

    confirmation_count + 1 == threshold as usize || tx_type == Some(TransactionType::SpendingLimit)
}

/// Whether this is the very first confirmation of an ordinary multisig
/// transaction, submitted as a new on-chain transaction rather than a
/// confirmation call.
pub fn is_creation(confirmation_count: usize, tx_type: Option<TransactionType>) -> bool {
    confirmation_count == 0 && tx_type != Some(TransactionType::SpendingLimit)
}

/// Lowest safe contract version that accepts off-chain signatures.
const OFF_CHAIN_SIGNATURE_MIN_VERSION: (u64, u64, u64) = (1, 1, 1);

/// Whether the confirmation can be collected off-chain instead of being
/// broadcast: never for executions or smart-contract-wallet signers, and
/// only from safe version 1.1.1 onwards. Unparseable versions disable the
/// capability.
pub fn off_chain_signature_possible(
    is_execution: bool,
    smart_contract_wallet: bool,
    safe_version: &str,
) -> bool {
    if is_execution || smart_contract_wallet {
        return false;
    }

    let (major, minor, patch) = OFF_CHAIN_SIGNATURE_MIN_VERSION;
    match Version::parse(safe_version) {
        Ok(version) => version >= Version::new(major, minor, patch),
        Err(_) => false,
    }
}

/// Derives the full classification for a safe state snapshot.
pub fn classify(safe: &SafeState) -> ExecutionClassification {
    let count = safe.confirmation_count();
    let tx_type = Some(safe.tx_type);

    let is_execution = is_execution(
        safe.threshold,
        safe.pre_approving_owner,
        Some(count),
        tx_type,
    );
    let is_creation = is_creation(count, tx_type);
    let is_approval_and_execution =
        is_approval_and_execution(safe.threshold, count, tx_type, safe.pre_approving_owner);
    let is_off_chain_signature =
        off_chain_signature_possible(is_execution, safe.smart_contract_wallet, &safe.version);

    ExecutionClassification {
        is_creation,
        is_execution,
        is_approval_and_execution,
        is_off_chain_signature,
    }
}
