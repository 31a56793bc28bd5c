use std::time::Duration;

/// Failure taxonomy for one estimation cycle.
#[derive(Debug, thiserror::Error)]
pub enum EstimationError {
    #[error("no sender provided for approval or execution estimation")]
    /// Caller contract violation: every non-creation path needs a sender.
    MissingSender,
    #[error("gas estimation failed: {0}")]
    /// The chain simulation rejected the transaction or the RPC call failed.
    Estimation(String),
    #[error("gas price lookup failed: {0}")]
    /// The network gas price could not be resolved.
    Pricing(String),
    #[error("external call timed out after {0:?}")]
    /// An external call exceeded the configured bound.
    Timeout(Duration),
}

impl EstimationError {
    /// Recoverable failures are absorbed by the orchestrator's fixed-cost
    /// fallback; a missing sender is a programming error and is not.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::MissingSender)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_sender_is_not_recoverable() {
        assert!(!EstimationError::MissingSender.is_recoverable());
        assert!(EstimationError::Estimation("revert".to_string()).is_recoverable());
        assert!(EstimationError::Pricing("rpc".to_string()).is_recoverable());
        assert!(EstimationError::Timeout(Duration::from_secs(30)).is_recoverable());
    }
}
