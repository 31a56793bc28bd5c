//! Gas estimation and execution classification for safe (multisig wallet)
//! transactions.
//!
//! The crate decides whether a pending multisig transaction is a first
//! submission, an intermediate approval, or an execution
//! ([classification]), estimates the gas of the matching submission path
//! ([estimator], with a JSON-RPC implementation in [calls]), resolves a gas
//! price and total cost ([pricing]), and coordinates the whole cycle with
//! race-safe result publication ([orchestrator]).

pub mod calls;
pub mod classification;
pub mod consts;
pub mod error;
pub mod estimator;
pub mod orchestrator;
pub mod pricing;
pub mod transaction_data;

mod contracts;

pub use calls::RpcGasEstimator;
pub use classification::classify;
pub use error::EstimationError;
pub use estimator::TransactionEstimator;
pub use orchestrator::{EstimationInputs, GasEstimationOrchestrator};
pub use pricing::GasPriceOracle;
pub use transaction_data::{
    EstimationStatus, ExecutionClassification, GasEstimationResult, NativeCoin, SafeState,
    TransactionDraft, TransactionType,
};
