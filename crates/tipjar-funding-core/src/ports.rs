use alloy::primitives::{Address, Bytes, B256, U256};
use thiserror::Error;

use crate::domain::{CallRequest, PreparedCall, Severity};

#[derive(Debug, Error)]
pub enum PortError {
    #[error("port not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("rejected: {0}")]
    Rejected(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("execution error: {0}")]
    Execution(String),
}

/// Injected wallet provider: account access plus transaction submission.
pub trait ProviderPort {
    /// Presence probe, performed at call time rather than cached.
    fn detect(&self) -> Result<(), PortError>;
    fn request_accounts(&self) -> Result<Vec<Address>, PortError>;
    fn send_transaction(&self, call: &PreparedCall) -> Result<B256, PortError>;
}

/// Read-only chain node access.
pub trait NodePort {
    fn chain_id(&self) -> Result<u64, PortError>;
    fn balance_of(&self, address: Address) -> Result<U256, PortError>;
    fn call(&self, request: &CallRequest) -> Result<Bytes, PortError>;
    fn estimate_gas(&self, request: &CallRequest) -> Result<u64, PortError>;
}

pub trait NotifierPort {
    fn notify(&self, message: &str, severity: Severity);
    /// Success report carrying the full hash so sinks can offer a copy
    /// affordance; display shortening is the sink's concern.
    fn notify_tx_submitted(&self, tx_hash: &str);
}

/// Visual state a shell mirrors from session transitions.
pub trait UiStatePort {
    fn set_connection(&self, account: Option<Address>);
    fn set_balance_enabled(&self, enabled: bool, disabled_reason: Option<&str>);
}
