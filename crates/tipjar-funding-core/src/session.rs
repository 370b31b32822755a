use alloy::primitives::{Address, B256};

use crate::domain::PreparedCall;
use crate::pipeline::FundingError;
use crate::ports::{PortError, ProviderPort};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connecting,
    Connected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTransition {
    pub from: SessionState,
    pub to: SessionState,
    pub reason: &'static str,
}

/// Account plus write capability. Created whole on connect and dropped whole
/// on disconnect; neither half is ever valid alone.
#[derive(Debug, Clone)]
pub struct WriteGrant {
    pub account: Address,
}

pub struct WalletSession<P: ProviderPort> {
    provider: P,
    state: SessionState,
    grant: Option<WriteGrant>,
}

impl<P: ProviderPort> WalletSession<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            state: SessionState::Disconnected,
            grant: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == SessionState::Connected
    }

    pub fn account(&self) -> Option<Address> {
        self.grant.as_ref().map(|grant| grant.account)
    }

    /// Request provider authorization and take the first authorized address
    /// as the active account.
    pub fn connect(&mut self) -> Result<Address, FundingError> {
        if self.provider.detect().is_err() {
            return Err(FundingError::ProviderUnavailable);
        }
        self.state = SessionState::Connecting;
        let accounts = match self.provider.request_accounts() {
            Ok(accounts) => accounts,
            Err(err) => {
                self.state = SessionState::Disconnected;
                return Err(match err {
                    PortError::Rejected(_) => FundingError::UserRejected,
                    _ => FundingError::ProviderUnavailable,
                });
            }
        };
        let Some(account) = accounts.first().copied() else {
            self.state = SessionState::Disconnected;
            return Err(FundingError::ProviderUnavailable);
        };
        self.grant = Some(WriteGrant { account });
        self.state = SessionState::Connected;
        Ok(account)
    }

    /// Clear the account and write capability. Never fails: injected
    /// providers expose no programmatic revoke, so this is purely local.
    pub fn disconnect(&mut self) -> StateTransition {
        let from = self.state;
        self.grant = None;
        self.state = SessionState::Disconnected;
        StateTransition {
            from,
            to: self.state,
            reason: "disconnect",
        }
    }

    /// Submit a prepared call through the write capability. The call is taken
    /// by value: one prepared call, one submission. A call prepared for a
    /// different account than the current grant never goes out.
    pub fn submit(&self, call: PreparedCall) -> Result<B256, FundingError> {
        let grant = self.grant.as_ref().ok_or(FundingError::SessionNotReady)?;
        if grant.account != call.from {
            return Err(FundingError::SessionNotReady);
        }
        self.provider
            .send_transaction(&call)
            .map_err(FundingError::SubmissionFailed)
    }
}
