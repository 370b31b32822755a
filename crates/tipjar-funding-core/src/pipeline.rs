use alloy::primitives::{utils::format_ether, Address, B256, U256};
use thiserror::Error;

use crate::amount::{parse_amount, AmountError};
use crate::domain::{shorten_hex, Severity};
use crate::endpoint::ChainEndpoint;
use crate::ports::{NodePort, NotifierPort, PortError, ProviderPort, UiStatePort};
use crate::session::WalletSession;

pub const MSG_CONNECT_FIRST: &str = "Connect your wallet first.";

const MSG_PROVIDER_MISSING: &str =
    "MetaMask not detected. Please install the official MetaMask browser extension to continue.";
const MSG_REJECTED: &str = "Wallet connection request was declined.";
const MSG_INVALID_AMOUNT: &str = "Set a valid positive amount in the input to buy a coffee.";
const MSG_SESSION_NOT_READY: &str = "Wallet client not ready. Click Connect again.";
const MSG_FUNDING_FAILED: &str =
    "Funding failed. Check your wallet network (Anvil 127.0.0.1:8545) and try again.";
const MSG_BALANCE_FAILED: &str =
    "Failed to fetch balance. Is Anvil running at http://127.0.0.1:8545?";

#[derive(Debug, Error)]
pub enum FundingError {
    #[error("wallet provider unavailable")]
    ProviderUnavailable,
    #[error("wallet connection request declined")]
    UserRejected,
    #[error("no connected account")]
    NotConnected,
    #[error("session write capability missing")]
    SessionNotReady,
    #[error("invalid amount: {0}")]
    InvalidAmount(AmountError),
    #[error("chain endpoint unreachable: {0}")]
    EndpointUnreachable(#[source] PortError),
    #[error("simulation failed: {0}")]
    SimulationFailed(#[source] PortError),
    #[error("submission failed: {0}")]
    SubmissionFailed(#[source] PortError),
}

impl FundingError {
    /// The single user-visible line for a failed funding attempt. Technical
    /// detail stays on the diagnostic channel.
    pub fn user_message(&self) -> &'static str {
        match self {
            FundingError::ProviderUnavailable => MSG_PROVIDER_MISSING,
            FundingError::UserRejected => MSG_REJECTED,
            FundingError::NotConnected => MSG_CONNECT_FIRST,
            FundingError::SessionNotReady => MSG_SESSION_NOT_READY,
            FundingError::InvalidAmount(_) => MSG_INVALID_AMOUNT,
            FundingError::EndpointUnreachable(_)
            | FundingError::SimulationFailed(_)
            | FundingError::SubmissionFailed(_) => MSG_FUNDING_FAILED,
        }
    }
}

/// The actions a shell can trigger.
#[derive(Debug, Clone)]
pub enum FundingCommand {
    ToggleConnection,
    ShowBalance,
    SubmitFunding { raw_amount: String },
}

#[derive(Debug)]
pub enum CommandOutcome {
    Connected(Address),
    Disconnected,
    BalanceShown(U256),
    FundingSubmitted(B256),
    Failed(FundingError),
}

pub struct FundingOrchestrator<P, N, T, U>
where
    P: ProviderPort,
    N: NodePort,
    T: NotifierPort,
    U: UiStatePort,
{
    pub session: WalletSession<P>,
    pub endpoint: ChainEndpoint<N>,
    pub notifier: T,
    pub ui: U,
    target: Address,
}

impl<P, N, T, U> FundingOrchestrator<P, N, T, U>
where
    P: ProviderPort,
    N: NodePort,
    T: NotifierPort,
    U: UiStatePort,
{
    pub fn new(
        session: WalletSession<P>,
        endpoint: ChainEndpoint<N>,
        notifier: T,
        ui: U,
        target: Address,
    ) -> Self {
        Self {
            session,
            endpoint,
            notifier,
            ui,
            target,
        }
    }

    pub fn target(&self) -> Address {
        self.target
    }

    /// Handle one shell-triggered action. Every failure is absorbed here
    /// into exactly one user-visible warning, never a retry. The outcome
    /// comes back as a value so shells stay interactive.
    pub fn dispatch(&mut self, command: FundingCommand) -> CommandOutcome {
        match command {
            FundingCommand::ToggleConnection => self.toggle_connection(),
            FundingCommand::ShowBalance => self.show_balance(),
            FundingCommand::SubmitFunding { raw_amount } => self.submit_funding(&raw_amount),
        }
    }

    fn toggle_connection(&mut self) -> CommandOutcome {
        if self.session.is_connected() {
            self.session.disconnect();
            self.ui.set_connection(None);
            self.ui.set_balance_enabled(false, Some(MSG_CONNECT_FIRST));
            return CommandOutcome::Disconnected;
        }
        match self.session.connect() {
            Ok(account) => {
                self.ui.set_connection(Some(account));
                self.ui.set_balance_enabled(true, None);
                CommandOutcome::Connected(account)
            }
            Err(err) => {
                self.notifier.notify(err.user_message(), Severity::Warn);
                CommandOutcome::Failed(err)
            }
        }
    }

    fn show_balance(&mut self) -> CommandOutcome {
        let Some(account) = self.session.account() else {
            self.notifier.notify(MSG_CONNECT_FIRST, Severity::Warn);
            return CommandOutcome::Failed(FundingError::NotConnected);
        };
        // The displayed figure is the tip jar's balance; the connected account
        // only labels the report.
        match self.endpoint.balance_of(self.target) {
            Ok(balance) => {
                let short = shorten_hex(&account.to_string(), 4, 4);
                let message = format!("Balance for {short}: {} ETH", format_ether(balance));
                self.notifier.notify(&message, Severity::Info);
                CommandOutcome::BalanceShown(balance)
            }
            Err(err) => {
                self.notifier.notify(MSG_BALANCE_FAILED, Severity::Warn);
                CommandOutcome::Failed(err)
            }
        }
    }

    fn submit_funding(&mut self, raw_amount: &str) -> CommandOutcome {
        let Some(account) = self.session.account() else {
            self.notifier.notify(MSG_CONNECT_FIRST, Severity::Warn);
            return CommandOutcome::Failed(FundingError::NotConnected);
        };
        match self.fund(raw_amount, account) {
            Ok(tx_hash) => {
                self.notifier.notify_tx_submitted(&tx_hash.to_string());
                CommandOutcome::FundingSubmitted(tx_hash)
            }
            Err(err) => {
                self.notifier.notify(err.user_message(), Severity::Warn);
                CommandOutcome::Failed(err)
            }
        }
    }

    /// The staged funding attempt: parse, resolve the live chain, dry-run,
    /// then submit through the session's write capability. Fail-fast at each
    /// stage; the first failure ends the attempt.
    pub fn fund(&self, raw_amount: &str, account: Address) -> Result<B256, FundingError> {
        if self.session.account() != Some(account) {
            return Err(FundingError::NotConnected);
        }
        let amount = parse_amount(raw_amount).map_err(FundingError::InvalidAmount)?;
        let chain = self.endpoint.resolve_identity()?;
        let prepared = self
            .endpoint
            .simulate_fund(self.target, account, amount.value, &chain)?;
        // A disconnect may have raced the stages above; the capability check
        // inside submit is the last gate before the irreversible step.
        self.session.submit(prepared)
    }
}
