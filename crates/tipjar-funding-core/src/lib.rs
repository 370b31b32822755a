pub mod amount;
pub mod domain;
pub mod endpoint;
pub mod pipeline;
pub mod ports;
pub mod session;

pub use amount::{parse_amount, AmountError, ParsedAmount};
pub use domain::{fund_calldata, shorten_hex, CallRequest, ChainIdentity, PreparedCall, Severity};
pub use endpoint::ChainEndpoint;
pub use pipeline::{
    CommandOutcome, FundingCommand, FundingError, FundingOrchestrator, MSG_CONNECT_FIRST,
};
pub use ports::{NodePort, NotifierPort, PortError, ProviderPort, UiStatePort};
pub use session::{SessionState, StateTransition, WalletSession, WriteGrant};
