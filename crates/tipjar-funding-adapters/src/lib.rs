pub mod config;
pub mod eip1193;
pub mod notify;
pub mod rpc;

pub use config::{
    FundingAdapterConfig, RuntimeProfile, DEFAULT_CONTRACT_ADDRESS, DEFAULT_RPC_URL,
};
pub use eip1193::Eip1193Adapter;
pub use notify::{NullUi, TracingNotifier};
pub use rpc::JsonRpcEndpoint;
