use alloy::primitives::{keccak256, Address, Bytes, U256};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
}

/// Descriptor for the chain the node currently serves.
///
/// Rebuilt from the live endpoint for every funding attempt; the id reported
/// by the node is the authority for simulation, so an identity from an earlier
/// attempt is never reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainIdentity {
    pub chain_id: u64,
    pub name: String,
    pub currency_name: String,
    pub currency_symbol: String,
    pub currency_decimals: u8,
    pub rpc_url: String,
}

impl ChainIdentity {
    pub fn custom(chain_id: u64, rpc_url: &str) -> Self {
        Self {
            chain_id,
            name: "Custom Chain".to_owned(),
            currency_name: "Ether".to_owned(),
            currency_symbol: "ETH".to_owned(),
            currency_decimals: 18,
            rpc_url: rpc_url.to_owned(),
        }
    }
}

/// A plain call as the node sees it, shared by dry-run and gas estimation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRequest {
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
}

/// A dry-run-validated call ready for submission.
///
/// Moved by value into [`crate::session::WalletSession::submit`], so one
/// prepared call produces at most one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedCall {
    pub chain_id: u64,
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
    pub gas: u64,
}

/// Calldata for the target contract's payable `fund()` entry point.
pub fn fund_calldata() -> Bytes {
    Bytes::copy_from_slice(&keccak256(b"fund()")[..4])
}

/// Shorten a hex string for display, keeping `start` leading and `end`
/// trailing characters. Strings that are already short enough pass through
/// unchanged, which also makes the routine idempotent.
pub fn shorten_hex(value: &str, start: usize, end: usize) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= start + end {
        return value.to_owned();
    }
    let head: String = chars[..start].iter().collect();
    let tail: String = chars[chars.len() - end..].iter().collect();
    format!("{head}…{tail}")
}
