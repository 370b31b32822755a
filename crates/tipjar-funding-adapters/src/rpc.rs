use alloy::primitives::{Address, Bytes, U256};
use serde_json::Value;

use tipjar_funding_core::{CallRequest, NodePort, PortError};

use crate::config::FundingAdapterConfig;

/// JSON-RPC client for the read/simulate side of the chain node.
#[derive(Debug, Clone)]
pub struct JsonRpcEndpoint {
    url: String,
    client: reqwest::blocking::Client,
}

impl JsonRpcEndpoint {
    pub fn with_config(config: &FundingAdapterConfig) -> Result<Self, PortError> {
        let timeout = std::time::Duration::from_millis(config.rpc_timeout_ms);
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PortError::Transport(format!("failed to build rpc client: {e}")))?;
        Ok(Self {
            url: config.rpc_url.clone(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn rpc(&self, method: &str, params: Value) -> Result<Value, PortError> {
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .map_err(|e| PortError::Transport(format!("rpc request failed: {e}")))?;
        let status = response.status();
        let body: Value = response
            .json()
            .map_err(|e| PortError::Transport(format!("rpc json decode failed: {e}")))?;
        if !status.is_success() {
            return Err(PortError::Transport(format!("rpc status {status}: {body}")));
        }
        if let Some(err) = body.get("error") {
            let code = err.get("code").and_then(Value::as_i64).unwrap_or_default();
            let message = err
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("node error");
            return Err(PortError::Execution(format!(
                "node rejected {method} ({code}): {message}"
            )));
        }
        body.get("result")
            .cloned()
            .ok_or_else(|| PortError::Transport("rpc response missing result".to_owned()))
    }
}

fn hex_to_u64(value: &Value) -> Result<u64, PortError> {
    if let Some(n) = value.as_u64() {
        return Ok(n);
    }
    let raw = value
        .as_str()
        .ok_or_else(|| PortError::Validation("quantity must be string or number".to_owned()))?;
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw);
    u64::from_str_radix(digits, 16)
        .map_err(|e| PortError::Validation(format!("invalid hex quantity: {e}")))
}

fn hex_to_u256(value: &Value) -> Result<U256, PortError> {
    let raw = value
        .as_str()
        .ok_or_else(|| PortError::Validation("quantity must be a hex string".to_owned()))?;
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw);
    U256::from_str_radix(digits, 16)
        .map_err(|e| PortError::Validation(format!("invalid hex quantity: {e}")))
}

impl NodePort for JsonRpcEndpoint {
    fn chain_id(&self) -> Result<u64, PortError> {
        let result = self.rpc("eth_chainId", serde_json::json!([]))?;
        hex_to_u64(&result)
    }

    fn balance_of(&self, address: Address) -> Result<U256, PortError> {
        let result = self.rpc("eth_getBalance", serde_json::json!([address, "latest"]))?;
        hex_to_u256(&result)
    }

    fn call(&self, request: &CallRequest) -> Result<Bytes, PortError> {
        let params = serde_json::to_value(request)
            .map_err(|e| PortError::Validation(format!("call serialization failed: {e}")))?;
        let result = self.rpc("eth_call", serde_json::json!([params, "latest"]))?;
        let raw = result
            .as_str()
            .ok_or_else(|| PortError::Transport("eth_call must return hex data".to_owned()))?;
        raw.parse()
            .map_err(|e| PortError::Validation(format!("invalid call result: {e}")))
    }

    fn estimate_gas(&self, request: &CallRequest) -> Result<u64, PortError> {
        let params = serde_json::to_value(request)
            .map_err(|e| PortError::Validation(format!("call serialization failed: {e}")))?;
        let result = self.rpc("eth_estimateGas", serde_json::json!([params]))?;
        hex_to_u64(&result)
    }
}
