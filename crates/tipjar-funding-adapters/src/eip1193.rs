use std::sync::{Arc, Mutex};

use alloy::primitives::{keccak256, Address, B256};
use serde_json::Value;

use tipjar_funding_core::{PortError, PreparedCall, ProviderPort};

use crate::config::FundingAdapterConfig;

/// EIP-1193 user-rejection code surfaced by injected providers.
const USER_REJECTED_CODE: i64 = 4001;

/// Injected-wallet access. `Proxy` forwards EIP-1193 requests to a bridge
/// URL; `Deterministic` is the in-memory development fallback; `Disabled`
/// refuses everything with the reason it was disabled.
#[derive(Debug, Clone)]
pub struct Eip1193Adapter {
    mode: ProviderMode,
    state: Arc<Mutex<ProviderState>>,
}

#[derive(Debug, Clone)]
enum ProviderMode {
    Disabled(String),
    Deterministic,
    Proxy(ProxyRuntime),
}

#[derive(Debug, Clone)]
struct ProxyRuntime {
    base_url: String,
    client: reqwest::blocking::Client,
}

#[derive(Debug, Clone)]
struct ProviderState {
    accounts: Vec<Address>,
}

impl Default for ProviderState {
    fn default() -> Self {
        Self {
            accounts: vec!["0x1000000000000000000000000000000000000001"
                .parse()
                .expect("valid built-in deterministic account")],
        }
    }
}

impl Default for Eip1193Adapter {
    fn default() -> Self {
        Self::with_config(&FundingAdapterConfig::from_env())
    }
}

impl Eip1193Adapter {
    pub fn with_config(config: &FundingAdapterConfig) -> Self {
        let mode = if let Some(ref base_url) = config.eip1193_proxy_url {
            let timeout = std::time::Duration::from_millis(config.rpc_timeout_ms);
            match reqwest::blocking::Client::builder()
                .timeout(timeout)
                .build()
            {
                Ok(client) => ProviderMode::Proxy(ProxyRuntime {
                    base_url: base_url.clone(),
                    client,
                }),
                Err(e) => {
                    if config.strict_runtime_required() {
                        ProviderMode::Disabled(format!(
                            "failed to initialize EIP-1193 proxy client in production profile: {e}"
                        ))
                    } else {
                        ProviderMode::Deterministic
                    }
                }
            }
        } else if config.strict_runtime_required() {
            ProviderMode::Disabled(
                "EIP-1193 proxy URL not configured in production runtime profile".to_owned(),
            )
        } else {
            ProviderMode::Deterministic
        };

        Self {
            mode,
            state: Arc::new(Mutex::new(ProviderState::default())),
        }
    }

    fn proxy_call(&self, method: &str, params: Value) -> Result<Value, PortError> {
        let ProviderMode::Proxy(ref proxy) = self.mode else {
            return Err(PortError::NotImplemented(
                "eip1193 proxy runtime not enabled",
            ));
        };

        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let response = proxy
            .client
            .post(&proxy.base_url)
            .json(&payload)
            .send()
            .map_err(|e| PortError::Transport(format!("eip1193 proxy request failed: {e}")))?;
        let status = response.status();
        let body: Value = response
            .json()
            .map_err(|e| PortError::Transport(format!("eip1193 proxy json decode failed: {e}")))?;
        if !status.is_success() {
            return Err(PortError::Transport(format!(
                "eip1193 proxy status {status}: {body}"
            )));
        }
        if let Some(err) = body.get("error") {
            let code = err.get("code").and_then(Value::as_i64).unwrap_or_default();
            let message = err
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("provider error")
                .to_owned();
            if code == USER_REJECTED_CODE {
                return Err(PortError::Rejected(message));
            }
            return Err(PortError::Execution(format!(
                "eip1193 proxy returned error {code}: {message}"
            )));
        }
        body.get("result")
            .cloned()
            .ok_or_else(|| PortError::Transport("eip1193 proxy missing result".to_owned()))
    }

    fn submission_payload(call: &PreparedCall) -> Value {
        serde_json::json!({
            "from": call.from,
            "to": call.to,
            "value": format!("{:#x}", call.value),
            "data": call.data,
            "gas": format!("{:#x}", call.gas),
            "chainId": format!("{:#x}", call.chain_id),
        })
    }
}

impl ProviderPort for Eip1193Adapter {
    fn detect(&self) -> Result<(), PortError> {
        match self.mode {
            ProviderMode::Disabled(ref reason) => Err(PortError::NotFound(reason.clone())),
            _ => Ok(()),
        }
    }

    fn request_accounts(&self) -> Result<Vec<Address>, PortError> {
        self.detect()?;

        if matches!(self.mode, ProviderMode::Proxy(_)) {
            let result = self.proxy_call("eth_requestAccounts", serde_json::json!([]))?;
            let arr = result.as_array().ok_or_else(|| {
                PortError::Transport("eth_requestAccounts: array expected".to_owned())
            })?;
            let mut accounts = Vec::with_capacity(arr.len());
            for item in arr {
                let raw = item.as_str().ok_or_else(|| {
                    PortError::Transport("eth_requestAccounts: string expected".to_owned())
                })?;
                let parsed: Address = raw
                    .parse()
                    .map_err(|e| PortError::Validation(format!("invalid account address: {e}")))?;
                accounts.push(parsed);
            }
            let mut guard = self
                .state
                .lock()
                .map_err(|e| PortError::Transport(format!("provider lock poisoned: {e}")))?;
            guard.accounts = accounts.clone();
            return Ok(accounts);
        }

        let guard = self
            .state
            .lock()
            .map_err(|e| PortError::Transport(format!("provider lock poisoned: {e}")))?;
        Ok(guard.accounts.clone())
    }

    fn send_transaction(&self, call: &PreparedCall) -> Result<B256, PortError> {
        self.detect()?;

        if matches!(self.mode, ProviderMode::Proxy(_)) {
            let result = self.proxy_call(
                "eth_sendTransaction",
                serde_json::json!([Self::submission_payload(call)]),
            )?;
            let hash = result.as_str().ok_or_else(|| {
                PortError::Transport("eth_sendTransaction must return hash".to_owned())
            })?;
            return hash
                .parse()
                .map_err(|e| PortError::Validation(format!("invalid tx hash: {e}")));
        }

        // Deterministic fallback: hash the canonical payload.
        let canonical = serde_json::to_vec(&Self::submission_payload(call))
            .map_err(|e| PortError::Validation(format!("tx payload serialization failed: {e}")))?;
        Ok(keccak256(canonical))
    }
}
