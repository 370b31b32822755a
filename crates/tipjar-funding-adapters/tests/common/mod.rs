#![allow(dead_code)]

use std::io::Read;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use alloy::primitives::{keccak256, Address, Bytes, B256, U256};
use serde_json::Value;
use tiny_http::{Response, Server};

use tipjar_funding_adapters::DEFAULT_RPC_URL;
use tipjar_funding_core::{
    CallRequest, ChainEndpoint, FundingOrchestrator, NodePort, NotifierPort, PortError,
    PreparedCall, ProviderPort, Severity, UiStatePort, WalletSession,
};

/// Provider double that counts submissions.
#[derive(Clone)]
pub struct CountingProvider {
    accounts: Vec<Address>,
    submissions: Arc<AtomicU64>,
}

impl CountingProvider {
    pub fn with_account(account: Address) -> Self {
        Self {
            accounts: vec![account],
            submissions: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn submission_count(&self) -> u64 {
        self.submissions.load(Ordering::SeqCst)
    }
}

impl ProviderPort for CountingProvider {
    fn detect(&self) -> Result<(), PortError> {
        Ok(())
    }

    fn request_accounts(&self) -> Result<Vec<Address>, PortError> {
        Ok(self.accounts.clone())
    }

    fn send_transaction(&self, call: &PreparedCall) -> Result<B256, PortError> {
        self.submissions.fetch_add(1, Ordering::SeqCst);
        let canonical = serde_json::to_vec(call)
            .map_err(|e| PortError::Validation(format!("payload serialization failed: {e}")))?;
        Ok(keccak256(canonical))
    }
}

#[derive(Clone)]
pub enum NodeBehavior {
    Healthy {
        chain_id: u64,
        balance: U256,
        gas: u64,
    },
    Reverting {
        chain_id: u64,
    },
    Unreachable,
}

impl Default for NodeBehavior {
    fn default() -> Self {
        NodeBehavior::Healthy {
            chain_id: 31337,
            balance: U256::from(5_000_000_000_000_000_000u64),
            gas: 21_064,
        }
    }
}

/// Node double with per-method call counters and scriptable failures.
#[derive(Clone, Default)]
pub struct ScriptedNode {
    inner: Arc<ScriptedNodeInner>,
}

#[derive(Default)]
struct ScriptedNodeInner {
    chain_id_calls: AtomicU64,
    balance_calls: AtomicU64,
    call_calls: AtomicU64,
    estimate_calls: AtomicU64,
    balance_queries: Mutex<Vec<Address>>,
    behavior: Mutex<NodeBehavior>,
}

impl ScriptedNode {
    pub fn healthy() -> Self {
        Self::default()
    }

    pub fn reverting() -> Self {
        Self::with_behavior(NodeBehavior::Reverting { chain_id: 31337 })
    }

    pub fn unreachable() -> Self {
        Self::with_behavior(NodeBehavior::Unreachable)
    }

    fn with_behavior(behavior: NodeBehavior) -> Self {
        let node = Self::default();
        *node.inner.behavior.lock().expect("behavior lock") = behavior;
        node
    }

    fn behavior(&self) -> NodeBehavior {
        self.inner.behavior.lock().expect("behavior lock").clone()
    }

    pub fn network_calls(&self) -> u64 {
        self.inner.chain_id_calls.load(Ordering::SeqCst)
            + self.inner.balance_calls.load(Ordering::SeqCst)
            + self.inner.call_calls.load(Ordering::SeqCst)
            + self.inner.estimate_calls.load(Ordering::SeqCst)
    }

    pub fn chain_id_calls(&self) -> u64 {
        self.inner.chain_id_calls.load(Ordering::SeqCst)
    }

    pub fn simulation_calls(&self) -> (u64, u64) {
        (
            self.inner.call_calls.load(Ordering::SeqCst),
            self.inner.estimate_calls.load(Ordering::SeqCst),
        )
    }

    pub fn balance_queries(&self) -> Vec<Address> {
        self.inner
            .balance_queries
            .lock()
            .expect("balance queries lock")
            .clone()
    }
}

impl NodePort for ScriptedNode {
    fn chain_id(&self) -> Result<u64, PortError> {
        self.inner.chain_id_calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior() {
            NodeBehavior::Healthy { chain_id, .. } | NodeBehavior::Reverting { chain_id } => {
                Ok(chain_id)
            }
            NodeBehavior::Unreachable => Err(PortError::Transport("connection refused".to_owned())),
        }
    }

    fn balance_of(&self, address: Address) -> Result<U256, PortError> {
        self.inner.balance_calls.fetch_add(1, Ordering::SeqCst);
        self.inner
            .balance_queries
            .lock()
            .expect("balance queries lock")
            .push(address);
        match self.behavior() {
            NodeBehavior::Healthy { balance, .. } => Ok(balance),
            NodeBehavior::Reverting { .. } => Ok(U256::ZERO),
            NodeBehavior::Unreachable => Err(PortError::Transport("connection refused".to_owned())),
        }
    }

    fn call(&self, _request: &CallRequest) -> Result<Bytes, PortError> {
        self.inner.call_calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior() {
            NodeBehavior::Healthy { .. } => Ok(Bytes::new()),
            NodeBehavior::Reverting { .. } => Err(PortError::Execution(
                "node rejected eth_call (3): execution reverted".to_owned(),
            )),
            NodeBehavior::Unreachable => Err(PortError::Transport("connection refused".to_owned())),
        }
    }

    fn estimate_gas(&self, _request: &CallRequest) -> Result<u64, PortError> {
        self.inner.estimate_calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior() {
            NodeBehavior::Healthy { gas, .. } => Ok(gas),
            NodeBehavior::Reverting { .. } => Err(PortError::Execution(
                "node rejected eth_estimateGas (3): execution reverted".to_owned(),
            )),
            NodeBehavior::Unreachable => Err(PortError::Transport("connection refused".to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyEvent {
    Message { text: String, severity: Severity },
    TxSubmitted { hash: String },
}

/// Notifier double recording every message.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    events: Arc<Mutex<Vec<NotifyEvent>>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<NotifyEvent> {
        self.events.lock().expect("events lock").clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                NotifyEvent::Message {
                    text,
                    severity: Severity::Warn,
                } => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn submitted_hashes(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                NotifyEvent::TxSubmitted { hash } => Some(hash),
                _ => None,
            })
            .collect()
    }
}

impl NotifierPort for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        self.events
            .lock()
            .expect("events lock")
            .push(NotifyEvent::Message {
                text: message.to_owned(),
                severity,
            });
    }

    fn notify_tx_submitted(&self, tx_hash: &str) {
        self.events
            .lock()
            .expect("events lock")
            .push(NotifyEvent::TxSubmitted {
                hash: tx_hash.to_owned(),
            });
    }
}

#[derive(Debug, Clone, Default)]
pub struct UiSnapshot {
    pub connected_account: Option<Address>,
    pub balance_enabled: bool,
    pub balance_disabled_reason: Option<String>,
}

/// UI double recording the latest observable state.
#[derive(Clone, Default)]
pub struct RecordingUi {
    state: Arc<Mutex<UiSnapshot>>,
}

impl RecordingUi {
    pub fn snapshot(&self) -> UiSnapshot {
        self.state.lock().expect("ui state lock").clone()
    }
}

impl UiStatePort for RecordingUi {
    fn set_connection(&self, account: Option<Address>) {
        self.state.lock().expect("ui state lock").connected_account = account;
    }

    fn set_balance_enabled(&self, enabled: bool, disabled_reason: Option<&str>) {
        let mut state = self.state.lock().expect("ui state lock");
        state.balance_enabled = enabled;
        state.balance_disabled_reason = disabled_reason.map(str::to_owned);
    }
}

pub type TestOrchestrator =
    FundingOrchestrator<CountingProvider, ScriptedNode, RecordingNotifier, RecordingUi>;

pub struct Fixture {
    pub orchestrator: TestOrchestrator,
    pub provider: CountingProvider,
    pub node: ScriptedNode,
    pub notifier: RecordingNotifier,
    pub ui: RecordingUi,
}

pub fn fixture_with_node(node: ScriptedNode) -> Fixture {
    let provider = CountingProvider::with_account(funder_address());
    let notifier = RecordingNotifier::default();
    let ui = RecordingUi::default();
    let orchestrator = FundingOrchestrator::new(
        WalletSession::new(provider.clone()),
        ChainEndpoint::new(node.clone(), DEFAULT_RPC_URL),
        notifier.clone(),
        ui.clone(),
        contract_address(),
    );
    Fixture {
        orchestrator,
        provider,
        node,
        notifier,
        ui,
    }
}

pub fn fixture() -> Fixture {
    fixture_with_node(ScriptedNode::healthy())
}

pub fn contract_address() -> Address {
    "0x000000000000000000000000000000000000BEEF"
        .parse()
        .expect("valid contract address")
}

pub fn funder_address() -> Address {
    "0x1000000000000000000000000000000000000001"
        .parse()
        .expect("valid funder address")
}

/// One-thread JSON-RPC server for adapter tests. `respond` returns the
/// `result`/`error` fragment for the envelope.
pub fn spawn_rpc_server<F>(respond: F) -> String
where
    F: Fn(&str, &Value) -> Value + Send + Sync + 'static,
{
    let server = Server::http("127.0.0.1:0").expect("bind test server");
    let addr = server.server_addr().to_ip().expect("tcp listener");
    thread::spawn(move || {
        for mut request in server.incoming_requests() {
            let mut body = String::new();
            let _ = request.as_reader().read_to_string(&mut body);
            let parsed: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
            let method = parsed
                .get("method")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned();
            let reply = respond(&method, parsed.get("params").unwrap_or(&Value::Null));

            let mut envelope = serde_json::json!({ "jsonrpc": "2.0", "id": 1 });
            if let (Value::Object(map), Value::Object(extra)) = (&mut envelope, reply) {
                for (key, value) in extra {
                    map.insert(key, value);
                }
            }
            let _ = request.respond(Response::from_string(envelope.to_string()));
        }
    });
    format!("http://{addr}")
}
