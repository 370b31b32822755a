//! Bridge between the egui shell and the funding workspace crates.
//! This must remain the only shell-facing boundary for funding operations.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use alloy::primitives::Address;
use eframe::egui;
use eyre::WrapErr;

use tipjar_funding_adapters::{Eip1193Adapter, FundingAdapterConfig, JsonRpcEndpoint};
use tipjar_funding_core::{
    shorten_hex, ChainEndpoint, CommandOutcome, FundingCommand, FundingOrchestrator, NotifierPort,
    Severity, UiStatePort, WalletSession, MSG_CONNECT_FIRST,
};

type ShellOrchestrator = FundingOrchestrator<Eip1193Adapter, JsonRpcEndpoint, ShellSink, ShellSink>;

/// One toast queued for rendering. The full transaction hash rides along for
/// the copy affordance while the message carries the shortened form.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
    pub tx_hash: Option<String>,
    pub raised_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            tx_hash: None,
            raised_at: Instant::now(),
        }
    }
}

/// Visual state mirrored out of the pipeline for the immediate-mode shell.
#[derive(Debug)]
pub struct ShellFeed {
    pub connected_account: Option<Address>,
    pub balance_enabled: bool,
    pub balance_disabled_reason: Option<String>,
    pub toasts: Vec<Toast>,
    pub pending: bool,
}

impl Default for ShellFeed {
    fn default() -> Self {
        Self {
            connected_account: None,
            balance_enabled: false,
            balance_disabled_reason: Some(MSG_CONNECT_FIRST.to_owned()),
            toasts: Vec::new(),
            pending: false,
        }
    }
}

/// Notification and UI-state sink writing into the shared feed.
#[derive(Clone)]
pub struct ShellSink {
    feed: Arc<Mutex<ShellFeed>>,
}

impl NotifierPort for ShellSink {
    fn notify(&self, message: &str, severity: Severity) {
        if let Ok(mut feed) = self.feed.lock() {
            feed.toasts.push(Toast::new(message, severity));
        }
    }

    fn notify_tx_submitted(&self, tx_hash: &str) {
        if let Ok(mut feed) = self.feed.lock() {
            feed.toasts.push(Toast {
                message: format!("Funding submitted: {}", shorten_hex(tx_hash, 4, 4)),
                severity: Severity::Info,
                tx_hash: Some(tx_hash.to_owned()),
                raised_at: Instant::now(),
            });
        }
    }
}

impl UiStatePort for ShellSink {
    fn set_connection(&self, account: Option<Address>) {
        if let Ok(mut feed) = self.feed.lock() {
            feed.connected_account = account;
        }
    }

    fn set_balance_enabled(&self, enabled: bool, disabled_reason: Option<&str>) {
        if let Ok(mut feed) = self.feed.lock() {
            feed.balance_enabled = enabled;
            feed.balance_disabled_reason = disabled_reason.map(str::to_owned);
        }
    }
}

pub struct FundingBridge {
    orchestrator: Arc<Mutex<ShellOrchestrator>>,
    feed: Arc<Mutex<ShellFeed>>,
}

impl FundingBridge {
    pub fn new(config: &FundingAdapterConfig) -> eyre::Result<Self> {
        let target: Address = config
            .contract_address
            .trim()
            .parse()
            .wrap_err("invalid tip jar contract address")?;
        let node = JsonRpcEndpoint::with_config(config)
            .map_err(|e| eyre::eyre!("failed to initialize rpc endpoint: {e}"))?;

        let feed = Arc::new(Mutex::new(ShellFeed::default()));
        let sink = ShellSink {
            feed: Arc::clone(&feed),
        };
        let orchestrator = FundingOrchestrator::new(
            WalletSession::new(Eip1193Adapter::with_config(config)),
            ChainEndpoint::new(node, config.rpc_url.clone()),
            sink.clone(),
            sink,
            target,
        );

        Ok(Self {
            orchestrator: Arc::new(Mutex::new(orchestrator)),
            feed,
        })
    }

    pub fn feed(&self) -> Arc<Mutex<ShellFeed>> {
        Arc::clone(&self.feed)
    }

    /// Run one command on a worker thread. The pending flag keeps the
    /// triggering affordances disabled until the dispatch lands.
    pub fn dispatch(&self, command: FundingCommand, ctx: &egui::Context) {
        {
            let Ok(mut feed) = self.feed.lock() else {
                return;
            };
            if feed.pending {
                return;
            }
            feed.pending = true;
        }

        let orchestrator = Arc::clone(&self.orchestrator);
        let feed = Arc::clone(&self.feed);
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let outcome = match orchestrator.lock() {
                Ok(mut orchestrator) => Some(orchestrator.dispatch(command)),
                Err(_) => None,
            };
            if let Some(CommandOutcome::Failed(err)) = &outcome {
                tracing::debug!(error = %err, "funding action failed");
            }
            if let Ok(mut feed) = feed.lock() {
                feed.pending = false;
            }
            ctx.request_repaint();
        });
    }
}
