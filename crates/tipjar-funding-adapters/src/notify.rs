use alloy::primitives::Address;

use tipjar_funding_core::{shorten_hex, NotifierPort, Severity, UiStatePort};

/// Console fallback sink: when no visual renderer is wired up, messages land
/// on the diagnostic channel instead of being dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl NotifierPort for TracingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Info => tracing::info!(target: "tipjar", "{message}"),
            Severity::Warn => tracing::warn!(target: "tipjar", "{message}"),
        }
    }

    fn notify_tx_submitted(&self, tx_hash: &str) {
        tracing::info!(
            target: "tipjar",
            "Funding submitted: {} ({tx_hash})",
            shorten_hex(tx_hash, 4, 4)
        );
    }
}

/// UI sink for headless shells: state toggles have nowhere to land.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullUi;

impl UiStatePort for NullUi {
    fn set_connection(&self, _account: Option<Address>) {}
    fn set_balance_enabled(&self, _enabled: bool, _disabled_reason: Option<&str>) {}
}
