//! Main application state and update loop

use std::sync::{Arc, Mutex};
use std::time::Duration;

use eframe::egui;

use tipjar_funding_adapters::FundingAdapterConfig;
use tipjar_funding_core::{shorten_hex, FundingCommand, Severity};

use crate::bridge::{FundingBridge, ShellFeed, Toast};
use crate::ui;

const TOAST_DURATION: Duration = Duration::from_millis(3000);

/// The main application state
pub struct App {
    bridge: FundingBridge,
    feed: Arc<Mutex<ShellFeed>>,
    /// Raw amount as typed into the funding form
    amount: String,
}

impl App {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> eyre::Result<Self> {
        let config = FundingAdapterConfig::from_env();
        let bridge = FundingBridge::new(&config)?;
        let feed = bridge.feed();
        Ok(Self {
            bridge,
            feed,
            amount: String::new(),
        })
    }

    fn draw_toasts(&self, ctx: &egui::Context, toasts: &[Toast]) {
        let mut offset = 8.0;
        for (index, toast) in toasts.iter().rev().enumerate() {
            egui::Area::new(egui::Id::new(("toast", index)))
                .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-8.0, offset))
                .order(egui::Order::Foreground)
                .show(ctx, |ui| {
                    if ui::toast_card(ui, toast) {
                        if let Some(hash) = &toast.tx_hash {
                            self.copy_tx_hash(hash);
                        }
                    }
                });
            offset += 44.0;
        }
    }

    fn copy_tx_hash(&self, hash: &str) {
        let toast = if ui::copy_to_clipboard(hash) {
            Toast::new("Transaction hash copied.", Severity::Info)
        } else {
            Toast::new("Could not copy transaction hash.", Severity::Warn)
        };
        if let Ok(mut feed) = self.feed.lock() {
            feed.toasts.push(toast);
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (connected_account, balance_enabled, balance_reason, pending, toasts) = {
            let Ok(mut feed) = self.feed.lock() else {
                return;
            };
            feed.toasts
                .retain(|toast| toast.raised_at.elapsed() < TOAST_DURATION);
            (
                feed.connected_account,
                feed.balance_enabled,
                feed.balance_disabled_reason.clone(),
                feed.pending,
                feed.toasts.clone(),
            )
        };

        egui::CentralPanel::default().show(ctx, |ui| {
            ui::styled_heading(ui, "Tipjar");
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                let connect_label = if connected_account.is_some() {
                    "Disconnect"
                } else {
                    "Connect"
                };
                if ui
                    .add_enabled(!pending, egui::Button::new(connect_label))
                    .clicked()
                {
                    self.bridge.dispatch(FundingCommand::ToggleConnection, ctx);
                }
                if let Some(account) = connected_account {
                    ui.label(
                        egui::RichText::new(format!(
                            "Connected: {}",
                            shorten_hex(&account.to_string(), 4, 4)
                        ))
                        .monospace(),
                    );
                }
            });

            ui.add_space(8.0);

            let balance_response = ui::soft_disabled_button(
                ui,
                "Get Balance",
                balance_enabled && !pending,
                balance_reason.as_deref(),
            );
            if balance_response.clicked() && !pending {
                self.bridge.dispatch(FundingCommand::ShowBalance, ctx);
            }

            ui::section_header(ui, "Buy a coffee");
            ui.horizontal(|ui| {
                ui.label("Amount (ETH):");
                let amount_response = ui::amount_input(ui, &mut self.amount);
                let submitted = ui
                    .add_enabled(!pending, egui::Button::new("Fund"))
                    .clicked()
                    || (amount_response.lost_focus()
                        && ui.input(|i| i.key_pressed(egui::Key::Enter)));
                if submitted && !pending {
                    self.bridge.dispatch(
                        FundingCommand::SubmitFunding {
                            raw_amount: self.amount.clone(),
                        },
                        ctx,
                    );
                }
            });

            if pending {
                ui.add_space(6.0);
                ui.spinner();
            }
        });

        self.draw_toasts(ctx, &toasts);

        if !toasts.is_empty() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}
