//! Shared egui widgets and platform helpers

use eframe::egui;

use tipjar_funding_core::Severity;

use crate::bridge::Toast;

/// Styled heading with accent color
pub fn styled_heading(ui: &mut egui::Ui, text: &str) {
    ui.heading(egui::RichText::new(text).color(egui::Color32::from_rgb(0, 212, 170)));
}

/// Section header with separator
pub fn section_header(ui: &mut egui::Ui, text: &str) {
    ui.add_space(10.0);
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(text).strong().size(14.0));
    });
    ui.separator();
}

/// Create a styled text edit for decimal amount input
pub fn amount_input(ui: &mut egui::Ui, value: &mut String) -> egui::Response {
    ui.add(
        egui::TextEdit::singleline(value)
            .hint_text("0.01")
            .desired_width(150.0)
            .font(egui::TextStyle::Monospace),
    )
}

/// Button that stays clickable while logically disabled, so a click can still
/// surface the reason it is disabled. Dimmed style plus a hover hint.
pub fn soft_disabled_button(
    ui: &mut egui::Ui,
    text: &str,
    enabled: bool,
    reason: Option<&str>,
) -> egui::Response {
    let label = if enabled {
        egui::RichText::new(text)
    } else {
        egui::RichText::new(text).weak()
    };
    let response = ui.add(egui::Button::new(label));
    match reason {
        Some(reason) if !enabled => response.on_hover_text(reason.to_owned()),
        _ => response,
    }
}

/// Render one toast card; returns true when its copy affordance was clicked.
pub fn toast_card(ui: &mut egui::Ui, toast: &Toast) -> bool {
    let mut copy_clicked = false;
    let fill = match toast.severity {
        Severity::Info => egui::Color32::from_rgb(11, 15, 20),
        Severity::Warn => egui::Color32::from_rgb(51, 65, 85),
    };
    egui::Frame::none()
        .fill(fill)
        .stroke(egui::Stroke::new(
            1.0,
            egui::Color32::from_rgba_unmultiplied(148, 163, 184, 90),
        ))
        .rounding(8.0)
        .inner_margin(egui::Margin::symmetric(10.0, 6.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(&toast.message)
                        .color(egui::Color32::from_rgb(229, 231, 235)),
                );
                if toast.tx_hash.is_some()
                    && ui
                        .small_button("⧉")
                        .on_hover_text("Copy transaction hash")
                        .clicked()
                {
                    copy_clicked = true;
                }
            });
        });
    copy_clicked
}

/// Copy to clipboard; false when the platform clipboard is unavailable.
pub fn copy_to_clipboard(text: &str) -> bool {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => clipboard.set_text(text).is_ok(),
        Err(_) => false,
    }
}
