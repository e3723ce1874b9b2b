//! Wallet connection panel and connected-wallet summary

use crate::config::ENV_PRIVATE_KEY;
use crate::gui::app::MultisenderApp;
use crate::utils;
use crate::wallet::WalletProvider;
use eframe::egui::{self, RichText};

impl MultisenderApp {
    /// Private-key prompt shown while no wallet is connected
    pub(crate) fn view_connect(&mut self, ui: &mut egui::Ui) {
        let connecting = self.connect.job.is_some();
        self.theme.frame_list().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new("Connect Wallet").strong().color(self.theme.text_heading));
            ui.label(
                RichText::new(format!(
                    "Paste a private key for {}, or set {} before launching.",
                    self.config.network_label(),
                    ENV_PRIVATE_KEY
                ))
                .small()
                .color(self.theme.text_secondary),
            );
            ui.add_space(self.theme.spacing_xs);

            let mut submit = false;
            ui.horizontal(|ui| {
                let width = (ui.available_width() - 110.0).max(120.0);
                let response = ui.add_enabled(
                    !connecting,
                    egui::TextEdit::singleline(&mut self.connect.private_key)
                        .password(true)
                        .hint_text("0x...")
                        .desired_width(width),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submit = true;
                }
                let ready = !connecting && !self.connect.private_key.trim().is_empty();
                if ui
                    .add_enabled(ready, self.theme.button_secondary("Connect"))
                    .clicked()
                {
                    submit = true;
                }
            });

            if connecting {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(RichText::new("Connecting...").small());
                });
            }
            if let Some(error) = &self.connect.error {
                ui.label(RichText::new(format!("[!!] {}", error)).small().color(self.theme.error_text));
            }

            if submit && !connecting && !self.connect.private_key.trim().is_empty() {
                let key = self.connect.private_key.clone();
                let ctx = ui.ctx().clone();
                self.connect_wallet(&ctx, &key);
            }
        });
    }

    /// Address, balance, and a disconnect button
    pub(crate) fn view_wallet_summary(&mut self, ui: &mut egui::Ui) {
        let Some(address) = self.wallet.as_ref().map(|w| w.address()) else {
            return;
        };
        let address = ethers::utils::to_checksum(&address, None);
        let balance = self
            .wallet_balance
            .map(|b| format!("{} {}", utils::format_ether_compact(b), self.config.native_token()))
            .unwrap_or_else(|| "...".to_string());

        let mut disconnect = false;
        let mut refresh = false;
        self.theme.frame_list().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(RichText::new("Wallet:").color(self.theme.text_secondary));
                if ui
                    .link(RichText::new(utils::shorten_hex(&address)).monospace())
                    .on_hover_text(&address)
                    .clicked()
                {
                    let url = self.config.chain.address_explorer_url(&address);
                    if let Err(e) = open::that(&url) {
                        tracing::warn!("Failed to open explorer URL {}: {}", url, e);
                    }
                }
                ui.label(RichText::new(&balance).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let busy = self.submission.is_in_flight();
                    if ui.add_enabled(!busy, egui::Button::new("Disconnect").small()).clicked() {
                        disconnect = true;
                    }
                    if ui.small_button("Refresh").on_hover_text("Refresh balance").clicked() {
                        refresh = true;
                    }
                });
            });
        });

        if disconnect {
            self.disconnect_wallet();
        } else if refresh {
            let ctx = ui.ctx().clone();
            self.refresh_balance(&ctx);
        }
    }
}
