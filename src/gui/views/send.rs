//! Send view implementation
//!
//! Recipient/amount form, confirmation dialog, submission status, and the
//! list of transfers decoded from the receipt.

use crate::config::{ChainConfig, Config};
use crate::error::MultisendError;
use crate::gui::app::{MultisenderApp, PendingConfirmation};
use crate::multisend::{self, TransferRequest};
use crate::receipt::DecodedTransfer;
use crate::submission::SubmissionPhase;
use crate::utils;
use crate::validator;
use eframe::egui::{self, RichText};
use ethers::types::U256;

/// Validate the form and compose the call without touching submission state.
pub(crate) fn prepare_confirmation(
    config: &Config,
    recipients_text: &str,
    amount: &str,
) -> Result<PendingConfirmation, MultisendError> {
    let input = validator::validate(recipients_text, amount)?;
    let request = TransferRequest::try_from(input)?;
    let call = multisend::compose(config.multisender_address, &request)?;
    Ok(PendingConfirmation { request, call })
}

/// Checksummed recipient and its explorer page.
pub(crate) fn transfer_link(chain: &ChainConfig, transfer: &DecodedTransfer) -> (String, String) {
    let recipient = ethers::utils::to_checksum(&transfer.recipient, None);
    let url = chain.address_explorer_url(&recipient);
    (recipient, url)
}

impl PendingConfirmation {
    pub(crate) fn amount_per_recipient(&self) -> String {
        utils::format_ether_compact(self.request.amount_per_recipient_wei)
    }

    pub(crate) fn total(&self) -> String {
        utils::format_ether_compact(self.call.value)
    }

    pub(crate) fn contract(&self) -> String {
        ethers::utils::to_checksum(&self.call.contract, None)
    }
}

impl MultisenderApp {
    /// Render the send view
    pub(crate) fn view_send(&mut self, ui: &mut egui::Ui) {
        self.theme.frame_card().show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(RichText::new("Somnia STT Multisender").color(self.theme.text_heading));
                ui.add_space(self.theme.spacing_xs);
                ui.label(
                    RichText::new(format!(
                        "Send an equal amount of {} to many addresses in a single transaction.",
                        self.config.native_token()
                    ))
                    .color(self.theme.text_secondary),
                );
            });
            ui.add_space(self.theme.spacing_lg);

            if self.wallet.is_none() {
                self.view_connect(ui);
                ui.add_space(self.theme.spacing_lg);
            } else {
                self.view_wallet_summary(ui);
                ui.add_space(self.theme.spacing_md);
            }

            self.render_form(ui);
            ui.add_space(self.theme.spacing_lg);
            self.render_send_button(ui);
            ui.add_space(self.theme.spacing_md);
            self.render_result(ui);
        });
    }

    fn render_form(&mut self, ui: &mut egui::Ui) {
        // Frozen while the confirmation dialog shows what will be signed
        let editable = self.submission.can_submit() && self.form.confirmation.is_none();

        ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Recipient Addresses (one per line)").strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .add_enabled(editable, self.theme.button_secondary("Load from file"))
                        .on_hover_text("CSV or text file, address in the first column")
                        .clicked()
                    {
                        self.load_recipients_from_file();
                    }
                });
            });
            ui.add_enabled(
                editable,
                egui::TextEdit::multiline(&mut self.form.recipients_input)
                    .hint_text("0xAddress1...\n0xAddress2...")
                    .font(egui::TextStyle::Monospace)
                    .desired_rows(8)
                    .desired_width(f32::INFINITY),
            );
            if let Some(status) = &self.form.file_status {
                ui.label(RichText::new(status).small().color(self.theme.text_secondary));
            }
            self.render_recipient_preview(ui);

            ui.add_space(self.theme.spacing_md);
            ui.label(RichText::new(format!("Amount per Address ({})", self.config.native_token())).strong());
            ui.add_enabled(
                editable,
                egui::TextEdit::singleline(&mut self.form.amount_input)
                    .hint_text("e.g., 0.1")
                    .desired_width(f32::INFINITY),
            );
            self.render_total_preview(ui);
        });
    }

    fn render_recipient_preview(&self, ui: &mut egui::Ui) {
        let entries = validator::parse_recipient_entries(&self.form.recipients_input);
        if entries.is_empty() {
            return;
        }
        let valid = entries.iter().filter(|e| e.is_valid).count();
        let invalid: Vec<_> = entries.iter().filter(|e| !e.is_valid).collect();

        ui.horizontal_wrapped(|ui| {
            ui.label(RichText::new(format!("[OK] {} valid", valid)).small().color(self.theme.success_text));
            if !invalid.is_empty() {
                ui.label(
                    RichText::new(format!("[!!] {} invalid (skipped)", invalid.len()))
                        .small()
                        .color(self.theme.warning),
                );
            }
        });
        if !invalid.is_empty() {
            egui::CollapsingHeader::new(RichText::new("Show skipped lines").small())
                .id_source("skipped_lines")
                .show(ui, |ui| {
                    for entry in invalid.iter().take(20) {
                        ui.label(
                            RichText::new(format!("line {}: {}", entry.line, entry.address))
                                .small()
                                .monospace()
                                .color(self.theme.warning),
                        );
                    }
                    if invalid.len() > 20 {
                        ui.label(RichText::new(format!("... and {} more", invalid.len() - 20)).small());
                    }
                });
        }
    }

    fn render_total_preview(&self, ui: &mut egui::Ui) {
        let count = validator::valid_addresses(&self.form.recipients_input).len();
        if count == 0 || self.form.amount_input.trim().is_empty() {
            return;
        }
        let symbol = self.config.native_token();
        match validator::parse_amount(&self.form.amount_input) {
            Ok(amount) => match U256::from(count).checked_mul(amount) {
                Some(total) => {
                    ui.label(
                        RichText::new(format!(
                            "Total: {} {} for {} recipients",
                            utils::format_ether_compact(total),
                            symbol,
                            count
                        ))
                        .color(self.theme.text_secondary),
                    );
                }
                None => {
                    ui.label(RichText::new("Total value overflows").small().color(self.theme.error_text));
                }
            },
            Err(_) => {
                ui.label(
                    RichText::new("Enter a positive decimal amount")
                        .small()
                        .color(self.theme.warning),
                );
            }
        }
    }

    fn render_send_button(&mut self, ui: &mut egui::Ui) {
        let label = match self.submission.phase() {
            SubmissionPhase::Submitting => "Sending...",
            SubmissionPhase::Pending { .. } => "Confirming...",
            _ => "Send to All Addresses",
        };
        let enabled = self.wallet.is_some()
            && self.submission.can_submit()
            && self.form.confirmation.is_none();

        ui.vertical_centered(|ui| {
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(enabled, self.theme.button_primary(label, enabled))
                    .clicked()
                {
                    self.request_confirmation();
                }
                if self.submission.is_in_flight() {
                    ui.spinner();
                }
            });
            if self.wallet.is_none() {
                ui.label(
                    RichText::new("Connect a wallet to send.")
                        .small()
                        .color(self.theme.text_secondary),
                );
            }
        });
    }

    fn render_result(&mut self, ui: &mut egui::Ui) {
        if let Some(error) = &self.form.input_error {
            self.render_error_box(ui, error);
            return;
        }

        let phase = self.submission.phase().clone();
        match &phase {
            SubmissionPhase::Idle | SubmissionPhase::Submitting => {}
            SubmissionPhase::Rejected { error } => self.render_error_box(ui, error),
            SubmissionPhase::Pending { hash } => {
                self.render_hash_box(ui, &format!("{:?}", hash), None);
            }
            SubmissionPhase::Failed { hash, error } => {
                self.render_hash_box(ui, &format!("{:?}", hash), None);
                ui.add_space(self.theme.spacing_sm);
                self.render_error_box(ui, error);
            }
            SubmissionPhase::Confirmed {
                hash,
                block_number,
                ..
            } => {
                self.render_hash_box(ui, &format!("{:?}", hash), Some(*block_number));
                ui.add_space(self.theme.spacing_sm);
                self.render_transfers(ui);
            }
        }
    }

    /// `confirmed` is `None` while the receipt is outstanding.
    fn render_hash_box(&self, ui: &mut egui::Ui, hash: &str, confirmed: Option<Option<u64>>) {
        self.theme.frame_success().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new("Transaction Submitted!").strong().color(self.theme.success_text));
            ui.horizontal_wrapped(|ui| {
                ui.label(RichText::new(hash).monospace().small());
                if ui.small_button("Copy").on_hover_text("Copy transaction hash").clicked() {
                    ui.output_mut(|o| o.copied_text = hash.to_string());
                }
            });
            let url = self.config.chain.tx_explorer_url(hash);
            if ui
                .link(RichText::new(format!("View on {}", self.config.chain.explorer_name)))
                .on_hover_text(&url)
                .clicked()
            {
                if let Err(e) = open::that(&url) {
                    tracing::warn!("Failed to open explorer URL {}: {}", url, e);
                }
            }
            match confirmed {
                None => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Waiting for confirmation...");
                    });
                }
                Some(Some(block)) => {
                    ui.label(RichText::new(format!("Confirmed in block {}", block)).color(self.theme.success_text));
                }
                Some(None) => {
                    ui.label(RichText::new("Confirmed").color(self.theme.success_text));
                }
            }
        });
    }

    fn render_transfers(&self, ui: &mut egui::Ui) {
        let transfers = self.submission.transfers();
        let symbol = self.config.native_token();
        self.theme.frame_list().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new("Internal Transfers:").strong().color(self.theme.text_heading));
            if transfers.is_empty() {
                ui.label(
                    RichText::new("No transfer events were found in the receipt.")
                        .small()
                        .color(self.theme.text_secondary),
                );
                return;
            }
            egui::ScrollArea::vertical()
                .id_source("transfers_scroll")
                .max_height(200.0)
                .show(ui, |ui| {
                    for transfer in transfers {
                        let (recipient, url) = transfer_link(&self.config.chain, transfer);
                        ui.horizontal_wrapped(|ui| {
                            ui.label(
                                RichText::new(format!("Sent {} {} to", transfer.display_amount(), symbol))
                                    .small(),
                            );
                            if ui
                                .link(RichText::new(&recipient).small().monospace())
                                .on_hover_text(&url)
                                .clicked()
                            {
                                if let Err(e) = open::that(&url) {
                                    tracing::warn!("Failed to open explorer URL {}: {}", url, e);
                                }
                            }
                        });
                    }
                });
            ui.add_space(self.theme.spacing_xs);
            ui.label(
                RichText::new(format!(
                    "Total: {} {}",
                    utils::format_ether_compact(crate::receipt::total_transferred(transfers)),
                    symbol
                ))
                .strong(),
            );
        });
    }

    fn render_error_box(&self, ui: &mut egui::Ui, error: &MultisendError) {
        self.theme.frame_error().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(error.short_message()).strong().color(self.theme.error_text));
            let detail = error.to_string();
            if detail != error.short_message() {
                ui.label(RichText::new(detail).small().color(self.theme.error_text));
            }
        });
    }

    /// Modal-style confirmation shown before the wallet is asked to sign.
    pub(crate) fn render_confirmation(&mut self, ctx: &egui::Context) {
        let Some(confirmation) = &self.form.confirmation else {
            return;
        };
        let symbol = self.config.native_token().to_string();
        let mut open = true;
        let mut confirmed = false;
        let mut cancelled = false;

        egui::Window::new("Confirm Multisend")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                egui::Grid::new("confirm_grid").num_columns(2).spacing([12.0, 6.0]).show(ui, |ui| {
                    ui.label("Recipients:");
                    ui.label(RichText::new(confirmation.call.recipient_count.to_string()).strong());
                    ui.end_row();
                    ui.label("Amount each:");
                    ui.label(RichText::new(format!("{} {}", confirmation.amount_per_recipient(), symbol)).strong());
                    ui.end_row();
                    ui.label("Total value:");
                    ui.label(RichText::new(format!("{} {}", confirmation.total(), symbol)).strong());
                    ui.end_row();
                    ui.label("Contract:");
                    ui.label(RichText::new(confirmation.contract()).monospace().small());
                    ui.end_row();
                });
                ui.add_space(self.theme.spacing_sm);
                ui.label(
                    RichText::new("Gas is paid on top of the total value.")
                        .small()
                        .color(self.theme.text_secondary),
                );
                ui.add_space(self.theme.spacing_sm);
                ui.horizontal(|ui| {
                    if ui.add(self.theme.button_primary("Confirm", true)).clicked() {
                        confirmed = true;
                    }
                    if ui.add(self.theme.button_secondary("Cancel")).clicked() {
                        cancelled = true;
                    }
                });
            });

        if confirmed {
            self.submit(ctx);
        } else if cancelled || !open {
            self.cancel_confirmation();
        }
    }

    fn load_recipients_from_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Recipient lists", &["csv", "txt"])
            .pick_file()
        else {
            return;
        };
        match validator::load_recipients_file(&path) {
            Ok(text) => {
                let count = validator::valid_addresses(&text).len();
                self.form.recipients_input = text;
                self.form.input_error = None;
                self.form.file_status = Some(format!("Loaded {} valid addresses from {}", count, path.display()));
            }
            Err(e) => {
                tracing::warn!("Failed to load recipients from {:?}: {}", path, e);
                self.form.file_status = Some(format!("[!!] Failed to load file: {}", e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_confirmation_totals() {
        let text = "0x00000000000000000000000000000000000000aa\n0x00000000000000000000000000000000000000bb";
        let confirmation = prepare_confirmation(&Config::default(), text, "0.5").unwrap();
        assert_eq!(confirmation.call.recipient_count, 2);
        assert_eq!(confirmation.request.total_value_wei, U256::exp10(18));
        assert_eq!(confirmation.amount_per_recipient(), "0.5");
        assert_eq!(confirmation.total(), "1");
        assert_eq!(confirmation.contract(), "0xf5934921684f6f581A5C3198EB4f62a9FA37D6b4");
    }

    #[test]
    fn test_transfer_link_points_at_explorer_address_page() {
        let transfer = DecodedTransfer {
            recipient: "0xf5934921684f6f581a5c3198eb4f62a9fa37d6b4".parse().unwrap(),
            amount_wei: U256::exp10(17),
        };
        let (recipient, url) = transfer_link(&crate::config::SOMNIA_TESTNET, &transfer);
        assert_eq!(recipient, "0xf5934921684f6f581A5C3198EB4f62a9FA37D6b4");
        assert_eq!(
            url,
            "https://shannon-explorer.somnia.network/address/0xf5934921684f6f581A5C3198EB4f62a9FA37D6b4"
        );
    }

    #[test]
    fn test_prepare_confirmation_rejects_empty_recipients() {
        let err = prepare_confirmation(&Config::default(), "not-an-address", "1").unwrap_err();
        assert_eq!(
            err,
            MultisendError::InvalidInput("Please enter at least one valid recipient address.".to_string())
        );
    }
}
