//! Settings view implementation
//!
//! RPC endpoint, multisender contract, and receipt polling overrides.

use crate::gui::app::{MultisenderApp, SettingsFormState};
use crate::user_settings::UserSettings;
use eframe::egui::{self, RichText};
use tracing::info;

/// Turn the form into settings, rejecting anything `Config` would not accept.
pub(crate) fn settings_from_form(
    base: &crate::config::Config,
    current: &UserSettings,
    form: &SettingsFormState,
) -> Result<UserSettings, String> {
    let mut settings = current.clone();
    settings.set_rpc_url_override(&form.rpc_url);
    settings.set_multisender_address_override(&form.contract_address);
    settings.receipt_poll_interval_ms = form
        .poll_interval_ms
        .trim()
        .parse()
        .map_err(|_| format!("Poll interval must be a whole number of milliseconds: '{}'", form.poll_interval_ms))?;
    settings.receipt_timeout_secs = form
        .timeout_secs
        .trim()
        .parse()
        .map_err(|_| format!("Timeout must be a whole number of seconds: '{}'", form.timeout_secs))?;

    let mut candidate = base.clone();
    candidate.apply_settings(&settings).map_err(|e| e.to_string())?;
    Ok(settings)
}

impl MultisenderApp {
    /// Render the settings view
    pub(crate) fn view_settings(&mut self, ui: &mut egui::Ui) {
        let locked = self.submission.is_in_flight() || self.form.confirmation.is_some();

        self.theme.frame_card().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.heading(RichText::new("Settings").color(self.theme.text_heading));
            ui.add_space(self.theme.spacing_md);

            if locked {
                ui.label(
                    RichText::new("Settings are locked while a transaction is being confirmed or is in flight.")
                        .small()
                        .color(self.theme.warning),
                );
                ui.add_space(self.theme.spacing_sm);
            }

            ui.add_enabled_ui(!locked, |ui| {
                egui::Grid::new("settings_grid")
                    .num_columns(2)
                    .spacing([12.0, 10.0])
                    .show(ui, |ui| {
                        ui.label("RPC URL:");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.settings_form.rpc_url)
                                .hint_text(self.base_config.rpc_url.as_str())
                                .desired_width(360.0),
                        );
                        ui.end_row();

                        ui.label("Multisender contract:");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.settings_form.contract_address)
                                .hint_text(format!("{:?}", self.base_config.multisender_address))
                                .font(egui::TextStyle::Monospace)
                                .desired_width(360.0),
                        );
                        ui.end_row();

                        ui.label("Receipt poll interval (ms):");
                        ui.add(egui::TextEdit::singleline(&mut self.settings_form.poll_interval_ms).desired_width(120.0));
                        ui.end_row();

                        ui.label("Receipt timeout (s):");
                        ui.add(egui::TextEdit::singleline(&mut self.settings_form.timeout_secs).desired_width(120.0));
                        ui.end_row();
                    });
                ui.label(
                    RichText::new("Leave RPC URL or contract blank to use the defaults.")
                        .small()
                        .color(self.theme.text_secondary),
                );

                ui.add_space(self.theme.spacing_md);
                ui.horizontal(|ui| {
                    if ui.add(self.theme.button_primary("Save", true)).clicked() {
                        self.save_settings();
                    }
                    if ui.add(self.theme.button_secondary("Restore defaults")).clicked() {
                        self.settings_form = SettingsFormState::from_settings(&UserSettings::default());
                        self.save_settings();
                    }
                });
            });

            if let Some(status) = &self.settings_form.status {
                ui.add_space(self.theme.spacing_sm);
                let color = if status.starts_with("[!!]") {
                    self.theme.error_text
                } else {
                    self.theme.success_text
                };
                ui.label(RichText::new(status).color(color));
            }

            ui.add_space(self.theme.spacing_lg);
            ui.separator();
            ui.label(RichText::new("Files").strong());
            ui.label(RichText::new("Settings file:").color(self.theme.text_secondary));
            ui.label(RichText::new(UserSettings::settings_path_display()).small().monospace());
            ui.label(RichText::new("Log file:").color(self.theme.text_secondary));
            let log_path = crate::operation_log::log_file_path();
            ui.horizontal(|ui| {
                ui.label(RichText::new(&log_path).small().monospace());
                if ui.small_button("Copy").on_hover_text("Copy path").clicked() {
                    ui.output_mut(|o| o.copied_text = log_path.clone());
                }
            });
        });
    }

    fn save_settings(&mut self) {
        let settings = match settings_from_form(&self.base_config, &self.user_settings, &self.settings_form) {
            Ok(settings) => settings,
            Err(e) => {
                self.settings_form.status = Some(format!("[!!] {}", e));
                return;
            }
        };

        let mut config = self.base_config.clone();
        if let Err(e) = config.apply_settings(&settings) {
            self.settings_form.status = Some(format!("[!!] {}", e));
            return;
        }
        if let Err(e) = settings.save() {
            self.settings_form.status = Some(format!("[!!] Failed to save settings: {}", e));
            return;
        }

        let rpc_changed = config.rpc_url != self.config.rpc_url;
        info!(
            "Settings saved: rpc={} contract={:?}",
            config.rpc_url, config.multisender_address
        );
        self.config = config;
        self.user_settings = settings;
        self.settings_form = SettingsFormState::from_settings(&self.user_settings);

        // The wallet's client is bound to the old endpoint
        if rpc_changed && self.wallet.is_some() {
            self.disconnect_wallet();
            self.notifications.push("RPC endpoint changed; reconnect your wallet.");
            self.settings_form.status = Some("[OK] Settings saved. Reconnect your wallet.".to_string());
        } else {
            self.settings_form.status = Some("[OK] Settings saved.".to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn form(rpc: &str, contract: &str, poll: &str, timeout: &str) -> SettingsFormState {
        SettingsFormState {
            rpc_url: rpc.to_string(),
            contract_address: contract.to_string(),
            poll_interval_ms: poll.to_string(),
            timeout_secs: timeout.to_string(),
            status: None,
        }
    }

    #[test]
    fn test_settings_from_form_accepts_overrides() {
        let settings = settings_from_form(
            &Config::default(),
            &UserSettings::default(),
            &form(
                "https://rpc.example.org",
                "0x00000000000000000000000000000000000000aa",
                "250",
                "60",
            ),
        )
        .unwrap();
        assert_eq!(settings.rpc_url_override.as_deref(), Some("https://rpc.example.org"));
        assert_eq!(settings.receipt_poll_interval_ms, 250);
        assert_eq!(settings.receipt_timeout_secs, 60);
    }

    #[test]
    fn test_settings_from_form_blank_clears_overrides() {
        let current = UserSettings {
            rpc_url_override: Some("https://old.example.org".to_string()),
            ..UserSettings::default()
        };
        let settings =
            settings_from_form(&Config::default(), &current, &form("  ", "", "500", "120")).unwrap();
        assert_eq!(settings.rpc_url_override, None);
        assert_eq!(settings.multisender_address_override, None);
    }

    #[test]
    fn test_settings_from_form_rejects_bad_values() {
        let base = Config::default();
        let current = UserSettings::default();
        assert!(settings_from_form(&base, &current, &form("ftp://x", "", "500", "120")).is_err());
        assert!(settings_from_form(&base, &current, &form("", "0x1234", "500", "120")).is_err());
        assert!(settings_from_form(&base, &current, &form("", "", "fast", "120")).is_err());
        assert!(settings_from_form(&base, &current, &form("", "", "500", "-1")).is_err());
    }
}
