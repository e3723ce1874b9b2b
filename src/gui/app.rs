//! Main GUI application module
//!
//! Contains the MultisenderApp struct, its state types, and the frame loop.

use crate::{
    config::{Config, ENV_PRIVATE_KEY},
    error::MultisendError,
    multisend::{MultisendCall, TransferRequest},
    operation_log,
    submission::{Submission, SubmissionEvent, SubmissionPhase, SubmissionId},
    user_settings::UserSettings,
    utils,
    wallet::{EthersWallet, WalletProvider},
};
use anyhow::{anyhow, Result};
use eframe::{egui, egui::RichText, App, Frame, NativeOptions};
use ethers::types::U256;
use tracing::{info, warn};

use super::notifications::{phase_notification, Notifications};
use super::theme::{configure_style, AppTheme};
use super::worker::{AsyncJob, Drained, SubmissionWorker};

/// GUI section enum for navigation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuiSection {
    Send,
    Settings,
}

#[derive(Default)]
pub(crate) struct ConnectState {
    pub(crate) private_key: String,
    pub(crate) job: Option<AsyncJob<(EthersWallet, U256)>>,
    pub(crate) error: Option<String>,
}

/// The exact call the user is asked to confirm; this is what gets signed
#[derive(Debug, Clone)]
pub(crate) struct PendingConfirmation {
    pub(crate) request: TransferRequest,
    pub(crate) call: MultisendCall,
}

#[derive(Default)]
pub(crate) struct SendFormState {
    pub(crate) recipients_input: String,
    pub(crate) amount_input: String,
    pub(crate) confirmation: Option<PendingConfirmation>,
    /// Validation failure of the last attempt; never reaches the wallet
    pub(crate) input_error: Option<MultisendError>,
    pub(crate) file_status: Option<String>,
}

pub(crate) struct SettingsFormState {
    pub(crate) rpc_url: String,
    pub(crate) contract_address: String,
    pub(crate) poll_interval_ms: String,
    pub(crate) timeout_secs: String,
    pub(crate) status: Option<String>,
}

impl SettingsFormState {
    pub(crate) fn from_settings(settings: &UserSettings) -> Self {
        Self {
            rpc_url: settings.rpc_url_override.clone().unwrap_or_default(),
            contract_address: settings.multisender_address_override.clone().unwrap_or_default(),
            poll_interval_ms: settings.receipt_poll_interval_ms.to_string(),
            timeout_secs: settings.receipt_timeout_secs.to_string(),
            status: None,
        }
    }
}

pub struct MultisenderApp {
    /// Environment-derived config, before user overrides
    pub(crate) base_config: Config,
    pub(crate) config: Config,
    pub(crate) user_settings: UserSettings,
    pub(crate) theme: AppTheme,
    pub(crate) section: GuiSection,

    pub(crate) wallet: Option<EthersWallet>,
    pub(crate) wallet_balance: Option<U256>,
    pub(crate) balance_job: Option<AsyncJob<U256>>,
    pub(crate) connect: ConnectState,

    pub(crate) form: SendFormState,
    pub(crate) submission: Submission,
    pub(crate) submission_worker: Option<SubmissionWorker>,
    last_logged_id: Option<SubmissionId>,

    pub(crate) settings_form: SettingsFormState,
    pub(crate) notifications: Notifications,
    pub(crate) show_notifications_popup: bool,
}

impl MultisenderApp {
    pub fn new(base_config: Config, config: Config, user_settings: UserSettings, ctx: &egui::Context) -> Self {
        let theme = AppTheme::default();
        configure_style(ctx, &theme);

        let mut app = Self {
            base_config,
            config,
            settings_form: SettingsFormState::from_settings(&user_settings),
            user_settings,
            theme,
            section: GuiSection::Send,
            wallet: None,
            wallet_balance: None,
            balance_job: None,
            connect: ConnectState::default(),
            form: SendFormState::default(),
            submission: Submission::default(),
            submission_worker: None,
            last_logged_id: None,
            notifications: Notifications::default(),
            show_notifications_popup: false,
        };

        if let Ok(key) = std::env::var(ENV_PRIVATE_KEY) {
            if !key.trim().is_empty() {
                info!("Connecting wallet from {}", ENV_PRIVATE_KEY);
                app.connect_wallet(ctx, &key);
            }
        }
        app
    }

    /// Build a wallet from `private_key` and verify it against the RPC endpoint.
    pub(crate) fn connect_wallet(&mut self, ctx: &egui::Context, private_key: &str) {
        self.connect.error = None;
        let wallet = match EthersWallet::from_private_key(&self.config, private_key) {
            Ok(wallet) => wallet,
            Err(e) => {
                self.connect.error = Some(e.to_string());
                return;
            }
        };
        self.connect.job = Some(AsyncJob::spawn(ctx, move || async move {
            wallet.verify_chain().await?;
            let balance = wallet.balance().await?;
            Ok((wallet, balance))
        }));
    }

    pub(crate) fn disconnect_wallet(&mut self) {
        self.wallet = None;
        self.wallet_balance = None;
        self.balance_job = None;
        self.connect = ConnectState::default();
    }

    pub(crate) fn refresh_balance(&mut self, ctx: &egui::Context) {
        let Some(wallet) = self.wallet.clone() else {
            return;
        };
        if self.balance_job.as_ref().is_some_and(|job| job.is_running()) {
            return;
        }
        self.balance_job = Some(AsyncJob::spawn(ctx, move || async move { wallet.balance().await }));
    }

    /// Validate the form and open the confirmation dialog.
    pub(crate) fn request_confirmation(&mut self) {
        self.form.input_error = None;
        self.submission.clear_result();
        match super::views::send::prepare_confirmation(
            &self.config,
            &self.form.recipients_input,
            &self.form.amount_input,
        ) {
            Ok(confirmation) => self.form.confirmation = Some(confirmation),
            Err(e) => {
                warn!("Rejected form input: {}", e);
                self.form.input_error = Some(e);
            }
        }
    }

    /// The user confirmed: hand the confirmed call to a worker.
    pub(crate) fn submit(&mut self, ctx: &egui::Context) {
        let Some(wallet) = self.wallet.clone() else {
            self.form.confirmation = None;
            self.form.input_error = Some(MultisendError::InvalidInput(
                "Connect a wallet before sending.".to_string(),
            ));
            return;
        };
        let Some((id, PendingConfirmation { request, call })) = self.begin_confirmed() else {
            return;
        };

        if let Err(e) = operation_log::append_log(
            "Multisend submitted",
            self.config.chain.chain_id,
            call.summary(&request, self.config.native_token()),
        ) {
            warn!("Failed to write operation log: {}", e);
        }

        self.submission_worker = Some(SubmissionWorker::spawn(
            ctx,
            wallet,
            call,
            self.config.chain,
            self.config.receipt_polling,
            id,
        ));
    }

    /// Begin a submission for the call shown in the dialog. Form edits made
    /// after the dialog opened are not picked up.
    pub(crate) fn begin_confirmed(&mut self) -> Option<(SubmissionId, PendingConfirmation)> {
        let confirmation = self.form.confirmation.take()?;
        match self.submission.begin() {
            Ok(id) => Some((id, confirmation)),
            Err(e) => {
                self.form.input_error = Some(e);
                None
            }
        }
    }

    /// Cancelling the confirmation dialog counts as a rejection by the user.
    pub(crate) fn cancel_confirmation(&mut self) {
        self.form.confirmation = None;
        if let Ok(id) = self.submission.begin() {
            let error = MultisendError::UserRejected("User cancelled the transaction".to_string());
            if self.submission.apply(id, SubmissionEvent::Rejected { error }) {
                self.on_phase_changed();
            }
        }
    }

    fn poll_jobs(&mut self, ctx: &egui::Context) {
        if let Some(job) = &mut self.connect.job {
            if let Some(res) = job.poll() {
                self.connect.job = None;
                match res {
                    Ok((wallet, balance)) => {
                        info!("Wallet connected: {:?}", wallet.address());
                        self.notifications.push(format!(
                            "[OK] Connected {}",
                            utils::shorten_hex(&format!("{:?}", wallet.address()))
                        ));
                        self.wallet = Some(wallet);
                        self.wallet_balance = Some(balance);
                        self.connect.private_key.clear();
                    }
                    Err(e) => {
                        warn!("Wallet connection failed: {}", e);
                        self.connect.error = Some(e.to_string());
                    }
                }
            }
        }

        if let Some(job) = &mut self.balance_job {
            if let Some(res) = job.poll() {
                self.balance_job = None;
                match res {
                    Ok(balance) => self.wallet_balance = Some(balance),
                    Err(e) => warn!("Balance refresh failed: {}", e),
                }
            }
        }

        self.poll_submission(ctx);
    }

    fn poll_submission(&mut self, ctx: &egui::Context) {
        let drained = match &self.submission_worker {
            Some(worker) => worker.drain(),
            None => return,
        };
        let (events, finished) = match drained {
            Drained::Events(events) => (events, false),
            Drained::Finished(events) => (events, true),
        };

        for (id, event) in events {
            if self.submission.apply(id, event) {
                self.on_phase_changed();
            }
        }

        if finished {
            self.submission_worker = None;
            // The worker died without reporting an outcome
            if self.submission.is_in_flight() {
                let id = self.submission.id();
                let error = MultisendError::NetworkOrRpcFailure("Worker task disconnected".to_string());
                let event = match self.submission.phase() {
                    SubmissionPhase::Pending { hash } => SubmissionEvent::Failed { hash: *hash, error },
                    _ => SubmissionEvent::Rejected { error },
                };
                if self.submission.apply(id, event) {
                    self.on_phase_changed();
                }
            }
            self.refresh_balance(ctx);
        }
    }

    fn on_phase_changed(&mut self) {
        let symbol = self.config.native_token().to_string();
        if let Some(message) = phase_notification(self.submission.phase(), &symbol) {
            self.notifications.push(message);
        }

        let id = self.submission.id();
        if self.last_logged_id == Some(id) {
            return;
        }
        if let Some(entry) = self.submission.outcome_log_entry(&symbol) {
            self.last_logged_id = Some(id);
            if let Err(e) = operation_log::append_log("Multisend", self.config.chain.chain_id, entry) {
                warn!("Failed to write operation log: {}", e);
            }
        }
    }

    fn render_top_bar(&mut self, ui: &mut egui::Ui) {
        ui.add_space(self.theme.spacing_sm);
        ui.horizontal(|ui| {
            ui.label(
                RichText::new("STT Multisender")
                    .size(20.0)
                    .strong()
                    .color(self.theme.text_heading),
            );
            ui.label(
                RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                    .size(12.0)
                    .color(self.theme.text_secondary),
            );
            ui.add_space(self.theme.spacing_md);

            for (section, label) in [(GuiSection::Send, "Send"), (GuiSection::Settings, "Settings")] {
                if ui.selectable_label(self.section == section, label).clicked() {
                    self.section = section;
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let bell = if self.notifications.is_empty() {
                    "Notifications".to_string()
                } else {
                    format!("Notifications ({})", self.notifications.len())
                };
                if ui.button(bell).clicked() {
                    self.show_notifications_popup = !self.show_notifications_popup;
                }

                ui.label(
                    RichText::new(format!(
                        "{} (chain {})",
                        self.config.network_label(),
                        self.config.chain.chain_id
                    ))
                    .color(self.theme.text_secondary),
                );

                match &self.wallet {
                    Some(wallet) => {
                        let balance = self
                            .wallet_balance
                            .map(|b| format!(" | {} {}", utils::format_ether_compact(b), self.config.native_token()))
                            .unwrap_or_default();
                        ui.label(
                            RichText::new(format!(
                                "● {}{}",
                                utils::shorten_hex(&format!("{:?}", wallet.address())),
                                balance
                            ))
                            .color(self.theme.success_text),
                        );
                    }
                    None => {
                        ui.label(RichText::new("● Not connected").color(self.theme.error_text));
                    }
                }
            });
        });
        ui.add_space(self.theme.spacing_sm);
    }

    fn render_notifications_popup(&mut self, ctx: &egui::Context) {
        let mut open = self.show_notifications_popup;
        let mut clear = false;
        egui::Window::new("Notifications")
            .open(&mut open)
            .collapsible(false)
            .resizable(true)
            .default_width(380.0)
            .show(ctx, |ui| {
                if self.notifications.is_empty() {
                    ui.label(RichText::new("No notifications yet.").color(self.theme.text_secondary));
                    return;
                }
                if ui.small_button("Clear").clicked() {
                    clear = true;
                }
                egui::ScrollArea::vertical().max_height(300.0).show(ui, |ui| {
                    for notification in self.notifications.iter_recent() {
                        ui.horizontal_wrapped(|ui| {
                            ui.label(
                                RichText::new(format!("[{}]", notification.time_ago()))
                                    .size(11.0)
                                    .color(self.theme.text_secondary),
                            );
                            ui.label(RichText::new(&notification.message).size(12.0));
                        });
                    }
                });
            });
        if clear {
            self.notifications.clear();
        }
        self.show_notifications_popup = open;
    }
}

impl App for MultisenderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.poll_jobs(ctx);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            self.render_top_bar(ui);
        });

        if self.show_notifications_popup {
            self.render_notifications_popup(ctx);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(self.theme.content_width);
                    ui.add_space(self.theme.spacing_lg);
                    match self.section {
                        GuiSection::Send => self.view_send(ui),
                        GuiSection::Settings => self.view_settings(ui),
                    }
                    ui.add_space(self.theme.spacing_lg);
                });
            });
        });

        self.render_confirmation(ctx);

        // Keep spinners moving while work is outstanding
        if self.submission.is_in_flight() || self.connect.job.is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(200));
        }
    }
}

/// Launch the GUI application
pub fn launch(base_config: Config) -> Result<()> {
    let user_settings = UserSettings::load();

    let mut config = base_config.clone();
    if let Err(e) = config.apply_settings(&user_settings) {
        warn!("Ignoring invalid saved settings: {}", e);
        config = base_config.clone();
    }
    info!(
        "Using {} via {} with multisender {:?}",
        config.network_label(),
        config.rpc_url,
        config.multisender_address
    );

    let app_creator = move |cc: &eframe::CreationContext<'_>| {
        Box::new(MultisenderApp::new(
            base_config.clone(),
            config.clone(),
            user_settings.clone(),
            &cc.egui_ctx,
        )) as Box<dyn App>
    };

    let native_options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 820.0])
            .with_min_inner_size([520.0, 480.0]),
        persist_window: true,
        ..Default::default()
    };

    eframe::run_native("STT Multisender", native_options, Box::new(app_creator))
        .map_err(|e| anyhow!("Failed to start GUI: {}", e))
}
