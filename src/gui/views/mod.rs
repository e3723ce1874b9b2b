//! View modules for the GUI
//!
//! Each submodule adds `view_*` methods on `MultisenderApp` that take
//! `&mut egui::Ui`; they are called from `App::update` in `app.rs`.
//!
//! - `send` - recipient form, confirmation, submission status, decoded transfers
//! - `connect` - wallet connection and connected-wallet summary
//! - `settings` - RPC, contract, and receipt polling overrides

pub mod connect;
pub mod send;
pub mod settings;
