//! GUI module for the multisender
//!
//! This module provides the graphical user interface built with egui/eframe.
//!
//! ## Module Structure
//!
//! - `app` - MultisenderApp struct, state types, and the frame loop
//! - `worker` - background threads for wallet calls and submissions
//! - `theme` - light theme and styling helpers (AppTheme)
//! - `notifications` - notification history
//! - `views` - view rendering (send, connect, settings)
//!
//! ## Usage
//!
//! ```no_run
//! use stt_multisender::config::{Config, SOMNIA_TESTNET};
//! use stt_multisender::gui;
//!
//! let config = Config::from_env(SOMNIA_TESTNET).expect("invalid environment");
//! gui::launch(config).expect("Failed to launch GUI");
//! ```

mod app;
pub mod notifications;
pub mod theme;
pub mod views;
pub mod worker;

pub use app::{launch, GuiSection, MultisenderApp};
pub use notifications::{NotificationEntry, Notifications};
pub use theme::{configure_style, AppTheme};
pub use worker::{AsyncJob, SubmissionWorker};
