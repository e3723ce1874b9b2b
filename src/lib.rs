//! Send an equal amount of a chain's native token to many addresses through a
//! multisender contract, in a single transaction.
//!
//! The flow is validate -> compose -> submit -> wait for receipt -> decode
//! transfer events. Everything up to composing the call is pure; the wallet
//! and RPC sit behind [`wallet::WalletProvider`].

pub mod config;
pub mod error;
pub mod gui;
pub mod multisend;
pub mod operation_log;
pub mod receipt;
pub mod submission;
pub mod user_settings;
pub mod utils;
pub mod validator;
pub mod wallet;

pub use error::MultisendError;
