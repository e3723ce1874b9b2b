#![windows_subsystem = "windows"]

use anyhow::Result;
use stt_multisender::{
    config::{Config, SOMNIA_TESTNET},
    gui,
};

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    // Environment overrides only; the GUI layers saved user settings on top
    let config = Config::from_env(SOMNIA_TESTNET)?;
    gui::launch(config)?;

    Ok(())
}
