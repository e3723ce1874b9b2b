use crate::config::{ReceiptPolling, DEFAULT_RECEIPT_POLL_INTERVAL_MS, DEFAULT_RECEIPT_TIMEOUT_SECS};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

const SETTINGS_FILE: &str = "settings.json";

/// Application data directory name under the platform config dir
pub const APP_DIR_NAME: &str = "stt-multisender";

/// Smallest accepted poll interval; anything lower hammers public RPCs
const MIN_POLL_INTERVAL_MS: u64 = 100;

/// Directory where settings and the operation log live.
pub fn app_data_dir() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        let app_dir = config_dir.join(APP_DIR_NAME);
        if !app_dir.exists() {
            let _ = fs::create_dir_all(&app_dir);
        }
        app_dir
    } else {
        PathBuf::from(".")
    }
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_RECEIPT_POLL_INTERVAL_MS
}

fn default_timeout_secs() -> u64 {
    DEFAULT_RECEIPT_TIMEOUT_SECS
}

/// User settings that persist between sessions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSettings {
    /// RPC endpoint replacing the chain default
    #[serde(default)]
    pub rpc_url_override: Option<String>,
    /// Multisender contract replacing the built-in deployment
    #[serde(default)]
    pub multisender_address_override: Option<String>,
    #[serde(default = "default_poll_interval_ms")]
    pub receipt_poll_interval_ms: u64,
    #[serde(default = "default_timeout_secs")]
    pub receipt_timeout_secs: u64,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            rpc_url_override: None,
            multisender_address_override: None,
            receipt_poll_interval_ms: default_poll_interval_ms(),
            receipt_timeout_secs: default_timeout_secs(),
        }
    }
}

impl UserSettings {
    fn settings_path() -> PathBuf {
        app_data_dir().join(SETTINGS_FILE)
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let path = Self::settings_path();
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match Self::from_json(&content) {
                    Ok(settings) => {
                        tracing::info!("Loaded settings from {:?}", path);
                        return settings;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse settings file: {}", e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read settings file: {}", e);
                }
            }
        }
        tracing::info!("Using default settings");
        Self::default()
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::settings_path();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;
        tracing::info!("Saved settings to {:?}", path);
        Ok(())
    }

    pub fn settings_path_display() -> String {
        Self::settings_path().display().to_string()
    }

    /// Set the RPC override (blank clears it)
    pub fn set_rpc_url_override(&mut self, rpc: &str) {
        self.rpc_url_override = non_blank(rpc);
    }

    /// Set the contract override (blank clears it)
    pub fn set_multisender_address_override(&mut self, address: &str) {
        self.multisender_address_override = non_blank(address);
    }

    pub fn receipt_polling(&self) -> ReceiptPolling {
        ReceiptPolling {
            interval: Duration::from_millis(self.receipt_poll_interval_ms.max(MIN_POLL_INTERVAL_MS)),
            timeout: Duration::from_secs(self.receipt_timeout_secs.max(1)),
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_settings_default_values() {
        let settings = UserSettings::default();
        assert!(settings.rpc_url_override.is_none());
        assert!(settings.multisender_address_override.is_none());
        assert_eq!(settings.receipt_poll_interval_ms, 500);
        assert_eq!(settings.receipt_timeout_secs, 120);
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let settings = UserSettings::from_json(r#"{"rpc_url_override":"https://a.example"}"#).unwrap();
        assert_eq!(settings.rpc_url_override.as_deref(), Some("https://a.example"));
        assert_eq!(settings.receipt_poll_interval_ms, 500);
        assert_eq!(settings.receipt_timeout_secs, 120);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(UserSettings::from_json("{not json").is_err());
    }

    #[test]
    fn test_json_round_trip_preserves_overrides() {
        let mut settings = UserSettings::default();
        settings.set_rpc_url_override("https://rpc.example");
        settings.set_multisender_address_override("0x1111111111111111111111111111111111111111");
        let json = serde_json::to_string_pretty(&settings).unwrap();
        assert_eq!(UserSettings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_set_overrides_trim_and_clear() {
        let mut settings = UserSettings::default();
        settings.set_rpc_url_override("  https://rpc.example  ");
        assert_eq!(settings.rpc_url_override.as_deref(), Some("https://rpc.example"));
        settings.set_rpc_url_override("   ");
        assert!(settings.rpc_url_override.is_none());

        settings.set_multisender_address_override("");
        assert!(settings.multisender_address_override.is_none());
    }

    #[test]
    fn test_receipt_polling_clamps() {
        let mut settings = UserSettings::default();
        settings.receipt_poll_interval_ms = 0;
        settings.receipt_timeout_secs = 0;
        let polling = settings.receipt_polling();
        assert_eq!(polling.interval, Duration::from_millis(100));
        assert_eq!(polling.timeout, Duration::from_secs(1));
    }
}
