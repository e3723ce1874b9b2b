use crate::user_settings::app_data_dir;
use anyhow::Result;
use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const OPERATION_LOG_FILE: &str = "operation_log.txt";

fn log_path() -> PathBuf {
    app_data_dir().join(OPERATION_LOG_FILE)
}

/// Full path of the operation log, for display
pub fn log_file_path() -> String {
    log_path().display().to_string()
}

/// Append an entry for a submission outcome to the operation log.
pub fn append_log(operation: &str, chain_id: u64, details: impl AsRef<str>) -> Result<()> {
    append_log_to(&log_path(), operation, chain_id, details.as_ref())
}

fn append_log_to(path: &Path, operation: &str, chain_id: u64, body: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let timestamp = Utc::now().to_rfc3339();
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;

    writeln!(file, "[{}] chain_id={} operation={}", timestamp, chain_id, operation)?;
    if body.trim().is_empty() {
        writeln!(file, "  (no additional details)")?;
    } else {
        for line in body.lines() {
            if line.trim().is_empty() {
                writeln!(file)?;
            } else {
                writeln!(file, "  {}", line)?;
            }
        }
    }
    writeln!(file)?;
    Ok(())
}
