//! Recipient list and amount validation.
//!
//! Validation is purely syntactic: nothing here touches the network, so a
//! rejected form never results in an RPC call.

use crate::error::MultisendError;
use crate::utils;
use anyhow::{anyhow, Result};
use ethers::types::{Address, U256};
use std::path::Path;

/// One non-empty line of the recipients text box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientEntry {
    /// 1-based line number in the original text
    pub line: usize,
    pub address: String,
    pub is_valid: bool,
}

/// Input that passed validation and can be handed to the composer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInput {
    pub recipients: Vec<Address>,
    pub amount_per_recipient_wei: U256,
}

/// `0x` followed by 40 hex digits. Mixed-case input must be EIP-55 checksummed.
pub fn is_valid_address(candidate: &str) -> bool {
    let Some(body) = candidate.strip_prefix("0x") else {
        return false;
    };
    if body.len() != 40 || !body.chars().all(|c| c.is_ascii_hexdigit()) {
        return false;
    }

    let has_lower = body.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = body.chars().any(|c| c.is_ascii_uppercase());
    if !(has_lower && has_upper) {
        return true;
    }

    match candidate.parse::<Address>() {
        Ok(address) => ethers::utils::to_checksum(&address, None) == candidate,
        Err(_) => false,
    }
}

/// Classify every non-empty, trimmed line of the recipients text.
pub fn parse_recipient_entries(text: &str) -> Vec<RecipientEntry> {
    text.lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return None;
            }
            Some(RecipientEntry {
                line: idx + 1,
                address: trimmed.to_string(),
                is_valid: is_valid_address(trimmed),
            })
        })
        .collect()
}

/// Valid addresses in input order. Duplicates are kept.
pub fn valid_addresses(text: &str) -> Vec<Address> {
    parse_recipient_entries(text)
        .into_iter()
        .filter(|entry| entry.is_valid)
        .filter_map(|entry| entry.address.parse::<Address>().ok())
        .collect()
}

/// Parse the per-recipient amount. Must be a plain positive decimal.
pub fn parse_amount(amount: &str) -> Result<U256, MultisendError> {
    if amount.trim().is_empty() {
        return Err(MultisendError::InvalidInput(
            "Please enter a valid amount per recipient.".to_string(),
        ));
    }
    let wei = utils::parse_eth_str_to_wei(amount)
        .map_err(|e| MultisendError::InvalidInput(e.to_string()))?;
    if wei.is_zero() {
        return Err(MultisendError::InvalidInput(
            "Amount per recipient must be greater than 0.".to_string(),
        ));
    }
    Ok(wei)
}

/// Validate the whole form.
pub fn validate(recipients_text: &str, amount: &str) -> Result<ValidatedInput, MultisendError> {
    let recipients = valid_addresses(recipients_text);
    if recipients.is_empty() {
        return Err(MultisendError::InvalidInput(
            "Please enter at least one valid recipient address.".to_string(),
        ));
    }
    let amount_per_recipient_wei = parse_amount(amount)?;
    Ok(ValidatedInput {
        recipients,
        amount_per_recipient_wei,
    })
}

/// Read a recipients file (CSV or one address per line) into text-box form.
///
/// Only the first column of each record is kept. A leading `address` header
/// is dropped; everything else is passed through so the validator reports
/// bad lines the same way it does for pasted text.
pub fn load_recipients_file(path: &Path) -> Result<String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| anyhow!("Failed to open {}: {}", path.display(), e))?;

    let mut lines = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| anyhow!("CSV parsing error at line {}: {}", idx + 1, e))?;
        let first = record.get(0).unwrap_or("").trim_matches('"').trim();
        if first.is_empty() {
            continue;
        }
        if idx == 0 && first.eq_ignore_ascii_case("address") {
            continue;
        }
        lines.push(first.to_string());
    }

    let invalid = lines.iter().filter(|l| !is_valid_address(l)).count();
    if invalid > 0 {
        tracing::warn!("{} invalid addresses in {}", invalid, path.display());
    }
    Ok(lines.join("\n"))
}
