use ethers::types::U256;
use anyhow::{anyhow, Result};

/// Decimals of the native token on every supported chain.
pub const NATIVE_DECIMALS: usize = 18;

/// Full 18-decimal rendering, e.g. `0.500000000000000000`.
pub fn format_ether(wei: U256) -> String {
    ethers::utils::format_units(wei, "ether").unwrap_or_else(|_| "0.0".to_string())
}

/// Compact rendering with trailing zeros removed, e.g. `0.5` or `1`.
pub fn format_ether_compact(wei: U256) -> String {
    let full = format_ether(wei);
    match full.split_once('.') {
        Some((int, frac)) => {
            let frac = frac.trim_end_matches('0');
            if frac.is_empty() {
                int.to_string()
            } else {
                format!("{}.{}", int, frac)
            }
        }
        None => full,
    }
}

/// Parse a plain decimal string (`1`, `0.5`, `.25`) into wei.
///
/// Signs, exponents, and more than 18 fractional digits are refused instead of
/// being rounded, so the result is always exact.
pub fn parse_eth_str_to_wei(input: &str) -> Result<U256> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("Amount cannot be empty"));
    }

    let (int_part, frac_part) = match trimmed.split_once('.') {
        Some((int, frac)) => (int, frac),
        None => (trimmed, ""),
    };
    let is_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (int_part.is_empty() && frac_part.is_empty()) || !is_digits(int_part) || !is_digits(frac_part) {
        return Err(anyhow!("Invalid amount '{}': expected a plain decimal number", trimmed));
    }
    if frac_part.len() > NATIVE_DECIMALS {
        return Err(anyhow!(
            "Invalid amount '{}': at most {} decimal places are supported",
            trimmed,
            NATIVE_DECIMALS
        ));
    }

    let int_part = if int_part.is_empty() { "0" } else { int_part };
    let normalized = if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{}.{}", int_part, frac_part)
    };
    ethers::utils::parse_ether(&normalized)
        .map_err(|e| anyhow!("Invalid amount '{}': {}", trimmed, e))
}

/// Shorten an address or hash for compact display: `0x1234…abcd`.
pub fn shorten_hex(value: &str) -> String {
    if value.len() <= 14 {
        return value.to_string();
    }
    format!("{}…{}", &value[..6], &value[value.len() - 4..])
}
