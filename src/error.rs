//! Error taxonomy for a multisend submission.
//!
//! Every failure a user can hit between pressing "Send" and seeing the
//! decoded transfers maps onto one of these variants. Logs that fail to
//! decode are not errors and never show up here.

use ethers::abi::{self, ParamType, Token};
use thiserror::Error;

/// Selector of the standard `Error(string)` revert payload.
const REVERT_STRING_SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0];

/// EIP-1193 "user rejected request" code, forwarded by most wallet RPCs.
const USER_REJECTED_CODE: i64 = 4001;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MultisendError {
    /// Bad address list or amount. Raised before any network call.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The signer declined (or the user cancelled before signing).
    #[error("Request rejected: {0}")]
    UserRejected(String),

    /// The account cannot cover value plus gas.
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),

    /// Broadcast or receipt polling failed at the transport/RPC layer.
    #[error("Network or RPC failure: {0}")]
    NetworkOrRpcFailure(String),

    /// The contract call reverted, either at estimation time or on chain.
    #[error("Contract reverted: {message}")]
    ContractRevert {
        reason: Option<String>,
        message: String,
    },
}

impl MultisendError {
    /// One-line summary suitable for the error box headline.
    pub fn short_message(&self) -> String {
        match self {
            MultisendError::InvalidInput(msg) => msg.clone(),
            MultisendError::UserRejected(_) => "User rejected the request.".to_string(),
            MultisendError::InsufficientFunds(_) => {
                "The account has insufficient funds for value + gas.".to_string()
            }
            MultisendError::NetworkOrRpcFailure(_) => "Network or RPC request failed.".to_string(),
            MultisendError::ContractRevert { reason: Some(reason), .. } => {
                format!("Execution reverted: {}", reason)
            }
            MultisendError::ContractRevert { reason: None, .. } => {
                "Execution reverted for an unknown reason.".to_string()
            }
        }
    }

    /// Whether the failure happened before anything reached the network.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            MultisendError::InvalidInput(_) | MultisendError::UserRejected(_)
        )
    }
}

/// Classify a failed wallet/RPC call.
///
/// `code` and `revert_data` come from the JSON-RPC error object when the node
/// returned one; `message` is the full error text.
pub fn classify_rpc_error(
    message: &str,
    code: Option<i64>,
    revert_data: Option<&[u8]>,
) -> MultisendError {
    let lower = message.to_lowercase();

    if code == Some(USER_REJECTED_CODE)
        || lower.contains("user rejected")
        || lower.contains("user denied")
    {
        return MultisendError::UserRejected(message.to_string());
    }

    if lower.contains("insufficient funds") || lower.contains("insufficient balance") {
        return MultisendError::InsufficientFunds(message.to_string());
    }

    if revert_data.is_some() || lower.contains("execution reverted") || lower.contains("revert") {
        let reason = revert_data
            .and_then(decode_revert_reason)
            .or_else(|| reason_from_message(message));
        let message = match revert_data {
            // Custom errors stay opaque; keep the raw payload for the user
            Some(data) if reason.is_none() && !data.is_empty() => {
                format!("{} (revert data: 0x{})", message, hex::encode(data))
            }
            _ => message.to_string(),
        };
        return MultisendError::ContractRevert { reason, message };
    }

    MultisendError::NetworkOrRpcFailure(message.to_string())
}

/// Decode an `Error(string)` revert payload. Custom errors and panics yield `None`.
pub fn decode_revert_reason(data: &[u8]) -> Option<String> {
    if data.len() < 4 || data[..4] != REVERT_STRING_SELECTOR {
        return None;
    }
    match abi::decode(&[ParamType::String], &data[4..]) {
        Ok(tokens) => match tokens.into_iter().next() {
            Some(Token::String(reason)) if !reason.is_empty() => Some(reason),
            _ => None,
        },
        Err(_) => None,
    }
}

// Nodes usually format reverts as "execution reverted: <reason>".
// ASCII lowercasing keeps byte offsets aligned with `message`.
fn reason_from_message(message: &str) -> Option<String> {
    let lower = message.to_ascii_lowercase();
    let idx = lower.find("execution reverted:")?;
    let reason = message[idx + "execution reverted:".len()..].trim();
    if reason.is_empty() {
        None
    } else {
        Some(reason.to_string())
    }
}
