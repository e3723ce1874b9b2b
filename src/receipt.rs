//! Decoding of per-recipient transfer events from a multisend receipt.
//!
//! A receipt can carry logs emitted by other contracts in the same
//! transaction. Anything that is not a well-formed `IndividualTransfer` is
//! skipped without error.

use crate::utils;
use ethers::abi::{Event, EventParam, ParamType, RawLog, Token};
use ethers::types::{Address, Log, TransactionReceipt, H256, U256};
use std::sync::OnceLock;

static INDIVIDUAL_TRANSFER: OnceLock<Event> = OnceLock::new();

/// `event IndividualTransfer(address indexed to, uint256 amount)`
pub fn individual_transfer_event() -> &'static Event {
    INDIVIDUAL_TRANSFER.get_or_init(|| Event {
        name: "IndividualTransfer".to_string(),
        inputs: vec![
            EventParam {
                name: "to".to_string(),
                kind: ParamType::Address,
                indexed: true,
            },
            EventParam {
                name: "amount".to_string(),
                kind: ParamType::Uint(256),
                indexed: false,
            },
        ],
        anonymous: false,
    })
}

/// topic0 of `IndividualTransfer(address,uint256)`
pub fn individual_transfer_topic() -> H256 {
    individual_transfer_event().signature()
}

/// One transfer performed by the multisender, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedTransfer {
    pub recipient: Address,
    pub amount_wei: U256,
}

impl DecodedTransfer {
    /// Human-readable amount, e.g. `0.5`.
    pub fn display_amount(&self) -> String {
        utils::format_ether_compact(self.amount_wei)
    }
}

/// Decode a single log. `None` for anything that is not an `IndividualTransfer`.
pub fn decode_transfer_log(log: &Log) -> Option<DecodedTransfer> {
    let raw = RawLog {
        topics: log.topics.clone(),
        data: log.data.to_vec(),
    };
    let parsed = individual_transfer_event().parse_log(raw).ok()?;

    let mut recipient = None;
    let mut amount_wei = None;
    for param in parsed.params {
        match (param.name.as_str(), param.value) {
            ("to", Token::Address(address)) => recipient = Some(address),
            ("amount", Token::Uint(amount)) => amount_wei = Some(amount),
            _ => {}
        }
    }

    Some(DecodedTransfer {
        recipient: recipient?,
        amount_wei: amount_wei?,
    })
}

/// Decode every matching log, preserving log order.
pub fn decode_transfers(logs: &[Log]) -> Vec<DecodedTransfer> {
    let transfers: Vec<DecodedTransfer> = logs.iter().filter_map(decode_transfer_log).collect();
    if transfers.len() != logs.len() {
        tracing::debug!(
            "Skipped {} non-transfer logs out of {}",
            logs.len() - transfers.len(),
            logs.len()
        );
    }
    transfers
}

/// Decode the transfers of a mined receipt.
pub fn decode_receipt(receipt: &TransactionReceipt) -> Vec<DecodedTransfer> {
    decode_transfers(&receipt.logs)
}

/// Sum of decoded amounts. Saturates instead of wrapping on absurd inputs.
pub fn total_transferred(transfers: &[DecodedTransfer]) -> U256 {
    transfers
        .iter()
        .fold(U256::zero(), |acc, t| acc.saturating_add(t.amount_wei))
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use ethers::types::Bytes;

    pub fn address_topic(address: Address) -> H256 {
        H256::from(address)
    }

    pub fn amount_data(amount: U256) -> Bytes {
        let mut word = [0u8; 32];
        amount.to_big_endian(&mut word);
        Bytes::from(word.to_vec())
    }

    pub fn transfer_log(emitter: Address, to: Address, amount: U256) -> Log {
        Log {
            address: emitter,
            topics: vec![individual_transfer_topic(), address_topic(to)],
            data: amount_data(amount),
            ..Default::default()
        }
    }
}
