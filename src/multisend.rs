//! Multisend transaction composition.
//! Encodes `send(address[])` on the multisender contract with the total value attached.

use crate::config::ChainConfig;
use crate::error::MultisendError;
use crate::utils;
use crate::validator::ValidatedInput;
use ethers::abi::{Function, Param, ParamType, StateMutability, Token};
use ethers::prelude::*;
use ethers::types::transaction::eip2718::TypedTransaction;

/// Function selector for send(address[])
/// keccak256("send(address[])") = 0x298c0733...
pub const SEND_SELECTOR: [u8; 4] = [0x29, 0x8c, 0x07, 0x33];

/// Multisender entry point: `function send(address[] calldata recipients) external payable`.
/// The contract splits `msg.value` equally across `recipients`.
#[allow(deprecated)]
pub fn multisend_function() -> Function {
    Function {
        name: "send".to_string(),
        inputs: vec![Param {
            name: "recipients".to_string(),
            kind: ParamType::Array(Box::new(ParamType::Address)),
            internal_type: None,
        }],
        outputs: vec![],
        constant: None,
        state_mutability: StateMutability::Payable,
    }
}

/// Equal-split transfer to an ordered recipient list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub recipients: Vec<Address>,
    pub amount_per_recipient_wei: U256,
    /// Always `amount_per_recipient_wei * recipients.len()`
    pub total_value_wei: U256,
}

impl TransferRequest {
    pub fn new(recipients: Vec<Address>, amount_per_recipient_wei: U256) -> Result<Self, MultisendError> {
        if recipients.is_empty() {
            return Err(MultisendError::InvalidInput("No recipients specified".to_string()));
        }
        if amount_per_recipient_wei.is_zero() {
            return Err(MultisendError::InvalidInput(
                "Amount per recipient must be greater than 0.".to_string(),
            ));
        }
        let total_value_wei = amount_per_recipient_wei
            .checked_mul(U256::from(recipients.len()))
            .ok_or_else(|| {
                MultisendError::InvalidInput("Total value overflows a 256-bit integer".to_string())
            })?;

        Ok(Self {
            recipients,
            amount_per_recipient_wei,
            total_value_wei,
        })
    }

    pub fn recipient_count(&self) -> usize {
        self.recipients.len()
    }
}

impl TryFrom<ValidatedInput> for TransferRequest {
    type Error = MultisendError;

    fn try_from(input: ValidatedInput) -> Result<Self, Self::Error> {
        Self::new(input.recipients, input.amount_per_recipient_wei)
    }
}

/// A fully encoded call to the multisender contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultisendCall {
    pub contract: Address,
    pub calldata: Bytes,
    pub value: U256,
    pub recipient_count: usize,
}

impl MultisendCall {
    /// Build the unsigned transaction. Gas, nonce, and fees are filled by the wallet.
    pub fn to_transaction(&self, from: Address, chain: &ChainConfig) -> TypedTransaction {
        if chain.supports_eip1559 {
            let tx = Eip1559TransactionRequest::new()
                .from(from)
                .to(self.contract)
                .value(self.value)
                .data(self.calldata.clone())
                .chain_id(chain.chain_id);
            TypedTransaction::Eip1559(tx)
        } else {
            let tx = TransactionRequest::new()
                .from(from)
                .to(self.contract)
                .value(self.value)
                .data(self.calldata.clone())
                .chain_id(chain.chain_id);
            TypedTransaction::Legacy(tx)
        }
    }

    /// Multi-line summary for the operation log.
    pub fn summary(&self, request: &TransferRequest, symbol: &str) -> String {
        let recipients = request
            .recipients
            .iter()
            .enumerate()
            .map(|(i, address)| format!("{}. {:?}", i + 1, address))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "Multisender contract: {:?}\nRecipients: {}\n{}\nAmount per recipient: {} {}\nTotal value: {} {}",
            self.contract,
            self.recipient_count,
            recipients,
            utils::format_ether_compact(request.amount_per_recipient_wei),
            symbol,
            utils::format_ether_compact(self.value),
            symbol,
        )
    }
}

/// Encode the multisend call for `request` against `contract`.
pub fn compose(contract: Address, request: &TransferRequest) -> Result<MultisendCall, MultisendError> {
    let func = multisend_function();
    let recipient_tokens: Vec<Token> = request.recipients.iter().map(|a| Token::Address(*a)).collect();
    let calldata = func
        .encode_input(&[Token::Array(recipient_tokens)])
        .map_err(|e| MultisendError::InvalidInput(format!("Failed to encode call: {}", e)))?;

    tracing::info!(
        "Composed multisend: contract={:?}, recipients={}, value={} wei",
        contract,
        request.recipient_count(),
        request.total_value_wei
    );
    tracing::debug!("Multisend calldata: 0x{}", hex::encode(&calldata));

    Ok(MultisendCall {
        contract,
        calldata: calldata.into(),
        value: request.total_value_wei,
        recipient_count: request.recipient_count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SOMNIA_TESTNET;
    use crate::validator;

    fn addr(last: u8) -> Address {
        let mut bytes = [0xaa; 20];
        bytes[19] = last;
        Address::from(bytes)
    }

    fn eth(n: u64) -> U256 {
        U256::from(n) * U256::exp10(18)
    }

    #[test]
    fn test_selector_matches_function() {
        assert_eq!(multisend_function().short_signature(), SEND_SELECTOR);
        assert_eq!(multisend_function().signature(), "send(address[])");
    }

    #[test]
    fn test_transfer_request_total() {
        let half = eth(1) / 2;
        let request = TransferRequest::new(vec![addr(1), addr(2)], half).unwrap();
        assert_eq!(request.total_value_wei, eth(1));
        assert_eq!(request.total_value_wei / U256::from(request.recipient_count()), half);
    }

    #[test]
    fn test_transfer_request_total_is_exact_for_odd_amounts() {
        let amount = validator::parse_amount("0.123456789012345678").unwrap();
        for n in [1usize, 3, 7, 250, 1000] {
            let request = TransferRequest::new(vec![addr(1); n], amount).unwrap();
            assert_eq!(request.total_value_wei, amount * U256::from(n));
            assert_eq!(request.total_value_wei / U256::from(n), amount);
        }
    }

    #[test]
    fn test_transfer_request_rejects_empty_and_zero() {
        assert!(matches!(
            TransferRequest::new(vec![], eth(1)),
            Err(MultisendError::InvalidInput(_))
        ));
        assert!(matches!(
            TransferRequest::new(vec![addr(1)], U256::zero()),
            Err(MultisendError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_transfer_request_overflow() {
        let err = TransferRequest::new(vec![addr(1), addr(2)], U256::MAX).unwrap_err();
        assert!(err.to_string().contains("overflows"));
    }

    #[test]
    fn test_compose_encodes_recipients_and_value() {
        let contract: Address = crate::config::DEFAULT_MULTISENDER_ADDRESS.parse().unwrap();
        let request = TransferRequest::new(vec![addr(1), addr(2)], eth(1) / 2).unwrap();
        let call = compose(contract, &request).unwrap();

        assert_eq!(call.contract, contract);
        assert_eq!(call.value, eth(1));
        assert_eq!(call.recipient_count, 2);
        assert_eq!(&call.calldata[..4], &SEND_SELECTOR);

        let decoded = multisend_function().decode_input(&call.calldata[4..]).unwrap();
        assert_eq!(
            decoded,
            vec![Token::Array(vec![Token::Address(addr(1)), Token::Address(addr(2))])]
        );
    }

    #[test]
    fn test_compose_keeps_duplicates_in_order() {
        let request = TransferRequest::new(vec![addr(2), addr(1), addr(2)], eth(1)).unwrap();
        let call = compose(Address::zero(), &request).unwrap();
        let decoded = multisend_function().decode_input(&call.calldata[4..]).unwrap();
        assert_eq!(
            decoded,
            vec![Token::Array(vec![
                Token::Address(addr(2)),
                Token::Address(addr(1)),
                Token::Address(addr(2)),
            ])]
        );
        assert_eq!(call.value, eth(3));
    }

    #[test]
    fn test_to_transaction_legacy_for_somnia() {
        let request = TransferRequest::new(vec![addr(1)], eth(1)).unwrap();
        let call = compose(addr(9), &request).unwrap();
        let tx = call.to_transaction(addr(7), &SOMNIA_TESTNET);

        assert!(matches!(tx, TypedTransaction::Legacy(_)));
        assert_eq!(tx.from(), Some(&addr(7)));
        assert_eq!(tx.to_addr(), Some(&addr(9)));
        assert_eq!(tx.value(), Some(&eth(1)));
        assert_eq!(tx.data(), Some(&call.calldata));
        assert_eq!(tx.chain_id(), Some(U64::from(50312u64)));
    }

    #[test]
    fn test_to_transaction_eip1559() {
        let mut chain = SOMNIA_TESTNET;
        chain.supports_eip1559 = true;
        let request = TransferRequest::new(vec![addr(1)], eth(1)).unwrap();
        let call = compose(addr(9), &request).unwrap();
        assert!(matches!(call.to_transaction(addr(7), &chain), TypedTransaction::Eip1559(_)));
    }

    #[test]
    fn test_summary_lists_recipients() {
        let request = TransferRequest::new(vec![addr(1), addr(2)], eth(1) / 2).unwrap();
        let call = compose(addr(9), &request).unwrap();
        let summary = call.summary(&request, "STT");
        assert!(summary.contains("Recipients: 2"));
        assert!(summary.contains("Amount per recipient: 0.5 STT"));
        assert!(summary.contains("Total value: 1 STT"));
        assert!(summary.contains("2. "));
    }
}
