//! Submission lifecycle: an explicit state machine fed by events, plus the
//! async driver that produces those events.
//!
//! ```text
//! Idle -> Submitting -> Pending  -> Confirmed
//!                    |           -> Failed
//!                    -> Rejected
//! ```
//!
//! The driver runs off the UI thread and only ever talks to the UI through
//! [`SubmissionEvent`]s. Events carry the id of the submission that produced
//! them, and receipt events also carry the transaction hash, so a late event
//! from an earlier submission can never overwrite the current one.

use crate::config::{ChainConfig, Config, ReceiptPolling};
use crate::error::MultisendError;
use crate::multisend::{self, MultisendCall, TransferRequest};
use crate::receipt::{self, DecodedTransfer};
use crate::utils;
use crate::validator;
use crate::wallet::WalletProvider;
use ethers::types::{TransactionReceipt, TxHash, U64};
use tokio::time::{sleep, Instant};
use tracing::{info, warn};

/// Monotonic id of a submission within a session.
pub type SubmissionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStatus {
    Pending,
    Confirmed,
    Failed,
}

/// A broadcast transaction. Its status moves out of `Pending` exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedTransaction {
    pub hash: TxHash,
    pub status: TxStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Submitting,
    Pending {
        hash: TxHash,
    },
    Rejected {
        error: MultisendError,
    },
    Confirmed {
        hash: TxHash,
        block_number: Option<u64>,
        transfers: Vec<DecodedTransfer>,
    },
    Failed {
        hash: TxHash,
        error: MultisendError,
    },
}

#[derive(Debug, Clone)]
pub enum SubmissionEvent {
    /// The wallet signed and the node accepted the transaction
    Submitted { hash: TxHash },
    /// Nothing was broadcast
    Rejected { error: MultisendError },
    /// Receipt found
    Mined { hash: TxHash, receipt: Box<TransactionReceipt> },
    /// Waiting for the receipt failed
    Failed { hash: TxHash, error: MultisendError },
}

/// State of the (single) submission shown in the UI.
#[derive(Debug, Clone)]
pub struct Submission {
    id: SubmissionId,
    phase: SubmissionPhase,
    transaction: Option<SubmittedTransaction>,
}

impl Default for Submission {
    fn default() -> Self {
        Self {
            id: 0,
            phase: SubmissionPhase::Idle,
            transaction: None,
        }
    }
}

impl Submission {
    pub fn phase(&self) -> &SubmissionPhase {
        &self.phase
    }

    pub fn id(&self) -> SubmissionId {
        self.id
    }

    pub fn transaction(&self) -> Option<&SubmittedTransaction> {
        self.transaction.as_ref()
    }

    /// Submitting or waiting for the receipt.
    pub fn is_in_flight(&self) -> bool {
        matches!(self.phase, SubmissionPhase::Submitting | SubmissionPhase::Pending { .. })
    }

    pub fn can_submit(&self) -> bool {
        !self.is_in_flight()
    }

    /// Decoded transfers of the last confirmed submission.
    pub fn transfers(&self) -> &[DecodedTransfer] {
        match &self.phase {
            SubmissionPhase::Confirmed { transfers, .. } => transfers,
            _ => &[],
        }
    }

    /// Error of the last submission, if it ended in one.
    pub fn error(&self) -> Option<&MultisendError> {
        match &self.phase {
            SubmissionPhase::Rejected { error } | SubmissionPhase::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Drop the last finished result and go back to `Idle`. No-op while in flight.
    pub fn clear_result(&mut self) -> bool {
        if self.is_in_flight() {
            return false;
        }
        self.phase = SubmissionPhase::Idle;
        self.transaction = None;
        true
    }

    /// Start a new submission, clearing whatever the previous one left behind.
    pub fn begin(&mut self) -> Result<SubmissionId, MultisendError> {
        if self.is_in_flight() {
            return Err(MultisendError::InvalidInput(
                "A submission is already in progress.".to_string(),
            ));
        }
        self.id += 1;
        self.phase = SubmissionPhase::Submitting;
        self.transaction = None;
        Ok(self.id)
    }

    /// Validate the form, compose the call, and begin.
    ///
    /// Invalid input leaves the state untouched so nothing is ever sent.
    pub fn start(
        &mut self,
        config: &Config,
        recipients_text: &str,
        amount: &str,
    ) -> Result<(SubmissionId, TransferRequest, MultisendCall), MultisendError> {
        if self.is_in_flight() {
            return Err(MultisendError::InvalidInput(
                "A submission is already in progress.".to_string(),
            ));
        }
        let input = validator::validate(recipients_text, amount)?;
        let request = TransferRequest::try_from(input)?;
        let call = multisend::compose(config.multisender_address, &request)?;
        let id = self.begin()?;
        Ok((id, request, call))
    }

    /// Apply an event. Returns `false` when it was stale or out of order and got ignored.
    pub fn apply(&mut self, id: SubmissionId, event: SubmissionEvent) -> bool {
        if id != self.id {
            warn!("Ignoring event from stale submission {} (current {})", id, self.id);
            return false;
        }

        let submitting = self.phase == SubmissionPhase::Submitting;
        let pending_hash = match &self.phase {
            SubmissionPhase::Pending { hash } => Some(*hash),
            _ => None,
        };

        match event {
            SubmissionEvent::Submitted { hash } if submitting => {
                self.transaction = Some(SubmittedTransaction {
                    hash,
                    status: TxStatus::Pending,
                });
                self.phase = SubmissionPhase::Pending { hash };
                true
            }
            SubmissionEvent::Rejected { error } if submitting => {
                self.phase = SubmissionPhase::Rejected { error };
                true
            }
            SubmissionEvent::Mined { hash, receipt } if pending_hash == Some(hash) => {
                self.finish_with_receipt(hash, &receipt);
                true
            }
            SubmissionEvent::Failed { hash, error } if pending_hash == Some(hash) => {
                self.set_final_status(TxStatus::Failed);
                self.phase = SubmissionPhase::Failed { hash, error };
                true
            }
            other => {
                warn!("Ignoring {} event in phase {}", event_name(&other), phase_name(&self.phase));
                false
            }
        }
    }

    fn finish_with_receipt(&mut self, hash: TxHash, receipt: &TransactionReceipt) {
        if receipt.status == Some(U64::zero()) {
            self.set_final_status(TxStatus::Failed);
            self.phase = SubmissionPhase::Failed {
                hash,
                error: MultisendError::ContractRevert {
                    reason: None,
                    message: format!("Transaction {:?} reverted on chain", hash),
                },
            };
            return;
        }

        let transfers = receipt::decode_receipt(receipt);
        info!("Transaction {:?} confirmed with {} transfers", hash, transfers.len());
        self.set_final_status(TxStatus::Confirmed);
        self.phase = SubmissionPhase::Confirmed {
            hash,
            block_number: receipt.block_number.map(|n| n.as_u64()),
            transfers,
        };
    }

    fn set_final_status(&mut self, status: TxStatus) {
        if let Some(tx) = self.transaction.as_mut() {
            if tx.status == TxStatus::Pending {
                tx.status = status;
            }
        }
    }

    /// Operation log text for a finished submission. `None` while in flight or idle.
    pub fn outcome_log_entry(&self, symbol: &str) -> Option<String> {
        match &self.phase {
            SubmissionPhase::Idle | SubmissionPhase::Submitting | SubmissionPhase::Pending { .. } => None,
            SubmissionPhase::Rejected { error } => Some(format!("Submission rejected\nError: {}", error)),
            SubmissionPhase::Failed { hash, error } => {
                Some(format!("Multisend FAILED\nTx hash: {:?}\nError: {}", hash, error))
            }
            SubmissionPhase::Confirmed {
                hash,
                block_number,
                transfers,
            } => {
                let lines = transfers
                    .iter()
                    .enumerate()
                    .map(|(i, t)| format!("{}. {:?} → {} {}", i + 1, t.recipient, t.display_amount(), symbol))
                    .collect::<Vec<_>>()
                    .join("\n");
                Some(format!(
                    "Multisend confirmed\nTx hash: {:?}\nBlock: {:?}\nInternal transfers: {}\n{}\nTotal transferred: {} {}",
                    hash,
                    block_number,
                    transfers.len(),
                    lines,
                    utils::format_ether_compact(receipt::total_transferred(transfers)),
                    symbol
                ))
            }
        }
    }
}

fn event_name(event: &SubmissionEvent) -> &'static str {
    match event {
        SubmissionEvent::Submitted { .. } => "Submitted",
        SubmissionEvent::Rejected { .. } => "Rejected",
        SubmissionEvent::Mined { .. } => "Mined",
        SubmissionEvent::Failed { .. } => "Failed",
    }
}

fn phase_name(phase: &SubmissionPhase) -> &'static str {
    match phase {
        SubmissionPhase::Idle => "Idle",
        SubmissionPhase::Submitting => "Submitting",
        SubmissionPhase::Pending { .. } => "Pending",
        SubmissionPhase::Rejected { .. } => "Rejected",
        SubmissionPhase::Confirmed { .. } => "Confirmed",
        SubmissionPhase::Failed { .. } => "Failed",
    }
}

/// Poll for the receipt of `hash` until it shows up or `polling.timeout` elapses.
///
/// A failed poll is returned as-is; nothing is retried automatically.
pub async fn wait_for_receipt<W: WalletProvider>(
    wallet: &W,
    hash: TxHash,
    polling: ReceiptPolling,
) -> Result<TransactionReceipt, MultisendError> {
    let started = Instant::now();
    loop {
        if let Some(receipt) = wallet.transaction_receipt(hash).await? {
            return Ok(receipt);
        }
        if started.elapsed() >= polling.timeout {
            return Err(MultisendError::NetworkOrRpcFailure(format!(
                "Timed out after {}s waiting for the receipt of {:?}",
                polling.timeout.as_secs(),
                hash
            )));
        }
        sleep(polling.interval).await;
    }
}

/// Broadcast `call` through `wallet` and follow it to its receipt.
///
/// Emits `Submitted` or `Rejected`, then (after a successful broadcast)
/// exactly one of `Mined` or `Failed`.
pub async fn drive_submission<W, F>(
    wallet: &W,
    call: &MultisendCall,
    chain: &ChainConfig,
    polling: ReceiptPolling,
    mut emit: F,
) where
    W: WalletProvider,
    F: FnMut(SubmissionEvent),
{
    if wallet.chain_id() != chain.chain_id {
        emit(SubmissionEvent::Rejected {
            error: MultisendError::NetworkOrRpcFailure(format!(
                "Wallet is on chain {} but {} ({}) is configured",
                wallet.chain_id(),
                chain.label,
                chain.chain_id
            )),
        });
        return;
    }

    let tx = call.to_transaction(wallet.address(), chain);
    info!(
        "Submitting multisend from {:?}: {} recipients, {} {}",
        wallet.address(),
        call.recipient_count,
        utils::format_ether_compact(call.value),
        chain.currency.symbol
    );

    let hash = match wallet.send_transaction(tx).await {
        Ok(hash) => hash,
        Err(error) => {
            emit(SubmissionEvent::Rejected { error });
            return;
        }
    };
    emit(SubmissionEvent::Submitted { hash });

    match wait_for_receipt(wallet, hash, polling).await {
        Ok(receipt) => emit(SubmissionEvent::Mined {
            hash,
            receipt: Box::new(receipt),
        }),
        Err(error) => emit(SubmissionEvent::Failed { hash, error }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SOMNIA_TESTNET;
    use crate::receipt::test_support::transfer_log;
    use crate::wallet::mock::MockWallet;
    use ethers::types::{Address, Log, U256};
    use std::time::Duration;

    const ADDR_1: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa1";
    const ADDR_2: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa2";

    fn fast_polling() -> ReceiptPolling {
        ReceiptPolling {
            interval: Duration::from_millis(1),
            timeout: Duration::from_millis(50),
        }
    }

    fn hash(byte: u8) -> TxHash {
        TxHash::repeat_byte(byte)
    }

    fn mined(logs: Vec<Log>, status: u64) -> Box<TransactionReceipt> {
        Box::new(TransactionReceipt {
            status: Some(U64::from(status)),
            block_number: Some(U64::from(42u64)),
            logs,
            ..Default::default()
        })
    }

    fn half() -> U256 {
        U256::exp10(18) / 2
    }

    fn two_recipients() -> String {
        format!("{}\n{}", ADDR_1, ADDR_2)
    }

    fn run<W: WalletProvider>(wallet: &W, call: &MultisendCall) -> Vec<SubmissionEvent> {
        let mut events = Vec::new();
        tokio_test::block_on(drive_submission(wallet, call, &SOMNIA_TESTNET, fast_polling(), |e| {
            events.push(e)
        }));
        events
    }

    // ==================== state machine tests ====================

    #[test]
    fn test_default_is_idle() {
        let submission = Submission::default();
        assert_eq!(submission.phase(), &SubmissionPhase::Idle);
        assert!(submission.can_submit());
        assert!(submission.transfers().is_empty());
        assert!(submission.error().is_none());
    }

    #[test]
    fn test_happy_path_transitions() {
        let mut submission = Submission::default();
        let id = submission.begin().unwrap();
        assert_eq!(submission.phase(), &SubmissionPhase::Submitting);
        assert!(!submission.can_submit());

        assert!(submission.apply(id, SubmissionEvent::Submitted { hash: hash(1) }));
        assert_eq!(submission.phase(), &SubmissionPhase::Pending { hash: hash(1) });
        assert_eq!(submission.transaction().unwrap().status, TxStatus::Pending);

        let a1: Address = ADDR_1.parse().unwrap();
        let a2: Address = ADDR_2.parse().unwrap();
        let logs = vec![
            transfer_log(Address::zero(), a1, half()),
            Log::default(),
            transfer_log(Address::zero(), a2, half()),
        ];
        assert!(submission.apply(id, SubmissionEvent::Mined { hash: hash(1), receipt: mined(logs, 1) }));

        assert!(submission.can_submit());
        assert_eq!(submission.transaction().unwrap().status, TxStatus::Confirmed);
        let transfers = submission.transfers();
        assert_eq!(transfers.len(), 2);
        assert_eq!(transfers[0].recipient, a1);
        assert_eq!(receipt::total_transferred(transfers), U256::exp10(18));
        match submission.phase() {
            SubmissionPhase::Confirmed { block_number, .. } => assert_eq!(*block_number, Some(42)),
            other => panic!("unexpected phase {:?}", other),
        }
    }

    #[test]
    fn test_begin_refused_while_in_flight() {
        let mut submission = Submission::default();
        let id = submission.begin().unwrap();
        assert!(submission.begin().is_err());
        submission.apply(id, SubmissionEvent::Submitted { hash: hash(1) });
        assert!(submission.begin().is_err());
        assert_eq!(submission.id(), id);
    }

    #[test]
    fn test_rejected_is_terminal_and_resubmittable() {
        let mut submission = Submission::default();
        let id = submission.begin().unwrap();
        let error = MultisendError::UserRejected("denied".into());
        assert!(submission.apply(id, SubmissionEvent::Rejected { error: error.clone() }));
        assert_eq!(submission.error(), Some(&error));
        assert!(submission.transaction().is_none());

        // A late Submitted after rejection is ignored
        assert!(!submission.apply(id, SubmissionEvent::Submitted { hash: hash(1) }));

        // Starting again clears the previous result
        submission.begin().unwrap();
        assert!(submission.error().is_none());
    }

    #[test]
    fn test_clear_result_returns_to_idle() {
        let mut submission = Submission::default();
        let id = submission.begin().unwrap();
        submission.apply(id, SubmissionEvent::Submitted { hash: hash(1) });
        assert!(!submission.clear_result());
        assert!(submission.is_in_flight());

        let error = MultisendError::NetworkOrRpcFailure("timeout".into());
        submission.apply(id, SubmissionEvent::Failed { hash: hash(1), error });
        assert!(submission.clear_result());
        assert_eq!(submission.phase(), &SubmissionPhase::Idle);
        assert!(submission.error().is_none());
        assert!(submission.transaction().is_none());

        // A late event for the cleared submission stays ignored
        assert!(!submission.apply(id, SubmissionEvent::Submitted { hash: hash(2) }));
    }

    #[test]
    fn test_reverted_receipt_fails() {
        let mut submission = Submission::default();
        let id = submission.begin().unwrap();
        submission.apply(id, SubmissionEvent::Submitted { hash: hash(3) });
        submission.apply(id, SubmissionEvent::Mined { hash: hash(3), receipt: mined(vec![], 0) });

        assert_eq!(submission.transaction().unwrap().status, TxStatus::Failed);
        assert!(matches!(
            submission.error(),
            Some(MultisendError::ContractRevert { reason: None, .. })
        ));
        assert!(submission.transfers().is_empty());
    }

    #[test]
    fn test_stale_receipt_is_not_decoded_into_current_view() {
        let mut submission = Submission::default();
        let first = submission.begin().unwrap();
        submission.apply(first, SubmissionEvent::Submitted { hash: hash(1) });
        submission.apply(
            first,
            SubmissionEvent::Failed { hash: hash(1), error: MultisendError::NetworkOrRpcFailure("x".into()) },
        );

        let second = submission.begin().unwrap();
        submission.apply(second, SubmissionEvent::Submitted { hash: hash(2) });

        let a1: Address = ADDR_1.parse().unwrap();
        let stale = mined(vec![transfer_log(Address::zero(), a1, half())], 1);
        // Old id
        assert!(!submission.apply(first, SubmissionEvent::Mined { hash: hash(1), receipt: stale.clone() }));
        // Current id but a different hash
        assert!(!submission.apply(second, SubmissionEvent::Mined { hash: hash(1), receipt: stale }));

        assert_eq!(submission.phase(), &SubmissionPhase::Pending { hash: hash(2) });
        assert!(submission.transfers().is_empty());
    }

    #[test]
    fn test_transaction_status_set_once() {
        let mut submission = Submission::default();
        let id = submission.begin().unwrap();
        submission.apply(id, SubmissionEvent::Submitted { hash: hash(1) });
        submission.apply(id, SubmissionEvent::Mined { hash: hash(1), receipt: mined(vec![], 1) });
        assert!(!submission.apply(
            id,
            SubmissionEvent::Failed { hash: hash(1), error: MultisendError::NetworkOrRpcFailure("late".into()) }
        ));
        assert_eq!(submission.transaction().unwrap().status, TxStatus::Confirmed);
    }

    #[test]
    fn test_start_with_invalid_input_keeps_idle() {
        let config = Config::default();
        let mut submission = Submission::default();

        for (text, amount) in [("garbage\n0x12", "1"), (ADDR_1, "0"), (ADDR_1, "-1"), (ADDR_1, "")] {
            let err = submission.start(&config, text, amount).unwrap_err();
            assert!(matches!(err, MultisendError::InvalidInput(_)));
            assert_eq!(submission.phase(), &SubmissionPhase::Idle);
            assert_eq!(submission.id(), 0);
        }
    }

    #[test]
    fn test_start_composes_call() {
        let config = Config::default();
        let mut submission = Submission::default();
        let (id, request, call) = submission.start(&config, &two_recipients(), "0.5").unwrap();

        assert_eq!(id, 1);
        assert_eq!(request.recipients.len(), 2);
        assert_eq!(request.total_value_wei, U256::exp10(18));
        assert_eq!(call.value, U256::exp10(18));
        assert_eq!(call.contract, config.multisender_address);
        assert_eq!(submission.phase(), &SubmissionPhase::Submitting);
    }

    #[test]
    fn test_start_with_one_malformed_address() {
        let config = Config::default();
        let mut submission = Submission::default();
        let text = format!("{}\n0xAAAAAAAA", ADDR_1);
        let (_, request, call) = submission.start(&config, &text, "1").unwrap();
        assert_eq!(request.recipients, vec![ADDR_1.parse::<Address>().unwrap()]);
        assert_eq!(call.recipient_count, 1);
    }

    #[test]
    fn test_outcome_log_entry() {
        let mut submission = Submission::default();
        assert!(submission.outcome_log_entry("STT").is_none());
        let id = submission.begin().unwrap();
        assert!(submission.outcome_log_entry("STT").is_none());
        submission.apply(id, SubmissionEvent::Submitted { hash: hash(1) });
        let a1: Address = ADDR_1.parse().unwrap();
        submission.apply(
            id,
            SubmissionEvent::Mined { hash: hash(1), receipt: mined(vec![transfer_log(Address::zero(), a1, half())], 1) },
        );
        let entry = submission.outcome_log_entry("STT").unwrap();
        assert!(entry.contains("Multisend confirmed"));
        assert!(entry.contains("Internal transfers: 1"));
        assert!(entry.contains("0.5 STT"));
    }

    // ==================== driver tests ====================

    #[test]
    fn test_drive_submission_end_to_end() {
        let config = Config::default();
        let mut submission = Submission::default();
        let (id, _, call) = submission.start(&config, &two_recipients(), "0.5").unwrap();

        let wallet = MockWallet::new(Ok(hash(9)));
        let a1: Address = ADDR_1.parse().unwrap();
        let a2: Address = ADDR_2.parse().unwrap();
        wallet.push_receipt(Ok(None));
        wallet.push_receipt(Ok(Some(*mined(
            vec![
                transfer_log(config.multisender_address, a1, half()),
                transfer_log(config.multisender_address, a2, half()),
            ],
            1,
        ))));

        for event in run(&wallet, &call) {
            assert!(submission.apply(id, event));
        }

        let sent = wallet.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].value(), Some(&U256::exp10(18)));
        assert_eq!(sent[0].to_addr(), Some(&config.multisender_address));
        assert_eq!(*wallet.receipt_calls.lock().unwrap(), 2);

        let transfers = submission.transfers();
        assert_eq!(transfers.len(), 2);
        assert_eq!(transfers.iter().map(|t| t.display_amount()).collect::<Vec<_>>(), vec!["0.5", "0.5"]);
        assert_eq!(receipt::total_transferred(transfers), U256::exp10(18));
    }

    #[test]
    fn test_drive_submission_rejected_by_wallet() {
        let config = Config::default();
        let mut submission = Submission::default();
        let (id, _, call) = submission.start(&config, ADDR_1, "1").unwrap();
        let wallet = MockWallet::new(Err(MultisendError::UserRejected("User denied".into())));

        let events = run(&wallet, &call);
        assert_eq!(events.len(), 1);
        for event in events {
            submission.apply(id, event);
        }
        assert!(matches!(submission.error(), Some(MultisendError::UserRejected(_))));
        assert_eq!(*wallet.receipt_calls.lock().unwrap(), 0);
    }

    #[test]
    fn test_drive_submission_receipt_poll_error_not_retried() {
        let config = Config::default();
        let (_, _, call) = Submission::default().start(&config, ADDR_1, "1").unwrap();
        let wallet = MockWallet::new(Ok(hash(4)));
        wallet.push_receipt(Err(MultisendError::NetworkOrRpcFailure("connection reset".into())));
        wallet.push_receipt(Ok(Some(*mined(vec![], 1))));

        let events = run(&wallet, &call);
        assert!(matches!(events.last(), Some(SubmissionEvent::Failed { .. })));
        assert_eq!(*wallet.receipt_calls.lock().unwrap(), 1);
    }

    #[test]
    fn test_drive_submission_times_out() {
        let config = Config::default();
        let (_, _, call) = Submission::default().start(&config, ADDR_1, "1").unwrap();
        let wallet = MockWallet::new(Ok(hash(5)));

        let events = run(&wallet, &call);
        match events.last() {
            Some(SubmissionEvent::Failed { error: MultisendError::NetworkOrRpcFailure(msg), .. }) => {
                assert!(msg.contains("Timed out"));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_drive_submission_wrong_chain() {
        let config = Config::default();
        let (_, _, call) = Submission::default().start(&config, ADDR_1, "1").unwrap();
        let mut wallet = MockWallet::new(Ok(hash(6)));
        wallet.chain_id = 1;

        let events = run(&wallet, &call);
        assert!(matches!(events.as_slice(), [SubmissionEvent::Rejected { .. }]));
        assert_eq!(wallet.network_calls(), 0);
    }

    #[test]
    fn test_invalid_input_makes_no_network_calls() {
        let config = Config::default();
        let wallet = MockWallet::new(Ok(hash(7)));
        let mut submission = Submission::default();

        for (text, amount) in [("", "1"), ("nope", "1"), (ADDR_1, "0"), (ADDR_1, "-1"), (ADDR_1, "")] {
            if let Ok((_, _, call)) = submission.start(&config, text, amount) {
                run(&wallet, &call);
            }
        }
        assert_eq!(wallet.network_calls(), 0);
        assert_eq!(submission.phase(), &SubmissionPhase::Idle);
    }
}
