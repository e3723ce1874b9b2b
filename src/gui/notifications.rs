//! Notification history shown in the top bar popup.

use crate::submission::SubmissionPhase;
use crate::utils;
use std::collections::VecDeque;

const MAX_NOTIFICATIONS: usize = 50;

/// A notification entry with message and timestamp
#[derive(Clone)]
pub struct NotificationEntry {
    pub message: String,
    pub timestamp: chrono::DateTime<chrono::Local>,
}

impl NotificationEntry {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: chrono::Local::now(),
        }
    }

    pub fn time_ago(&self) -> String {
        let now = chrono::Local::now();
        let duration = now.signed_duration_since(self.timestamp);
        if duration.num_seconds() < 60 {
            "just now".to_string()
        } else if duration.num_minutes() < 60 {
            format!("{}m ago", duration.num_minutes())
        } else if duration.num_hours() < 24 {
            format!("{}h ago", duration.num_hours())
        } else {
            self.timestamp.format("%m/%d %H:%M").to_string()
        }
    }
}

/// Bounded, oldest-first list of notifications.
#[derive(Default)]
pub struct Notifications {
    entries: VecDeque<NotificationEntry>,
}

impl Notifications {
    pub fn push(&mut self, message: impl Into<String>) {
        self.entries.push_back(NotificationEntry::new(message));
        while self.entries.len() > MAX_NOTIFICATIONS {
            self.entries.pop_front();
        }
    }

    /// Newest first
    pub fn iter_recent(&self) -> impl Iterator<Item = &NotificationEntry> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// One-line summary of a phase change worth telling the user about.
pub fn phase_notification(phase: &SubmissionPhase, symbol: &str) -> Option<String> {
    match phase {
        SubmissionPhase::Idle | SubmissionPhase::Submitting => None,
        SubmissionPhase::Pending { hash } => Some(format!(
            "Transaction submitted: {}",
            utils::shorten_hex(&format!("{:?}", hash))
        )),
        SubmissionPhase::Rejected { error } => Some(format!("[!!] {}", error.short_message())),
        SubmissionPhase::Failed { error, .. } => Some(format!("[!!] Transaction failed: {}", error.short_message())),
        SubmissionPhase::Confirmed { transfers, .. } => Some(format!(
            "[OK] Confirmed: {} transfers, {} {} total",
            transfers.len(),
            utils::format_ether_compact(crate::receipt::total_transferred(transfers)),
            symbol
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MultisendError;
    use crate::receipt::DecodedTransfer;
    use ethers::types::{Address, TxHash, U256};

    #[test]
    fn test_notifications_are_bounded() {
        let mut notifications = Notifications::default();
        for i in 0..(MAX_NOTIFICATIONS + 5) {
            notifications.push(format!("n{}", i));
        }
        assert_eq!(notifications.len(), MAX_NOTIFICATIONS);
        let newest = notifications.iter_recent().next().unwrap();
        assert_eq!(newest.message, format!("n{}", MAX_NOTIFICATIONS + 4));
    }

    #[test]
    fn test_fresh_entry_is_just_now() {
        assert_eq!(NotificationEntry::new("x").time_ago(), "just now");
    }

    #[test]
    fn test_phase_notification() {
        assert!(phase_notification(&SubmissionPhase::Submitting, "STT").is_none());

        let confirmed = SubmissionPhase::Confirmed {
            hash: TxHash::zero(),
            block_number: Some(1),
            transfers: vec![
                DecodedTransfer { recipient: Address::repeat_byte(1), amount_wei: U256::exp10(18) / 2 },
                DecodedTransfer { recipient: Address::repeat_byte(2), amount_wei: U256::exp10(18) / 2 },
            ],
        };
        assert_eq!(
            phase_notification(&confirmed, "STT").unwrap(),
            "[OK] Confirmed: 2 transfers, 1 STT total"
        );

        let rejected = SubmissionPhase::Rejected {
            error: MultisendError::UserRejected("User denied transaction signature".into()),
        };
        assert!(phase_notification(&rejected, "STT").unwrap().starts_with("[!!]"));
    }
}
