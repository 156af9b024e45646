//! Payment transaction state machine.
//!
//! `Done` is terminal. `Error` is not: a later confirm delivery for the same
//! reference may still finalize the transaction.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a payment transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionState {
    /// Created by order placement, waiting for the provider confirmation.
    #[default]
    Pending,

    /// Authorized and captured. Downstream order logic has been triggered.
    Done,

    /// Last charge attempt was rejected. Retryable.
    Error,
}

impl TransactionState {
    pub fn is_done(&self) -> bool {
        matches!(self, TransactionState::Done)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionState::Pending => "pending",
            TransactionState::Done => "done",
            TransactionState::Error => "error",
        }
    }
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StateMachine for TransactionState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use TransactionState::*;
        matches!(
            (self, target),
            (Pending, Done) | (Pending, Error) | (Error, Error) | (Error, Done)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use TransactionState::*;
        match self {
            Pending => vec![Done, Error],
            Error => vec![Done, Error],
            Done => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_can_finalize_or_fail() {
        assert!(TransactionState::Pending.can_transition_to(&TransactionState::Done));
        assert!(TransactionState::Pending.can_transition_to(&TransactionState::Error));
    }

    #[test]
    fn error_is_retryable() {
        assert!(TransactionState::Error.can_transition_to(&TransactionState::Error));
        assert!(TransactionState::Error.can_transition_to(&TransactionState::Done));
        assert!(!TransactionState::Error.is_terminal());
    }

    #[test]
    fn done_is_terminal() {
        assert!(TransactionState::Done.is_terminal());
        assert!(TransactionState::Done
            .transition_to(TransactionState::Error)
            .is_err());
    }

    #[test]
    fn nothing_returns_to_pending() {
        for state in [
            TransactionState::Pending,
            TransactionState::Done,
            TransactionState::Error,
        ] {
            assert!(!state.can_transition_to(&TransactionState::Pending));
        }
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TransactionState::Done).unwrap(),
            "\"done\""
        );
    }
}
