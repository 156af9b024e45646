//! PaymentTransaction aggregate.
//!
//! Pure state transitions. Persistence, concurrency control and the
//! completion callback live in the application layer.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, StateMachine, Timestamp, TransactionId, TransactionReference,
};

use super::TransactionState;

/// Timestamps of the charge steps that succeeded against the provider.
///
/// Auth and capture are two separate remote calls; keeping both on the
/// record makes an "authorized but never captured" charge visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeProgress {
    pub authorized_at: Option<Timestamp>,
    pub captured_at: Option<Timestamp>,
}

impl ChargeProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_authorized(&mut self, at: Timestamp) {
        self.authorized_at = Some(at);
    }

    pub fn record_captured(&mut self, at: Timestamp) {
        self.captured_at = Some(at);
    }

    /// Authorized on the provider side but not captured.
    pub fn is_partial(&self) -> bool {
        self.authorized_at.is_some() && self.captured_at.is_none()
    }
}

/// Result of applying `finalize` to a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalizeOutcome {
    /// The transaction moved to `done` in this call.
    Finalized,
    /// The transaction was already `done`; nothing changed.
    AlreadyDone,
}

/// Result of applying `mark_error` to a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkErrorOutcome {
    Recorded,
    /// `done` is never overridden.
    IgnoredDone,
}

/// A payment transaction created by order placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTransaction {
    pub id: TransactionId,
    pub reference: TransactionReference,

    /// Amount in minor currency units.
    pub amount_minor: i64,
    pub currency: String,

    pub state: TransactionState,
    pub state_message: Option<String>,

    /// Reference reported back for the provider-side charge.
    pub acquirer_reference: Option<String>,

    pub authorized_at: Option<Timestamp>,
    pub captured_at: Option<Timestamp>,
    pub finalized_at: Option<Timestamp>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,

    /// Incremented on every state write; used for compare-and-set updates.
    pub version: u64,
}

impl PaymentTransaction {
    /// Creates a pending transaction.
    pub fn new(
        reference: TransactionReference,
        amount_minor: i64,
        currency: impl Into<String>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: TransactionId::new(),
            reference,
            amount_minor,
            currency: currency.into(),
            state: TransactionState::Pending,
            state_message: None,
            acquirer_reference: None,
            authorized_at: None,
            captured_at: None,
            finalized_at: None,
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }

    pub fn is_done(&self) -> bool {
        self.state.is_done()
    }

    pub fn charge_progress(&self) -> ChargeProgress {
        ChargeProgress {
            authorized_at: self.authorized_at,
            captured_at: self.captured_at,
        }
    }

    /// Marks the transaction as successfully completed.
    ///
    /// A `done` transaction is left untouched, whatever acquirer reference is
    /// passed in.
    pub fn finalize(
        &mut self,
        acquirer_reference: impl Into<String>,
        progress: ChargeProgress,
        at: Timestamp,
    ) -> Result<FinalizeOutcome, DomainError> {
        if self.is_done() {
            return Ok(FinalizeOutcome::AlreadyDone);
        }

        self.transition_to(TransactionState::Done)?;
        self.acquirer_reference = Some(acquirer_reference.into());
        self.finalized_at = Some(at);
        self.state_message = None;
        self.apply_progress(progress);
        self.touch(at);
        Ok(FinalizeOutcome::Finalized)
    }

    /// Records a failed charge attempt.
    pub fn mark_error(
        &mut self,
        message: impl Into<String>,
        progress: ChargeProgress,
        at: Timestamp,
    ) -> Result<MarkErrorOutcome, DomainError> {
        if self.is_done() {
            return Ok(MarkErrorOutcome::IgnoredDone);
        }

        self.transition_to(TransactionState::Error)?;
        self.state_message = Some(message.into());
        self.apply_progress(progress);
        self.touch(at);
        Ok(MarkErrorOutcome::Recorded)
    }

    fn transition_to(&mut self, target: TransactionState) -> Result<(), DomainError> {
        self.state = self.state.transition_to(target).map_err(|e| {
            DomainError::new(ErrorCode::InvalidStateTransition, e.to_string())
                .with_detail("reference", self.reference.as_str())
        })?;
        Ok(())
    }

    fn apply_progress(&mut self, progress: ChargeProgress) {
        if let Some(at) = progress.authorized_at {
            self.authorized_at = Some(at);
        }
        if let Some(at) = progress.captured_at {
            self.captured_at = Some(at);
        }
    }

    fn touch(&mut self, at: Timestamp) {
        self.updated_at = at;
        self.version += 1;
    }
}
