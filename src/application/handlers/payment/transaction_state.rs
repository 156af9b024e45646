//! TransactionStateHandler - Command handler for persisted transaction state changes.
//!
//! Wraps the `PaymentTransaction` transitions with lookup by reference,
//! compare-and-set persistence and the completion callback.
//!
//! ## Concurrency
//!
//! Each attempt loads the transaction, applies the transition in memory and
//! writes it back conditioned on the loaded `version`. A conflicting write
//! means another delivery got there first: the transaction is reloaded and
//! the transition re-evaluated, so a delivery that lost the race against a
//! finalization sees `done` and turns into a no-op. The completion callback
//! runs only after this handler's own pending/error -> done write applied.

use std::sync::Arc;

use crate::domain::foundation::{Timestamp, TransactionReference};
use crate::domain::payment::{
    ChargeProgress, FinalizeOutcome, MarkErrorOutcome, PaymentError, PaymentTransaction,
};
use crate::ports::{CompletionCallback, TransactionRepository, UpdateOutcome};

/// Conditional write attempts before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Command to finalize a transaction.
#[derive(Debug, Clone)]
pub struct FinalizeTransactionCommand {
    pub reference: TransactionReference,
    pub acquirer_reference: String,
    pub progress: ChargeProgress,
}

/// Command to record a failed charge attempt.
#[derive(Debug, Clone)]
pub struct MarkTransactionErrorCommand {
    pub reference: TransactionReference,
    pub message: String,
    pub progress: ChargeProgress,
}

pub struct TransactionStateHandler {
    repository: Arc<dyn TransactionRepository>,
    completion_callback: Arc<dyn CompletionCallback>,
    max_attempts: usize,
}

impl TransactionStateHandler {
    pub fn new(
        repository: Arc<dyn TransactionRepository>,
        completion_callback: Arc<dyn CompletionCallback>,
    ) -> Self {
        Self {
            repository,
            completion_callback,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Moves the transaction to `done` and fires the completion callback.
    ///
    /// # Errors
    ///
    /// - `ReferenceNotFound` / `AmbiguousReference` without any state change
    /// - `ConcurrentModification` if every attempt lost a race
    pub async fn finalize(
        &self,
        cmd: FinalizeTransactionCommand,
    ) -> Result<FinalizeOutcome, PaymentError> {
        for attempt in 1..=self.max_attempts {
            let mut transaction = self.load(&cmd.reference).await?;
            let expected_version = transaction.version;

            let outcome =
                transaction.finalize(cmd.acquirer_reference.as_str(), cmd.progress, Timestamp::now())?;
            if outcome == FinalizeOutcome::AlreadyDone {
                tracing::info!(reference = %cmd.reference, "Transaction already done, skipping");
                return Ok(outcome);
            }

            match self
                .repository
                .update_state(&transaction, expected_version)
                .await?
            {
                UpdateOutcome::Applied => {
                    tracing::info!(
                        reference = %cmd.reference,
                        transaction_id = %transaction.id,
                        "Transaction finalized"
                    );
                    self.notify_done(&transaction).await;
                    return Ok(FinalizeOutcome::Finalized);
                }
                UpdateOutcome::Conflict => {
                    tracing::debug!(reference = %cmd.reference, attempt, "Finalize lost a race, retrying");
                }
            }
        }

        Err(PaymentError::ConcurrentModification {
            reference: cmd.reference,
        })
    }

    /// Moves the transaction to `error`; a `done` transaction is left alone.
    pub async fn mark_error(
        &self,
        cmd: MarkTransactionErrorCommand,
    ) -> Result<MarkErrorOutcome, PaymentError> {
        for attempt in 1..=self.max_attempts {
            let mut transaction = self.load(&cmd.reference).await?;
            let expected_version = transaction.version;

            let outcome =
                transaction.mark_error(cmd.message.as_str(), cmd.progress, Timestamp::now())?;
            if outcome == MarkErrorOutcome::IgnoredDone {
                tracing::info!(reference = %cmd.reference, "Transaction already done, error not recorded");
                return Ok(outcome);
            }

            match self
                .repository
                .update_state(&transaction, expected_version)
                .await?
            {
                UpdateOutcome::Applied => {
                    tracing::info!(
                        reference = %cmd.reference,
                        authorized = transaction.authorized_at.is_some(),
                        captured = transaction.captured_at.is_some(),
                        "Transaction marked as error"
                    );
                    return Ok(MarkErrorOutcome::Recorded);
                }
                UpdateOutcome::Conflict => {
                    tracing::debug!(reference = %cmd.reference, attempt, "Mark error lost a race, retrying");
                }
            }
        }

        Err(PaymentError::ConcurrentModification {
            reference: cmd.reference,
        })
    }

    async fn load(
        &self,
        reference: &TransactionReference,
    ) -> Result<PaymentTransaction, PaymentError> {
        self.repository
            .find_by_reference(reference)
            .await?
            .into_single(reference)
            .map_err(|e| {
                tracing::warn!(reference = %reference, error = %e, "Transaction lookup failed");
                e
            })
    }

    /// A failing callback is logged; the `done` state stays persisted.
    async fn notify_done(&self, transaction: &PaymentTransaction) {
        if let Err(e) = self
            .completion_callback
            .on_transaction_done(transaction)
            .await
        {
            tracing::error!(
                reference = %transaction.reference,
                error = %e,
                "Completion callback failed"
            );
        }
    }
}
