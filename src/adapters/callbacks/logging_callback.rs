//! Completion callback that only records the event in the log.
//!
//! Used by the standalone binary, which has no order service attached.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::payment::PaymentTransaction;
use crate::ports::CompletionCallback;

#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingCompletionCallback;

impl LoggingCompletionCallback {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CompletionCallback for LoggingCompletionCallback {
    async fn on_transaction_done(
        &self,
        transaction: &PaymentTransaction,
    ) -> Result<(), DomainError> {
        tracing::info!(
            reference = %transaction.reference,
            transaction_id = %transaction.id,
            amount_minor = transaction.amount_minor,
            currency = %transaction.currency,
            "Payment transaction done"
        );
        Ok(())
    }
}
