//! Completion callback that records every invocation.
//!
//! Lets tests assert the at-most-once guarantee, and can be told to fail
//! to check that a failing callback never undoes a finalization.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::foundation::{DomainError, ErrorCode, TransactionReference};
use crate::domain::payment::PaymentTransaction;
use crate::ports::CompletionCallback;

#[derive(Debug, Clone, Default)]
pub struct RecordingCompletionCallback {
    invocations: Arc<Mutex<Vec<TransactionReference>>>,
    fail: Arc<AtomicBool>,
}

impl RecordingCompletionCallback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent invocation return an error (still recorded).
    pub fn fail_with_error(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub async fn invocations(&self) -> Vec<TransactionReference> {
        self.invocations.lock().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.invocations.lock().await.len()
    }
}

#[async_trait]
impl CompletionCallback for RecordingCompletionCallback {
    async fn on_transaction_done(
        &self,
        transaction: &PaymentTransaction,
    ) -> Result<(), DomainError> {
        self.invocations
            .lock()
            .await
            .push(transaction.reference.clone());

        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::ExternalServiceError,
                "Order service unavailable",
            ));
        }
        Ok(())
    }
}
