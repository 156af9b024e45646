//! In-Memory Transaction Repository
//!
//! Stores payment transactions in memory. Used by the development binary
//! and by tests. Duplicate references are allowed so the ambiguous lookup
//! path can be exercised.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, TransactionId, TransactionReference};
use crate::domain::payment::PaymentTransaction;
use crate::ports::{ReferenceMatch, TransactionRepository, UpdateOutcome};

/// In-memory storage for payment transactions
#[derive(Debug, Clone, Default)]
pub struct InMemoryTransactionRepository {
    transactions: Arc<RwLock<Vec<PaymentTransaction>>>,
}

impl InMemoryTransactionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a stored transaction by id (useful for tests)
    pub async fn get(&self, id: TransactionId) -> Option<PaymentTransaction> {
        self.transactions
            .read()
            .await
            .iter()
            .find(|tx| tx.id == id)
            .cloned()
    }

    /// Get the number of stored transactions
    pub async fn len(&self) -> usize {
        self.transactions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.transactions.read().await.is_empty()
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactionRepository {
    async fn save(&self, transaction: &PaymentTransaction) -> Result<(), DomainError> {
        let mut transactions = self.transactions.write().await;
        match transactions.iter_mut().find(|tx| tx.id == transaction.id) {
            Some(existing) => *existing = transaction.clone(),
            None => transactions.push(transaction.clone()),
        }
        Ok(())
    }

    async fn find_by_reference(
        &self,
        reference: &TransactionReference,
    ) -> Result<ReferenceMatch, DomainError> {
        let transactions = self.transactions.read().await;
        let mut matches = transactions.iter().filter(|tx| &tx.reference == reference);

        Ok(match (matches.next(), matches.count()) {
            (None, _) => ReferenceMatch::None,
            (Some(tx), 0) => ReferenceMatch::One(tx.clone()),
            (Some(_), rest) => ReferenceMatch::Many(rest + 1),
        })
    }

    async fn update_state(
        &self,
        transaction: &PaymentTransaction,
        expected_version: u64,
    ) -> Result<UpdateOutcome, DomainError> {
        let mut transactions = self.transactions.write().await;
        let stored = transactions
            .iter_mut()
            .find(|tx| tx.id == transaction.id)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::TransactionNotFound, "Transaction not found")
                    .with_detail("id", transaction.id.to_string())
            })?;

        if stored.version != expected_version {
            return Ok(UpdateOutcome::Conflict);
        }

        *stored = transaction.clone();
        Ok(UpdateOutcome::Applied)
    }
}
