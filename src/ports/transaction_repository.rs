//! Payment transaction repository port.
//!
//! Deliberately narrow: lookup by business reference and a conditional
//! state write. Storage is owned by the surrounding order service.
//!
//! # Concurrency
//!
//! `update_state` is a compare-and-set on `PaymentTransaction::version`.
//! Two confirm deliveries that both loaded a pending transaction cannot both
//! persist the `done` transition: the second write sees a newer version and
//! gets `UpdateOutcome::Conflict`.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, TransactionReference};
use crate::domain::payment::{PaymentError, PaymentTransaction};

/// Result of looking a reference up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceMatch {
    None,
    One(PaymentTransaction),
    /// Number of transactions sharing the reference.
    Many(usize),
}

impl ReferenceMatch {
    /// Requires exactly one match.
    pub fn into_single(
        self,
        reference: &TransactionReference,
    ) -> Result<PaymentTransaction, PaymentError> {
        match self {
            ReferenceMatch::One(tx) => Ok(tx),
            ReferenceMatch::None => Err(PaymentError::ReferenceNotFound(reference.clone())),
            ReferenceMatch::Many(count) => Err(PaymentError::AmbiguousReference {
                reference: reference.clone(),
                count,
            }),
        }
    }
}

/// Result of a conditional state write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Applied,
    /// The stored version no longer matched; nothing was written.
    Conflict,
}

/// Repository port for payment transactions.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Store a newly created transaction (order placement).
    async fn save(&self, transaction: &PaymentTransaction) -> Result<(), DomainError>;

    /// Find every transaction carrying the reference.
    async fn find_by_reference(
        &self,
        reference: &TransactionReference,
    ) -> Result<ReferenceMatch, DomainError>;

    /// Persist `transaction` only if the stored row is still at
    /// `expected_version`.
    ///
    /// # Errors
    ///
    /// - `TransactionNotFound` if the row disappeared
    /// - `DatabaseError` on persistence failure
    async fn update_state(
        &self,
        transaction: &PaymentTransaction,
        expected_version: u64,
    ) -> Result<UpdateOutcome, DomainError>;
}
