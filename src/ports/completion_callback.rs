//! Completion callback port.
//!
//! Invoked once a transaction has been persisted as `done`, so downstream
//! order logic (order confirmation, invoicing) can proceed. The payment core
//! guarantees at most one invocation per transaction; what happens inside is
//! the order service's business.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::payment::PaymentTransaction;

#[async_trait]
pub trait CompletionCallback: Send + Sync {
    async fn on_transaction_done(&self, transaction: &PaymentTransaction)
        -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_callback_is_object_safe() {
        fn _accepts_dyn(_callback: &dyn CompletionCallback) {}
    }
}
