//! In-memory adapters for development and tests.

mod in_memory_acquirer_store;
mod in_memory_transaction_repository;

pub use in_memory_acquirer_store::InMemoryAcquirerStore;
pub use in_memory_transaction_repository::InMemoryTransactionRepository;
