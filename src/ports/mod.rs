//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CheckoutGateway` - Remote provider (checkout, auth, capture)
//! - `TransactionRepository` - Transaction lookup and conditional state writes
//! - `AcquirerConfigStore` - Merchant configuration keyed by provider
//! - `CompletionCallback` - Downstream hook fired once per finalized transaction

mod acquirer_config_store;
mod checkout_gateway;
mod completion_callback;
mod transaction_repository;

pub use acquirer_config_store::AcquirerConfigStore;
pub use checkout_gateway::{ChargeRequest, CheckoutGateway, GatewayFault};
pub use completion_callback::CompletionCallback;
pub use transaction_repository::{ReferenceMatch, TransactionRepository, UpdateOutcome};
