//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `nelo` - Nelo REST gateway (and a mock for tests)
//! - `memory` - In-memory transaction repository and acquirer store
//! - `callbacks` - Completion callback implementations
//! - `http` - Axum endpoints for provider redirects and checkout

pub mod callbacks;
pub mod http;
pub mod memory;
pub mod nelo;

pub use callbacks::{LoggingCompletionCallback, RecordingCompletionCallback};
pub use http::{app_router, payment_router, PaymentAppState};
pub use memory::{InMemoryAcquirerStore, InMemoryTransactionRepository};
pub use nelo::{MockCheckoutGateway, NeloCheckoutGateway};
