//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod payment;

pub use payment::{
    ChargeFault, ChargePhase, ConfirmChargeCommand, ConfirmChargeHandler, ConfirmChargeOutcome,
    CreateCheckoutSessionCommand, CreateCheckoutSessionHandler, FinalizeTransactionCommand,
    GetCheckoutRedirectHandler, GetCheckoutRedirectQuery, MarkTransactionErrorCommand,
    NotApplicableReason, TransactionStateHandler,
};
