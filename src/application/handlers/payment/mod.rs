//! Payment handlers.
//!
//! Command and query handlers for the Nelo checkout flow:
//!
//! ## Commands
//! - Creating a hosted checkout session
//! - Confirming a charge from the provider's redirect (auth + capture)
//! - Finalizing / marking a transaction as error
//!
//! ## Queries
//! - Last cached checkout redirect URL

mod confirm_charge;
mod create_checkout_session;
mod get_checkout_redirect;
mod transaction_state;

// Commands
pub use confirm_charge::{
    ChargeFault, ChargePhase, ConfirmChargeCommand, ConfirmChargeHandler, ConfirmChargeOutcome,
    NotApplicableReason,
};
pub use create_checkout_session::{CreateCheckoutSessionCommand, CreateCheckoutSessionHandler};
pub use transaction_state::{
    FinalizeTransactionCommand, MarkTransactionErrorCommand, TransactionStateHandler,
    DEFAULT_MAX_ATTEMPTS,
};

// Queries
pub use get_checkout_redirect::{GetCheckoutRedirectHandler, GetCheckoutRedirectQuery};
