//! Payment module - Nelo checkout, charge and transaction lifecycle.
//!
//! # Module Organization
//!
//! - `claims` - Checkout token decoding (unverified claims)
//! - `transaction` - PaymentTransaction aggregate and charge progress
//! - `state` - Transaction state machine
//! - `acquirer` - Merchant configuration and provider endpoints
//! - `checkout` - Order/buyer value objects for session creation
//! - `errors` - Payment error taxonomy

mod acquirer;
mod checkout;
mod claims;
mod errors;
mod state;
mod transaction;

pub use acquirer::{AcquirerConfig, AcquirerEnvironment, PRODUCTION_REST_URL, SANDBOX_REST_URL};
pub use checkout::{
    Buyer, BuyerAddress, CallbackUrls, CheckoutOrder, CheckoutSession, DEFAULT_COUNTRY_ISO2,
};
pub use claims::{
    decode_claims, try_decode_claims, CheckoutClaims, TokenDecodeError, ORDER_REFERENCE_CLAIM,
};
pub use errors::{PaymentError, CHARGE_REJECTED_MESSAGE, CONTACT_SUPPORT_MESSAGE};
pub use state::TransactionState;
pub use transaction::{ChargeProgress, FinalizeOutcome, MarkErrorOutcome, PaymentTransaction};
