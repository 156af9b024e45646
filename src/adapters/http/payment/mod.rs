//! Payment HTTP adapter.
//!
//! Exposes the provider redirect endpoints and the checkout session API.

mod dto;
mod handlers;
mod routes;

pub use dto::{CheckoutRedirectResponse, ConfirmParams, CreateCheckoutRequest, ErrorResponse};
pub use handlers::{PaymentApiError, PaymentAppState, DEFAULT_PROCESSING_PATH};
pub use routes::{checkout_routes, payment_router, payment_routes, redirect_routes};
