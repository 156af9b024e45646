//! Axum router configuration for payment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{cancel, confirm, create_checkout, get_checkout_redirect, PaymentAppState};

/// Routes the provider sends the buyer's browser to.
///
/// - `GET|POST /:provider/confirm` - Charge the order named by `checkoutToken`
/// - `GET|POST /:provider/cancel` - Buyer abandoned checkout
///
/// Both always answer 303, so they are kept outside the request timeout layer.
pub fn redirect_routes() -> Router<PaymentAppState> {
    Router::new()
        .route("/:provider/confirm", get(confirm).post(confirm))
        .route("/:provider/cancel", get(cancel).post(cancel))
}

/// JSON endpoints for the order service.
///
/// - `POST /:provider/checkout` - Open a hosted checkout session
/// - `GET /:provider/checkout` - Last cached checkout redirect URL
pub fn checkout_routes() -> Router<PaymentAppState> {
    Router::new().route(
        "/:provider/checkout",
        post(create_checkout).get(get_checkout_redirect),
    )
}

/// Every payment route, unlayered.
pub fn payment_routes() -> Router<PaymentAppState> {
    redirect_routes().merge(checkout_routes())
}

/// Create the complete payment module router, mounted at `/payment`.
///
/// # Example
///
/// ```ignore
/// let app = payment_router().with_state(app_state);
/// ```
pub fn payment_router() -> Router<PaymentAppState> {
    Router::new().nest("/payment", payment_routes())
}
