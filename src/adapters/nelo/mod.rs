//! Nelo checkout provider adapter.
//!
//! Implements the `CheckoutGateway` port for Nelo:
//! - Hosted checkout session creation
//! - Two-phase charge (auth, then capture)
//!
//! # Security
//!
//! - Merchant secret held as `secrecy::SecretString`, sent as a bearer token
//! - Provider error bodies are logged only
//!
//! # Endpoints
//!
//! - `POST {rest_url}/checkout`
//! - `POST {rest_url}/charge/auth`
//! - `POST {rest_url}/charge/capture`

mod mock_checkout_gateway;
mod nelo_adapter;
mod wire_types;

pub use mock_checkout_gateway::{MethodCall, MockCheckoutGateway, AUTHORIZE, CAPTURE, CREATE_CHECKOUT};
pub use nelo_adapter::NeloCheckoutGateway;
pub use wire_types::{NeloCheckoutRequest, NeloCheckoutResponse};
