//! Checkout gateway port for the remote payment provider.
//!
//! Models exactly the three calls the Nelo flow needs: open a hosted
//! checkout session, authorize a charge, capture it.
//!
//! # Design
//!
//! - **Credentials injected per call**: the acquirer config is resolved by the
//!   caller and passed in, the gateway holds no merchant state
//! - **Typed faults**: callers branch on `GatewayFault` variants instead of
//!   parsing log text

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::payment::{AcquirerConfig, CallbackUrls, CheckoutOrder, CheckoutSession};

/// Port for the checkout/charge provider.
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    /// Create a hosted checkout session. Not idempotent.
    async fn create_checkout(
        &self,
        acquirer: &AcquirerConfig,
        order: &CheckoutOrder,
        callbacks: &CallbackUrls,
    ) -> Result<CheckoutSession, GatewayFault>;

    /// Authorize (reserve) the charge behind a checkout token.
    async fn authorize(
        &self,
        acquirer: &AcquirerConfig,
        request: &ChargeRequest,
    ) -> Result<(), GatewayFault>;

    /// Capture a previously authorized charge.
    async fn capture(
        &self,
        acquirer: &AcquirerConfig,
        request: &ChargeRequest,
    ) -> Result<(), GatewayFault>;
}

/// Body sent to both the auth and capture endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeRequest {
    pub checkout_token: String,
}

impl ChargeRequest {
    pub fn new(checkout_token: impl Into<String>) -> Self {
        Self {
            checkout_token: checkout_token.into(),
        }
    }
}

/// Why a provider call failed.
///
/// `Display` never includes the provider response body; `body` is kept for
/// logging only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayFault {
    /// The request never produced an HTTP response.
    #[error("network fault: {detail}")]
    Network { detail: String },

    /// The provider answered with status >= 400.
    #[error("provider returned HTTP {code}")]
    HttpStatus { code: u16, body: String },

    /// The provider answered successfully but the body was unusable.
    #[error("malformed provider response: {detail}")]
    Decode { detail: String },
}

impl GatewayFault {
    pub fn network(detail: impl Into<String>) -> Self {
        GatewayFault::Network {
            detail: detail.into(),
        }
    }

    pub fn http_status(code: u16, body: impl Into<String>) -> Self {
        GatewayFault::HttpStatus {
            code,
            body: body.into(),
        }
    }

    pub fn decode(detail: impl Into<String>) -> Self {
        GatewayFault::Decode {
            detail: detail.into(),
        }
    }

    /// HTTP status, when the provider answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            GatewayFault::HttpStatus { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            GatewayFault::Network { .. } => "network",
            GatewayFault::HttpStatus { .. } => "http_status",
            GatewayFault::Decode { .. } => "decode",
        }
    }
}
