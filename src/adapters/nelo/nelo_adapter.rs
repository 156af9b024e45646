//! Nelo checkout gateway adapter.
//!
//! Implements the `CheckoutGateway` port against the Nelo REST API.
//!
//! # Security
//!
//! - Merchant secret sent as a bearer token, held as `secrecy::SecretString`
//! - Provider error bodies are logged, never propagated in `Display` output
//!
//! # Configuration
//!
//! ```ignore
//! let gateway = NeloCheckoutGateway::with_timeout(Duration::from_secs(30))?;
//! let session = gateway.create_checkout(&acquirer, &order, &callbacks).await?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Serialize;

use crate::domain::payment::{AcquirerConfig, CallbackUrls, CheckoutOrder, CheckoutSession};
use crate::ports::{ChargeRequest, CheckoutGateway, GatewayFault};

use super::wire_types::{NeloCheckoutRequest, NeloCheckoutResponse};

const CHECKOUT_PATH: &str = "checkout";
const AUTH_PATH: &str = "charge/auth";
const CAPTURE_PATH: &str = "charge/capture";

/// Nelo REST client.
#[derive(Debug, Clone)]
pub struct NeloCheckoutGateway {
    http_client: reqwest::Client,
}

impl NeloCheckoutGateway {
    /// Create a gateway around an existing HTTP client.
    pub fn new(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }

    /// Create a gateway whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::new(http_client))
    }

    /// POST a JSON body; any status >= 400 is a fault.
    async fn post_json<B: Serialize + ?Sized>(
        &self,
        acquirer: &AcquirerConfig,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, GatewayFault> {
        let url = format!("{}/{}", acquirer.rest_url(), path);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(acquirer.merchant_secret().expose_secret())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(url = %url, error = %e, "Nelo request failed before a response");
                GatewayFault::network(e.to_string())
            })?;

        let status = response.status().as_u16();
        tracing::info!(url = %url, status, "Nelo request completed");

        if status >= 400 {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(url = %url, status, body = %error_text, "Nelo returned an error response");
            return Err(GatewayFault::http_status(status, error_text));
        }

        Ok(response)
    }
}

impl Default for NeloCheckoutGateway {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

#[async_trait]
impl CheckoutGateway for NeloCheckoutGateway {
    async fn create_checkout(
        &self,
        acquirer: &AcquirerConfig,
        order: &CheckoutOrder,
        callbacks: &CallbackUrls,
    ) -> Result<CheckoutSession, GatewayFault> {
        let payload = NeloCheckoutRequest::from_order(order, callbacks);
        let response = self.post_json(acquirer, CHECKOUT_PATH, &payload).await?;

        let body: NeloCheckoutResponse = response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "Nelo checkout response had no usable redirectUrl");
            GatewayFault::decode(e.to_string())
        })?;

        Ok(CheckoutSession {
            redirect_url: body.redirect_url,
        })
    }

    async fn authorize(
        &self,
        acquirer: &AcquirerConfig,
        request: &ChargeRequest,
    ) -> Result<(), GatewayFault> {
        self.post_json(acquirer, AUTH_PATH, request).await?;
        Ok(())
    }

    async fn capture(
        &self,
        acquirer: &AcquirerConfig,
        request: &ChargeRequest,
    ) -> Result<(), GatewayFault> {
        self.post_json(acquirer, CAPTURE_PATH, request).await?;
        Ok(())
    }
}
