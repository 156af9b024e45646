//! CreateCheckoutSessionHandler - Command handler for opening a hosted Nelo checkout.

use std::sync::Arc;

use crate::domain::payment::{CallbackUrls, CheckoutOrder, CheckoutSession, PaymentError};
use crate::ports::{AcquirerConfigStore, CheckoutGateway};

/// Command to create a checkout session for an order.
#[derive(Debug, Clone)]
pub struct CreateCheckoutSessionCommand {
    /// Provider segment the callbacks are routed under (e.g. `nelo`).
    pub provider: String,
    pub order: CheckoutOrder,
}

/// Handler for creating checkout sessions.
///
/// Not idempotent: every call opens a new session at the provider and
/// overwrites the cached redirect URL.
pub struct CreateCheckoutSessionHandler {
    acquirers: Arc<dyn AcquirerConfigStore>,
    gateway: Arc<dyn CheckoutGateway>,
    public_base_url: String,
}

impl CreateCheckoutSessionHandler {
    pub fn new(
        acquirers: Arc<dyn AcquirerConfigStore>,
        gateway: Arc<dyn CheckoutGateway>,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            acquirers,
            gateway,
            public_base_url: public_base_url.into(),
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateCheckoutSessionCommand,
    ) -> Result<CheckoutSession, PaymentError> {
        cmd.order.validate()?;

        let acquirer = self
            .acquirers
            .find_by_provider(&cmd.provider)
            .await?
            .ok_or_else(|| PaymentError::AcquirerNotConfigured(cmd.provider.clone()))?;

        let callbacks = self.callback_urls(&cmd.provider);

        let session = self
            .gateway
            .create_checkout(&acquirer, &cmd.order, &callbacks)
            .await
            .map_err(|fault| {
                tracing::error!(
                    reference = %cmd.order.reference,
                    provider = %cmd.provider,
                    fault_kind = fault.kind(),
                    status = ?fault.status_code(),
                    error = %fault,
                    "Checkout session creation failed"
                );
                PaymentError::ProvisioningFailed
            })?;

        // Losing the cached URL does not invalidate the session just created.
        if let Err(e) = self
            .acquirers
            .cache_redirect_url(&cmd.provider, &session.redirect_url)
            .await
        {
            tracing::warn!(provider = %cmd.provider, error = %e, "Could not cache redirect URL");
        }

        tracing::info!(
            reference = %cmd.order.reference,
            provider = %cmd.provider,
            "Checkout session created"
        );

        Ok(session)
    }

    /// Confirm and cancel URLs the provider redirects the buyer to.
    pub fn callback_urls(&self, provider: &str) -> CallbackUrls {
        let base = self.public_base_url.trim_end_matches('/');
        CallbackUrls {
            confirm_url: format!("{}/payment/{}/confirm", base, provider),
            cancel_url: format!("{}/payment/{}/cancel", base, provider),
        }
    }
}
