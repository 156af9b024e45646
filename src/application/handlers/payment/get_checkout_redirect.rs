//! GetCheckoutRedirectHandler - Query handler for the last cached checkout redirect URL.

use std::sync::Arc;

use crate::domain::payment::PaymentError;
use crate::ports::AcquirerConfigStore;

/// Query for the redirect URL of the most recent checkout session.
#[derive(Debug, Clone)]
pub struct GetCheckoutRedirectQuery {
    pub provider: String,
}

pub struct GetCheckoutRedirectHandler {
    acquirers: Arc<dyn AcquirerConfigStore>,
}

impl GetCheckoutRedirectHandler {
    pub fn new(acquirers: Arc<dyn AcquirerConfigStore>) -> Self {
        Self { acquirers }
    }

    /// `None` until a session has been created for the provider.
    pub async fn handle(
        &self,
        query: GetCheckoutRedirectQuery,
    ) -> Result<Option<String>, PaymentError> {
        let acquirer = self
            .acquirers
            .find_by_provider(&query.provider)
            .await?
            .ok_or(PaymentError::AcquirerNotConfigured(query.provider))?;

        Ok(acquirer.redirect_url().map(str::to_string))
    }
}
