//! Acquirer configuration store port.
//!
//! Keyed by provider name. The only write the payment core performs is
//! caching the redirect URL of the last checkout session (last writer wins).

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::payment::AcquirerConfig;

#[async_trait]
pub trait AcquirerConfigStore: Send + Sync {
    /// Returns `None` if the provider has no merchant configuration.
    async fn find_by_provider(&self, provider: &str)
        -> Result<Option<AcquirerConfig>, DomainError>;

    /// Overwrite the cached redirect URL for the provider.
    async fn cache_redirect_url(&self, provider: &str, url: &str) -> Result<(), DomainError>;
}
