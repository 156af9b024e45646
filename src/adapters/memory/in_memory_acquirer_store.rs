//! In-Memory Acquirer Configuration Store
//!
//! Holds merchant configuration keyed by provider name. The binary seeds it
//! from application config at startup.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::payment::AcquirerConfig;
use crate::ports::AcquirerConfigStore;

#[derive(Debug, Clone, Default)]
pub struct InMemoryAcquirerStore {
    configs: Arc<RwLock<HashMap<String, AcquirerConfig>>>,
}

impl InMemoryAcquirerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding a single acquirer.
    pub async fn with_acquirer(config: AcquirerConfig) -> Self {
        let store = Self::new();
        store.insert(config).await;
        store
    }

    /// Insert or replace the configuration for its provider.
    pub async fn insert(&self, config: AcquirerConfig) {
        self.configs
            .write()
            .await
            .insert(config.provider().to_string(), config);
    }
}

#[async_trait]
impl AcquirerConfigStore for InMemoryAcquirerStore {
    async fn find_by_provider(
        &self,
        provider: &str,
    ) -> Result<Option<AcquirerConfig>, DomainError> {
        Ok(self.configs.read().await.get(provider).cloned())
    }

    async fn cache_redirect_url(&self, provider: &str, url: &str) -> Result<(), DomainError> {
        let mut configs = self.configs.write().await;
        let config = configs.get_mut(provider).ok_or_else(|| {
            DomainError::new(
                ErrorCode::AcquirerNotConfigured,
                format!("No acquirer configured for provider '{}'", provider),
            )
        })?;
        config.set_redirect_url(url);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::AcquirerEnvironment;

    fn nelo() -> AcquirerConfig {
        AcquirerConfig::new("nelo", "sk_test", AcquirerEnvironment::Sandbox)
    }

    #[tokio::test]
    async fn finds_configured_provider() {
        let store = InMemoryAcquirerStore::with_acquirer(nelo()).await;

        let found = store.find_by_provider("nelo").await.unwrap().unwrap();
        assert_eq!(found.provider(), "nelo");
        assert!(store.find_by_provider("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn redirect_url_cache_is_last_writer_wins() {
        let store = InMemoryAcquirerStore::with_acquirer(nelo()).await;

        store.cache_redirect_url("nelo", "https://a").await.unwrap();
        store.cache_redirect_url("nelo", "https://b").await.unwrap();

        let found = store.find_by_provider("nelo").await.unwrap().unwrap();
        assert_eq!(found.redirect_url(), Some("https://b"));
    }

    #[tokio::test]
    async fn caching_for_unknown_provider_fails() {
        let store = InMemoryAcquirerStore::new();
        let err = store.cache_redirect_url("nelo", "https://a").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AcquirerNotConfigured);
    }
}
