//! Acquirer (merchant account) configuration for the checkout provider.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Nelo REST base URL for live traffic.
pub const PRODUCTION_REST_URL: &str = "https://api-v2.nelo.co/v1";

/// Nelo REST base URL for the sandbox.
pub const SANDBOX_REST_URL: &str = "https://api-v2-dev.nelo.co/v1";

/// Which provider environment the merchant account talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcquirerEnvironment {
    #[default]
    Sandbox,
    Production,
}

impl AcquirerEnvironment {
    pub fn rest_url(&self) -> &'static str {
        match self {
            AcquirerEnvironment::Production => PRODUCTION_REST_URL,
            AcquirerEnvironment::Sandbox => SANDBOX_REST_URL,
        }
    }
}

/// Merchant credentials and endpoints for one provider.
///
/// Read-only to the payment core except for the cached redirect URL, which
/// the checkout provisioner overwrites on every new session.
#[derive(Debug, Clone)]
pub struct AcquirerConfig {
    provider: String,
    merchant_secret: SecretString,
    environment: AcquirerEnvironment,
    rest_url_override: Option<String>,
    redirect_url: Option<String>,
}

impl AcquirerConfig {
    pub fn new(
        provider: impl Into<String>,
        merchant_secret: impl Into<String>,
        environment: AcquirerEnvironment,
    ) -> Self {
        Self {
            provider: provider.into(),
            merchant_secret: SecretString::new(merchant_secret.into()),
            environment,
            rest_url_override: None,
            redirect_url: None,
        }
    }

    /// Points the acquirer at a different REST base URL (mock servers, proxies).
    pub fn with_rest_url(mut self, url: impl Into<String>) -> Self {
        self.rest_url_override = Some(url.into());
        self
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn merchant_secret(&self) -> &SecretString {
        &self.merchant_secret
    }

    pub fn environment(&self) -> AcquirerEnvironment {
        self.environment
    }

    /// REST base URL without a trailing slash.
    pub fn rest_url(&self) -> &str {
        self.rest_url_override
            .as_deref()
            .unwrap_or_else(|| self.environment.rest_url())
            .trim_end_matches('/')
    }

    /// Redirect URL of the most recently created checkout session.
    pub fn redirect_url(&self) -> Option<&str> {
        self.redirect_url.as_deref()
    }

    pub fn set_redirect_url(&mut self, url: impl Into<String>) {
        self.redirect_url = Some(url.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn rest_url_follows_environment() {
        let sandbox = AcquirerConfig::new("nelo", "secret", AcquirerEnvironment::Sandbox);
        let production = AcquirerConfig::new("nelo", "secret", AcquirerEnvironment::Production);

        assert_eq!(sandbox.rest_url(), "https://api-v2-dev.nelo.co/v1");
        assert_eq!(production.rest_url(), "https://api-v2.nelo.co/v1");
    }

    #[test]
    fn rest_url_override_wins_and_drops_trailing_slash() {
        let config = AcquirerConfig::new("nelo", "secret", AcquirerEnvironment::Production)
            .with_rest_url("http://127.0.0.1:9999/v1/");
        assert_eq!(config.rest_url(), "http://127.0.0.1:9999/v1");
    }

    #[test]
    fn debug_output_does_not_contain_secret() {
        let config = AcquirerConfig::new("nelo", "sk_super_secret", AcquirerEnvironment::Sandbox);
        let printed = format!("{:?}", config);
        assert!(!printed.contains("sk_super_secret"));
        assert_eq!(config.merchant_secret().expose_secret(), "sk_super_secret");
    }

    #[test]
    fn redirect_url_is_last_writer_wins() {
        let mut config = AcquirerConfig::new("nelo", "secret", AcquirerEnvironment::Sandbox);
        assert!(config.redirect_url().is_none());

        config.set_redirect_url("https://checkout.nelo.co/a");
        config.set_redirect_url("https://checkout.nelo.co/b");
        assert_eq!(config.redirect_url(), Some("https://checkout.nelo.co/b"));
    }

    #[test]
    fn environment_deserializes_lowercase() {
        let env: AcquirerEnvironment = serde_json::from_str("\"production\"").unwrap();
        assert_eq!(env, AcquirerEnvironment::Production);
    }
}
