//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::payment::{AcquirerConfig, AcquirerEnvironment};

use super::error::ValidationError;
use super::server::Environment;

/// Payment configuration (Nelo)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Provider name used as the URL segment and acquirer key
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Merchant bearer secret
    pub merchant_secret: SecretString,

    /// `sandbox` or `production`; selects the REST base URL
    #[serde(default)]
    pub environment: AcquirerEnvironment,

    /// Base URL the provider redirects buyers back to
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    /// Where confirm and cancel redirects send the buyer
    #[serde(default = "default_processing_path")]
    pub processing_path: String,

    /// Overrides the environment's REST base URL
    pub rest_url: Option<String>,

    /// Outbound request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl PaymentConfig {
    /// Build the acquirer configuration the store is seeded with.
    pub fn acquirer_config(&self) -> AcquirerConfig {
        let config = AcquirerConfig::new(
            self.provider.clone(),
            self.merchant_secret.expose_secret().clone(),
            self.environment,
        );
        match &self.rest_url {
            Some(url) => config.with_rest_url(url.clone()),
            None => config,
        }
    }

    /// Validate payment configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.provider.trim().is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__PROVIDER"));
        }
        if self.merchant_secret.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__MERCHANT_SECRET"));
        }

        let public_url = parse_http_url(&self.public_base_url)
            .ok_or(ValidationError::InvalidPublicBaseUrl)?;
        if *environment == Environment::Production && public_url.scheme() != "https" {
            return Err(ValidationError::PublicUrlMustBeHttps);
        }

        if let Some(rest_url) = &self.rest_url {
            parse_http_url(rest_url).ok_or(ValidationError::InvalidRestUrl)?;
        }

        if !self.processing_path.starts_with('/') {
            return Err(ValidationError::InvalidProcessingPath);
        }

        if self.request_timeout_secs == 0 || self.request_timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }

        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            merchant_secret: SecretString::new(String::new()),
            environment: AcquirerEnvironment::default(),
            public_base_url: default_public_base_url(),
            processing_path: default_processing_path(),
            rest_url: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn parse_http_url(value: &str) -> Option<reqwest::Url> {
    reqwest::Url::parse(value)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
}

fn default_provider() -> String {
    "nelo".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_processing_path() -> String {
    "/payment/process".to_string()
}

fn default_request_timeout() -> u64 {
    30
}
