//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid host or port")]
    InvalidSocketAddr,

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Server request timeout ({server}s) must exceed the provider call timeout ({provider}s)")]
    TimeoutShorterThanProviderCall { server: u64, provider: u64 },

    #[error("Invalid public base URL (must be an absolute http(s) URL)")]
    InvalidPublicBaseUrl,

    #[error("Public base URL must use HTTPS in production")]
    PublicUrlMustBeHttps,

    #[error("Invalid provider REST URL (must be an absolute http(s) URL)")]
    InvalidRestUrl,

    #[error("Processing path must start with '/'")]
    InvalidProcessingPath,
}
