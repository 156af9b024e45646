//! HTTP listener configuration

use std::net::{IpAddr, SocketAddr};

use serde::Deserialize;

use super::error::ValidationError;

/// Listener, log filter and inbound timeout.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// IP address to bind; hostnames are not resolved
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub environment: Environment,

    /// `EnvFilter` directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Timeout for the JSON checkout endpoints. Provider redirects are exempt.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Deployment environment. Production switches on JSON logs and HTTPS checks.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        let ip: IpAddr = self
            .host
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidSocketAddr)?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.socket_addr()?;
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=300).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: Environment::default(),
            log_level: default_log_level(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info,nelo_checkout=debug,tower_http=info".to_string()
}

fn default_request_timeout() -> u64 {
    60
}
