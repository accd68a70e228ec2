//! API configuration
//!
//! Read from `API_`-prefixed environment variables (after `.env` is loaded),
//! falling back to the defaults below for anything unset.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use core_kernel::{Currency, Timezone};

/// Configuration that could not be read or cannot be run with
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Maximum connections in the database pool
    pub max_connections: u32,
    /// Log level, used when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// Seconds between two expiration sweeps
    pub expiration_interval_secs: u64,
    /// Timezone deciding which calendar day a policy expired on
    pub expiration_timezone: Timezone,
    /// Currency claim amounts are shown in, as an ISO code
    pub currency: Currency,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/car_insurance".to_string(),
            max_connections: 10,
            log_level: "info".to_string(),
            log_json: false,
            expiration_interval_secs: 3600,
            expiration_timezone: Timezone::default(),
            currency: Currency::USD,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Rejects settings the server cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::Invalid("API_DATABASE_URL must be set"));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::Invalid("API_MAX_CONNECTIONS must be at least 1"));
        }
        if self.expiration_interval_secs == 0 {
            return Err(ConfigError::Invalid("API_EXPIRATION_INTERVAL_SECS must be at least 1"));
        }
        Ok(())
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn expiration_interval(&self) -> Duration {
        Duration::from_secs(self.expiration_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();

        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.expiration_interval(), Duration::from_secs(3600));
        assert_eq!(config.currency, Currency::USD);
        assert_eq!(config.expiration_timezone.name(), "UTC");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let config = ApiConfig {
            expiration_interval_secs: 0,
            ..ApiConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_deserializes_from_partial_source() {
        let config: ApiConfig = config::Config::builder()
            .set_override("port", 9090)
            .unwrap()
            .set_override("expiration_timezone", "Europe/Bucharest")
            .unwrap()
            .set_override("currency", "ron")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.expiration_timezone.name(), "Europe/Bucharest");
        assert_eq!(config.currency, Currency::RON);
    }
}
