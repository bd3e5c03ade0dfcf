//! Store API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults suitable for local development.

use serde::{Deserialize, Serialize};
use std::env;

/// Store API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// HTTP listen port
    pub http_port: u16,

    /// Path to the SQLite database file
    pub database_path: String,

    /// Secret key for validating operator tokens
    pub jwt_secret: String,

    /// Token lifetime in seconds (used when minting operator tokens)
    pub jwt_lifetime_secs: i64,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = StoreConfig {
            http_port: env::var("STORE_HTTP_PORT")
                .unwrap_or_else(|_| "8600".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("STORE_HTTP_PORT".to_string()))?,

            database_path: env::var("STORE_DATABASE_PATH")
                .unwrap_or_else(|_| "./data/medstock.db".to_string()),

            jwt_secret: env::var("STORE_JWT_SECRET")
                // In production, this MUST be set via environment variable
                .unwrap_or_else(|_| "medstock-dev-secret-change-in-production".to_string()),

            jwt_lifetime_secs: env::var("STORE_JWT_LIFETIME_SECS")
                .unwrap_or_else(|_| "43200".to_string()) // one 12-hour shift
                .parse()
                .map_err(|_| ConfigError::InvalidValue("STORE_JWT_LIFETIME_SECS".to_string()))?,
        };

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_load() {
        // With no env overrides present the defaults must parse.
        let config = StoreConfig::load().unwrap();
        assert!(config.http_port > 0);
        assert!(!config.jwt_secret.is_empty());
        assert!(config.jwt_lifetime_secs > 0);
    }
}
