//! Error handling for the tunedock-cli application
//!
//! This module provides a hierarchical error system with typed errors for the
//! concerns that can actually fail from the user's point of view. Note that
//! the search pipeline itself never surfaces errors: acquisition and parsing
//! failures are absorbed into catalog fallbacks. The errors here cover the
//! edges around it (configuration, CLI validation, startup).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TuneDockError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Relay delivery failed: {0}")]
    Delivery(#[from] crate::core::pipeline::relay::DeliveryError),

    #[error("API response invalid: {reason}")]
    InvalidResponse { reason: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid config format: {0}")]
    InvalidFormat(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Environment variable error: {0}")]
    Environment(#[from] std::env::VarError),
}

pub type Result<T> = std::result::Result<T, TuneDockError>;

impl From<std::io::Error> for TuneDockError {
    fn from(err: std::io::Error) -> Self {
        TuneDockError::Internal(err.into())
    }
}

impl From<toml::de::Error> for TuneDockError {
    fn from(err: toml::de::Error) -> Self {
        TuneDockError::Config(ConfigError::InvalidFormat(err))
    }
}

impl From<serde_json::Error> for TuneDockError {
    fn from(err: serde_json::Error) -> Self {
        TuneDockError::Internal(err.into())
    }
}
