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

    #[error("{name} must be at most {max} ms")]
    DelayTooLong { name: &'static str, max: u64 },

    #[error("Storage quota must be greater than zero")]
    InvalidQuota,

    #[error("Session max age must be greater than zero")]
    InvalidMaxAge,
}
