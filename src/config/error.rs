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

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool size must be between 1 and {max}, got {got}")]
    InvalidPoolSize { got: u32, max: u32 },

    #[error("Token secret {0} must be at least 32 bytes")]
    WeakSecret(&'static str),

    #[error("Access and refresh token secrets must differ")]
    SharedSecrets,

    #[error("Token TTL {0} must be positive")]
    InvalidTokenTtl(&'static str),

    #[error("bcrypt cost must be between 4 and 31")]
    InvalidBcryptCost,

    #[error("Invalid max upload size")]
    InvalidUploadLimit,
}
