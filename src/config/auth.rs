//! Authentication configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Minimum secret length accepted outside development
const MIN_SECRET_BYTES: usize = 32;

/// Authentication configuration (HS256 access/refresh tokens)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Signing secret for access tokens
    pub access_token_secret: Secret<String>,

    /// Signing secret for refresh tokens
    pub refresh_token_secret: Secret<String>,

    /// Access token lifetime in seconds
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_secs: u64,

    /// Refresh token lifetime in seconds
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_secs: u64,

    /// bcrypt work factor
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// Get access token lifetime as Duration
    pub fn access_token_ttl(&self) -> Duration {
        Duration::from_secs(self.access_token_ttl_secs)
    }

    /// Get refresh token lifetime as Duration
    pub fn refresh_token_ttl(&self) -> Duration {
        Duration::from_secs(self.refresh_token_ttl_secs)
    }

    /// Validate authentication configuration
    ///
    /// Secrets must be present everywhere; outside development they must
    /// also be long and distinct.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let access = self.access_token_secret.expose_secret();
        let refresh = self.refresh_token_secret.expose_secret();

        if access.is_empty() {
            return Err(ValidationError::MissingRequired("VIDTUBE__AUTH__ACCESS_TOKEN_SECRET"));
        }
        if refresh.is_empty() {
            return Err(ValidationError::MissingRequired("VIDTUBE__AUTH__REFRESH_TOKEN_SECRET"));
        }
        if self.access_token_ttl_secs == 0 {
            return Err(ValidationError::InvalidTokenTtl("access_token_ttl_secs"));
        }
        if self.refresh_token_ttl_secs == 0 {
            return Err(ValidationError::InvalidTokenTtl("refresh_token_ttl_secs"));
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ValidationError::InvalidBcryptCost);
        }

        if *environment != Environment::Development {
            if access.len() < MIN_SECRET_BYTES {
                return Err(ValidationError::WeakSecret("access_token_secret"));
            }
            if refresh.len() < MIN_SECRET_BYTES {
                return Err(ValidationError::WeakSecret("refresh_token_secret"));
            }
            if access == refresh {
                return Err(ValidationError::SharedSecrets);
            }
        }

        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_secret: Secret::new(String::new()),
            refresh_token_secret: Secret::new(String::new()),
            access_token_ttl_secs: default_access_ttl(),
            refresh_token_ttl_secs: default_refresh_ttl(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

fn default_access_ttl() -> u64 {
    // 1 day
    86_400
}

fn default_refresh_ttl() -> u64 {
    // 10 days
    864_000
}

fn default_bcrypt_cost() -> u32 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(access: &str, refresh: &str) -> AuthConfig {
        AuthConfig {
            access_token_secret: Secret::new(access.to_string()),
            refresh_token_secret: Secret::new(refresh.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_auth_config_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.access_token_ttl(), Duration::from_secs(86_400));
        assert_eq!(config.refresh_token_ttl(), Duration::from_secs(864_000));
        assert_eq!(config.bcrypt_cost, 10);
    }

    #[test]
    fn test_validation_missing_secret() {
        let result = AuthConfig::default().validate(&Environment::Development);
        assert!(matches!(result, Err(ValidationError::MissingRequired(_))));
    }

    #[test]
    fn test_short_secrets_allowed_in_development() {
        assert!(config("dev-a", "dev-b").validate(&Environment::Development).is_ok());
    }

    #[test]
    fn test_short_secrets_rejected_in_production() {
        let result = config("short", "short-too").validate(&Environment::Production);
        assert_eq!(result, Err(ValidationError::WeakSecret("access_token_secret")));
    }

    #[test]
    fn test_shared_secrets_rejected_in_production() {
        let secret = "x".repeat(40);
        let result = config(&secret, &secret).validate(&Environment::Production);
        assert_eq!(result, Err(ValidationError::SharedSecrets));
    }

    #[test]
    fn test_invalid_bcrypt_cost() {
        let mut config = config("a", "b");
        config.bcrypt_cost = 2;
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidBcryptCost)
        );
    }

    #[test]
    fn test_debug_does_not_leak_secrets() {
        let config = config("super-secret-access", "super-secret-refresh");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
    }
}
