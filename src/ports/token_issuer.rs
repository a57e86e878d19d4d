//! Token issuing port.
//!
//! Issues the access/refresh token pair handed out on login and refresh,
//! and verifies refresh tokens. The refresh token is also persisted on the
//! user document so a logout (or a newer login) revokes older ones.

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};

/// Freshly signed tokens for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Signs and verifies session tokens.
pub trait TokenIssuer: Send + Sync {
    /// Signs a new access and refresh token for `user`.
    fn issue(&self, user: &AuthenticatedUser) -> Result<TokenPair, AuthError>;

    /// Verifies a refresh token's signature and expiry, returning its subject.
    fn verify_refresh(&self, token: &str) -> Result<UserId, AuthError>;

    /// Lifetime of access tokens in seconds.
    fn access_ttl_secs(&self) -> u64;

    /// Lifetime of refresh tokens in seconds.
    fn refresh_ttl_secs(&self) -> u64;
}
