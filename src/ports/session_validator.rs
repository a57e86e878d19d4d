//! Session validation port for access token validation.
//!
//! This port defines the contract for validating access tokens and
//! extracting the caller's identity. The production implementation signs
//! and verifies HS256 JWTs; tests use a token map.
//!
//! # Contract
//!
//! All implementations MUST:
//! - Verify the token signature
//! - Reject expired tokens with `AuthError::TokenExpired`
//! - Reject malformed or foreign tokens with `AuthError::InvalidToken`

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts user identity.
///
/// HTTP middleware uses this to validate the `accessToken` cookie or a
/// Bearer header and inject the authenticated user into the request.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate an access token and return the authenticated user.
    ///
    /// # Arguments
    ///
    /// * `token` - The raw token (without "Bearer " prefix)
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
