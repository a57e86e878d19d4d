//! Password hashing port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// One-way password hashing.
///
/// Hashing is deliberately slow; implementations must not block the async
/// runtime while doing it.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password for storage.
    async fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Checks a plaintext password against a stored hash.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}
