//! bcrypt implementation of the `PasswordHasher` port.
//!
//! Hashing runs on the blocking thread pool so it never stalls the
//! request executor.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::ports::PasswordHasher;

/// bcrypt password hasher with a configurable work factor.
#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

fn join_error(e: tokio::task::JoinError) -> DomainError {
    DomainError::internal(format!("Password hashing task failed: {}", e))
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, DomainError> {
        let password = password.to_string();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(join_error)?
            .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        let password = password.to_string();
        let hash = hash.to_string();
        let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(join_error)?;
        // A malformed stored hash can never match.
        Ok(verified.unwrap_or(false))
    }
}
