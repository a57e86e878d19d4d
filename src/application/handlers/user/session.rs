//! Session handlers: login, logout and refresh-token rotation.
//!
//! The refresh token most recently issued to a user is stored on the user
//! document. Logging out clears it, and a refresh only succeeds with the
//! token on record, so each refresh token can be used once.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::handlers::support::{load, update};
use crate::domain::foundation::{DomainError, UserId, ValidationError};
use crate::domain::read_model::{Collection, Filter, StoredEntity};
use crate::domain::user::{normalize_email, normalize_username, RefreshTokenChange, User};
use crate::ports::{DocumentStore, PasswordHasher, TokenIssuer, TokenPair};

/// Command to log in with a username or an email.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: String,
}

/// A signed-in user and their new tokens.
#[derive(Debug, Clone)]
pub struct SessionResult {
    pub user: User,
    pub tokens: TokenPair,
}

/// Handler for logging in.
pub struct LoginHandler {
    store: Arc<dyn DocumentStore>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl LoginHandler {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<SessionResult, DomainError> {
        // 1. Find the user by username, then by email
        let user = self.find_user(&cmd).await?;

        // 2. Check the password
        if !self.hasher.verify(&cmd.password, &user.password).await? {
            warn!(user_id = %user.id, "Login rejected: wrong password");
            return Err(DomainError::unauthorized("Invalid user credentials"));
        }

        // 3. Issue tokens and record the refresh token
        let tokens = issue_and_record(self.store.as_ref(), self.tokens.as_ref(), &user).await?;

        info!(user_id = %user.id, "User logged in");
        Ok(SessionResult { user, tokens })
    }

    async fn find_user(&self, cmd: &LoginCommand) -> Result<User, DomainError> {
        let mut lookups = Vec::new();
        if let Some(raw) = cmd.username.as_deref().filter(|s| !s.trim().is_empty()) {
            lookups.push(("username", normalize_username(raw)?));
        }
        if let Some(raw) = cmd.email.as_deref().filter(|s| !s.trim().is_empty()) {
            lookups.push(("email", normalize_email(raw)?));
        }
        if lookups.is_empty() {
            return Err(
                ValidationError::invalid_format("username", "username or email is required").into(),
            );
        }

        for (field, value) in lookups {
            let filter = Filter::all().eq(field, value);
            if let Some(document) = self.store.find_one(Collection::Users, &filter).await? {
                return User::from_document(&document);
            }
        }
        Err(DomainError::not_found("User", "credentials"))
    }
}

/// Command to end the caller's session.
#[derive(Debug, Clone)]
pub struct LogoutCommand {
    pub user_id: UserId,
}

/// Handler for logging out.
pub struct LogoutHandler {
    store: Arc<dyn DocumentStore>,
}

impl LogoutHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: LogoutCommand) -> Result<(), DomainError> {
        let _: User = update(
            self.store.as_ref(),
            cmd.user_id,
            &RefreshTokenChange {
                refresh_token: None,
            },
        )
        .await?;
        info!(user_id = %cmd.user_id, "User logged out");
        Ok(())
    }
}

/// Command to trade a refresh token for a new token pair.
#[derive(Debug, Clone)]
pub struct RefreshSessionCommand {
    pub refresh_token: Option<String>,
}

/// Handler for refresh-token rotation.
pub struct RefreshSessionHandler {
    store: Arc<dyn DocumentStore>,
    tokens: Arc<dyn TokenIssuer>,
}

impl RefreshSessionHandler {
    pub fn new(store: Arc<dyn DocumentStore>, tokens: Arc<dyn TokenIssuer>) -> Self {
        Self { store, tokens }
    }

    pub async fn handle(&self, cmd: RefreshSessionCommand) -> Result<SessionResult, DomainError> {
        // 1. Verify the token itself
        let token = cmd
            .refresh_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| DomainError::unauthorized("Unauthorized request"))?;
        let user_id = self.tokens.verify_refresh(&token)?;

        // 2. It must be the token on record
        let user: User = load(self.store.as_ref(), user_id)
            .await
            .map_err(|_| DomainError::unauthorized("Invalid refresh token"))?;
        if !user.holds_refresh_token(&token) {
            warn!(user_id = %user.id, "Refresh rejected: token is not the one on record");
            return Err(DomainError::unauthorized("Refresh token is expired or used"));
        }

        // 3. Rotate
        let tokens = issue_and_record(self.store.as_ref(), self.tokens.as_ref(), &user).await?;
        info!(user_id = %user.id, "Session refreshed");
        Ok(SessionResult { user, tokens })
    }
}

async fn issue_and_record(
    store: &dyn DocumentStore,
    issuer: &dyn TokenIssuer,
    user: &User,
) -> Result<TokenPair, DomainError> {
    let tokens = issuer.issue(&user.to_authenticated())?;
    let _: User = update(
        store,
        user.id,
        &RefreshTokenChange {
            refresh_token: Some(tokens.refresh_token.clone()),
        },
    )
    .await?;
    Ok(tokens)
}
