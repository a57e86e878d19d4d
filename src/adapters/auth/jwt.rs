//! HS256 JWT adapter for session tokens.
//!
//! Implements both the `SessionValidator` and `TokenIssuer` ports:
//!
//! 1. Access tokens carry the user id, username and email and are signed
//!    with the access secret
//! 2. Refresh tokens carry only the user id and are signed with a separate
//!    refresh secret, so one can never be used as the other
//! 3. Expiry (exp) is always validated; `typ` must match the expected kind
//!
//! # Example
//!
//! ```ignore
//! let tokens = JwtTokenService::from_config(&config.auth);
//! let pair = tokens.issue(&user)?;
//! let caller = tokens.validate(&pair.access_token).await?;
//! ```

use async_trait::async_trait;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::domain::foundation::{AuthError, AuthenticatedUser, Timestamp, UserId};
use crate::ports::{SessionValidator, TokenIssuer, TokenPair};

const ACCESS: &str = "access";
const REFRESH: &str = "refresh";

/// Claims of an access token.
#[derive(Debug, Serialize, Deserialize)]
struct AccessClaims {
    /// Subject - the user id
    sub: String,
    username: String,
    email: String,
    typ: String,
    /// Expiry timestamp (Unix epoch seconds)
    exp: u64,
    iat: u64,
    jti: String,
}

/// Claims of a refresh token.
#[derive(Debug, Serialize, Deserialize)]
struct RefreshClaims {
    sub: String,
    typ: String,
    exp: u64,
    iat: u64,
    jti: String,
}

/// Signs and validates HS256 session tokens.
#[derive(Clone)]
pub struct JwtTokenService {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl_secs: u64,
    refresh_ttl_secs: u64,
}

impl JwtTokenService {
    pub fn new(
        access_secret: &[u8],
        refresh_secret: &[u8],
        access_ttl_secs: u64,
        refresh_ttl_secs: u64,
    ) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(access_secret),
            access_decoding: DecodingKey::from_secret(access_secret),
            refresh_encoding: EncodingKey::from_secret(refresh_secret),
            refresh_decoding: DecodingKey::from_secret(refresh_secret),
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            config.access_token_secret.expose_secret().as_bytes(),
            config.refresh_token_secret.expose_secret().as_bytes(),
            config.access_token_ttl_secs,
            config.refresh_token_ttl_secs,
        )
    }

    fn sign<T: Serialize>(claims: &T, key: &EncodingKey) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, key)
            .map_err(|e| AuthError::SigningFailed(e.to_string()))
    }

    fn verify<T: DeserializeOwned>(token: &str, key: &DecodingKey) -> Result<T, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<T>(token, key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                _ => {
                    tracing::warn!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            })
    }

    fn parse_subject(sub: &str) -> Result<UserId, AuthError> {
        UserId::parse(sub).map_err(|_| AuthError::InvalidToken)
    }
}

impl TokenIssuer for JwtTokenService {
    fn issue(&self, user: &AuthenticatedUser) -> Result<TokenPair, AuthError> {
        let now = Timestamp::now();
        let access = AccessClaims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            typ: ACCESS.to_string(),
            exp: now.plus_secs(self.access_ttl_secs).as_unix_secs(),
            iat: now.as_unix_secs(),
            jti: Uuid::new_v4().to_string(),
        };
        let refresh = RefreshClaims {
            sub: user.id.to_string(),
            typ: REFRESH.to_string(),
            exp: now.plus_secs(self.refresh_ttl_secs).as_unix_secs(),
            iat: now.as_unix_secs(),
            jti: Uuid::new_v4().to_string(),
        };

        Ok(TokenPair {
            access_token: Self::sign(&access, &self.access_encoding)?,
            refresh_token: Self::sign(&refresh, &self.refresh_encoding)?,
        })
    }

    fn verify_refresh(&self, token: &str) -> Result<UserId, AuthError> {
        let claims: RefreshClaims = Self::verify(token, &self.refresh_decoding)?;
        if claims.typ != REFRESH {
            return Err(AuthError::InvalidToken);
        }
        Self::parse_subject(&claims.sub)
    }

    fn access_ttl_secs(&self) -> u64 {
        self.access_ttl_secs
    }

    fn refresh_ttl_secs(&self) -> u64 {
        self.refresh_ttl_secs
    }
}

#[async_trait]
impl SessionValidator for JwtTokenService {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims: AccessClaims = Self::verify(token, &self.access_decoding)?;
        if claims.typ != ACCESS {
            return Err(AuthError::InvalidToken);
        }
        let id = Self::parse_subject(&claims.sub)?;
        Ok(AuthenticatedUser::new(id, claims.username, claims.email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtTokenService {
        JwtTokenService::new(b"access-secret", b"refresh-secret", 60, 600)
    }

    fn user() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(), "ana", "ana@example.com")
    }

    #[tokio::test]
    async fn issued_access_token_validates() {
        let tokens = service();
        let user = user();
        let pair = tokens.issue(&user).unwrap();

        let validated = tokens.validate(&pair.access_token).await.unwrap();
        assert_eq!(validated, user);
    }

    #[test]
    fn issued_refresh_token_verifies() {
        let tokens = service();
        let user = user();
        let pair = tokens.issue(&user).unwrap();

        assert_eq!(tokens.verify_refresh(&pair.refresh_token).unwrap(), user.id);
    }

    #[test]
    fn consecutive_pairs_differ() {
        let tokens = service();
        let user = user();
        let a = tokens.issue(&user).unwrap();
        let b = tokens.issue(&user).unwrap();
        assert_ne!(a.refresh_token, b.refresh_token);
    }

    #[tokio::test]
    async fn tokens_are_not_interchangeable() {
        let tokens = service();
        let pair = tokens.issue(&user()).unwrap();

        assert_eq!(
            tokens.validate(&pair.refresh_token).await.unwrap_err(),
            AuthError::InvalidToken
        );
        assert_eq!(
            tokens.verify_refresh(&pair.access_token).unwrap_err(),
            AuthError::InvalidToken
        );
    }

    #[tokio::test]
    async fn expired_token_is_reported() {
        let tokens = service();
        let claims = AccessClaims {
            sub: UserId::new().to_string(),
            username: "ana".into(),
            email: "ana@example.com".into(),
            typ: ACCESS.into(),
            exp: 1_000,
            iat: 900,
            jti: "x".into(),
        };
        let token = JwtTokenService::sign(&claims, &EncodingKey::from_secret(b"access-secret")).unwrap();

        assert_eq!(tokens.validate(&token).await.unwrap_err(), AuthError::TokenExpired);
    }

    #[tokio::test]
    async fn garbage_is_invalid() {
        assert_eq!(
            service().validate("not.a.jwt").await.unwrap_err(),
            AuthError::InvalidToken
        );
    }
}
