//! Authentication middleware and extractors for axum.
//!
//! - `auth_middleware` validates the caller's access token and injects the
//!   user into request extensions
//! - `RequireAuth` rejects requests without a valid token
//! - `OptionalAuth` yields the user when one is present
//!
//! ```text
//! Request → auth_middleware → AuthenticatedUser | AuthFailure in extensions
//!                                      ↓
//!                              Handler → RequireAuth / OptionalAuth
//! ```
//!
//! The token comes from `Authorization: Bearer <token>` or, failing that,
//! the `accessToken` cookie. An invalid token does not end the request
//! here: public routes such as login must keep working with a stale
//! cookie, so the failure is recorded and only `RequireAuth` reports it.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::adapters::http::cookies::{read_cookie, ACCESS_COOKIE};
use crate::adapters::http::envelope::ApiError;
use crate::domain::foundation::{AuthError, AuthenticatedUser, DomainError};
use crate::ports::SessionValidator;

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

/// Why a presented token was not accepted.
#[derive(Debug, Clone)]
pub struct AuthFailure(pub AuthError);

/// Access token from the Bearer header, else the `accessToken` cookie.
pub fn access_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    bearer.or_else(|| read_cookie(headers, ACCESS_COOKIE))
}

pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = access_token(request.headers()) {
        match validator.validate(&token).await {
            Ok(user) => {
                request.extensions_mut().insert(user);
            }
            Err(e) => {
                tracing::warn!(error = %e, path = %request.uri().path(), "rejected access token");
                request.extensions_mut().insert(AuthFailure(e));
            }
        }
    }
    next.run(request).await
}

/// Extractor that requires authentication.
///
/// ```ignore
/// async fn my_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
                return Ok(RequireAuth(user.clone()));
            }
            match parts.extensions.get::<AuthFailure>() {
                Some(AuthFailure(e)) => Err(AuthRejection::InvalidToken(e.clone())),
                None => Err(AuthRejection::Unauthenticated),
            }
        })
    }
}

/// Extractor for optional authentication.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

impl<S> axum::extract::FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let user = parts.extensions.get::<AuthenticatedUser>().cloned();
            Ok(OptionalAuth(user))
        })
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No token was presented.
    Unauthenticated,
    /// A token was presented but did not validate.
    InvalidToken(AuthError),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let err = match self {
            AuthRejection::Unauthenticated => DomainError::unauthorized("Unauthorized request"),
            AuthRejection::InvalidToken(e) => e.into(),
        };
        ApiError(err).into_response()
    }
}
