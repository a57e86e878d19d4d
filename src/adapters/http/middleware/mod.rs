//! HTTP middleware for axum.
//!
//! - `auth` - Access token middleware and the `RequireAuth` / `OptionalAuth` extractors

pub mod auth;

pub use auth::{auth_middleware, AuthFailure, AuthRejection, AuthState, OptionalAuth, RequireAuth};
