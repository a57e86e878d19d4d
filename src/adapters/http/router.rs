//! Assembles the versioned API router.

use axum::http::Uri;
use axum::routing::get;
use axum::{middleware, Router};

use crate::domain::foundation::DomainError;

use super::comments::comment_routes;
use super::envelope::ApiError;
use super::health::healthcheck;
use super::likes::like_routes;
use super::middleware::auth_middleware;
use super::playlists::playlist_routes;
use super::state::AppState;
use super::subscriptions::subscription_routes;
use super::tweets::tweet_routes;
use super::users::user_routes;
use super::videos::video_routes;

/// Prefix of every API route.
pub const API_PREFIX: &str = "/api/v1";

/// All API routes under [`API_PREFIX`], behind the auth middleware.
pub fn api_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/healthcheck", get(healthcheck))
        .nest("/users", user_routes())
        .nest("/videos", video_routes())
        .nest("/comments", comment_routes())
        .nest("/likes", like_routes())
        .nest("/playlist", playlist_routes())
        .nest("/tweets", tweet_routes())
        .nest("/subscriptions", subscription_routes());

    Router::new()
        .nest(API_PREFIX, api)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.session_validator.clone(),
            auth_middleware,
        ))
        .with_state(state)
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError(DomainError::not_found("Route", uri.path()))
}
