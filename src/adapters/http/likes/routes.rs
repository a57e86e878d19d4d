//! Router for like endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{liked_videos, toggle_comment_like, toggle_tweet_like, toggle_video_like};
use crate::adapters::http::state::AppState;

/// # Routes (all authenticated)
///
/// - `POST /toggle/v/:videoId`, `/toggle/c/:commentId`, `/toggle/t/:tweetId`
/// - `GET /videos` - videos the caller liked (`page`, `limit`)
pub fn like_routes() -> Router<AppState> {
    Router::new()
        .route("/toggle/v/:videoId", post(toggle_video_like))
        .route("/toggle/c/:commentId", post(toggle_comment_like))
        .route("/toggle/t/:tweetId", post(toggle_tweet_like))
        .route("/videos", get(liked_videos))
}
