//! Router for tweet endpoints.

use axum::{
    routing::{get, patch},
    Router,
};

use super::handlers::{all_tweets, create_tweet, delete_tweet, update_tweet, user_tweets};
use crate::adapters::http::state::AppState;

/// # Routes
///
/// - `GET /` - all tweets; `POST /` - create (authenticated)
/// - `GET /user/:userId` - tweets of a user
/// - `PATCH /:tweetId`, `DELETE /:tweetId` - owner only
pub fn tweet_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(all_tweets).post(create_tweet))
        .route("/user/:userId", get(user_tweets))
        .route(
            "/:tweetId",
            patch(update_tweet).delete(delete_tweet),
        )
}
