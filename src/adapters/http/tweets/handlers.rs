//! HTTP handlers for tweet endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::application::handlers::tweet::{
    CreateTweetCommand, DeleteTweetCommand, ListTweetsQuery, UpdateTweetCommand,
};
use crate::domain::foundation::{TweetId, UserId};

use crate::adapters::http::envelope::{json_body, ApiError, ApiResponse};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;

#[derive(Debug, Clone, Deserialize)]
pub struct TweetRequest {
    #[serde(default)]
    pub content: String,
}

/// POST /tweets
pub async fn create_tweet(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    body: Result<Json<TweetRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateTweetCommand {
        owner: user.id,
        content: json_body(body)?.content,
    };
    let tweet = state.create_tweet_handler().handle(cmd).await?;
    Ok(ApiResponse::created(tweet, "Tweet created successfully"))
}

/// GET /tweets
pub async fn all_tweets(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let tweets = state
        .list_tweets_handler()
        .handle(ListTweetsQuery::default())
        .await?;
    Ok(ApiResponse::ok(tweets, "Tweets fetched successfully"))
}

/// GET /tweets/user/:userId
pub async fn user_tweets(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let query = ListTweetsQuery {
        owner: Some(UserId::parse(&user_id)?),
    };
    let tweets = state.list_tweets_handler().handle(query).await?;
    Ok(ApiResponse::ok(tweets, "User tweets fetched successfully"))
}

/// PATCH /tweets/:tweetId
pub async fn update_tweet(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(tweet_id): Path<String>,
    body: Result<Json<TweetRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = UpdateTweetCommand {
        tweet_id: TweetId::parse(&tweet_id)?,
        caller: user.id,
        content: json_body(body)?.content,
    };
    let tweet = state.update_tweet_handler().handle(cmd).await?;
    Ok(ApiResponse::ok(tweet, "Tweet updated successfully"))
}

/// DELETE /tweets/:tweetId
pub async fn delete_tweet(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(tweet_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = DeleteTweetCommand {
        tweet_id: TweetId::parse(&tweet_id)?,
        caller: user.id,
    };
    state.delete_tweet_handler().handle(cmd).await?;
    Ok(ApiResponse::ok(json!({}), "Tweet deleted successfully"))
}
