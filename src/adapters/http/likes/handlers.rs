//! HTTP handlers for like endpoints.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::handlers::like::{ListLikedVideosQuery, ToggleLikeCommand};
use crate::domain::foundation::{CommentId, TweetId, UserId, VideoId};
use crate::domain::like::LikeTarget;

use crate::adapters::http::envelope::{ApiError, ApiResponse};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::params::PageParams;
use crate::adapters::http::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatus {
    pub is_liked: bool,
}

async fn toggle(
    state: AppState,
    user_id: UserId,
    target: LikeTarget,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .toggle_like_handler()
        .handle(ToggleLikeCommand { user_id, target })
        .await?;
    let message = if result.liked {
        "Liked successfully"
    } else {
        "Unliked successfully"
    };
    Ok(ApiResponse::ok(
        LikeStatus {
            is_liked: result.liked,
        },
        message,
    ))
}

/// POST /likes/toggle/v/:videoId
pub async fn toggle_video_like(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(video_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let target = LikeTarget::Video(VideoId::parse(&video_id)?);
    toggle(state, user.id, target).await
}

/// POST /likes/toggle/c/:commentId
pub async fn toggle_comment_like(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(comment_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let target = LikeTarget::Comment(CommentId::parse(&comment_id)?);
    toggle(state, user.id, target).await
}

/// POST /likes/toggle/t/:tweetId
pub async fn toggle_tweet_like(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(tweet_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let target = LikeTarget::Tweet(TweetId::parse(&tweet_id)?);
    toggle(state, user.id, target).await
}

/// GET /likes/videos
pub async fn liked_videos(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = ListLikedVideosQuery {
        user_id: user.id,
        page: params.request()?,
    };
    let page = state.liked_videos_handler().handle(query).await?;
    Ok(ApiResponse::ok(page, "Liked videos fetched successfully"))
}
