//! HTTP handlers for comment endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::application::handlers::comment::{
    AddCommentCommand, DeleteCommentCommand, ListCommentsQuery, UpdateCommentCommand,
};
use crate::domain::foundation::{CommentId, VideoId};

use crate::adapters::http::envelope::{json_body, ApiError, ApiResponse};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::params::PageParams;
use crate::adapters::http::state::AppState;

/// Body of comment create and update requests.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentRequest {
    #[serde(default)]
    pub content: String,
}

/// GET /comments/:videoId
pub async fn list_comments(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = ListCommentsQuery {
        video_id: VideoId::parse(&video_id)?,
        page: params.request()?,
    };
    let page = state.list_comments_handler().handle(query).await?;
    Ok(ApiResponse::ok(page, "Comments fetched successfully"))
}

/// POST /comments/:videoId
pub async fn add_comment(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(video_id): Path<String>,
    body: Result<Json<CommentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = AddCommentCommand {
        video_id: VideoId::parse(&video_id)?,
        owner: user.id,
        content: json_body(body)?.content,
    };
    let comment = state.add_comment_handler().handle(cmd).await?;
    Ok(ApiResponse::created(comment, "Comment added successfully"))
}

/// PATCH /comments/c/:commentId
pub async fn update_comment(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(comment_id): Path<String>,
    body: Result<Json<CommentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = UpdateCommentCommand {
        comment_id: CommentId::parse(&comment_id)?,
        caller: user.id,
        content: json_body(body)?.content,
    };
    let comment = state.update_comment_handler().handle(cmd).await?;
    Ok(ApiResponse::ok(comment, "Comment updated successfully"))
}

/// DELETE /comments/c/:commentId
pub async fn delete_comment(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(comment_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = DeleteCommentCommand {
        comment_id: CommentId::parse(&comment_id)?,
        caller: user.id,
    };
    state.delete_comment_handler().handle(cmd).await?;
    Ok(ApiResponse::ok(json!({}), "Comment deleted successfully"))
}
