//! Router for comment endpoints.

use axum::{
    routing::{get, patch},
    Router,
};

use super::handlers::{add_comment, delete_comment, list_comments, update_comment};
use crate::adapters::http::state::AppState;

/// # Routes
///
/// - `GET /:videoId` - comments of a video, newest first (`page`, `limit`)
/// - `POST /:videoId` - add a comment (authenticated)
/// - `PATCH /c/:commentId`, `DELETE /c/:commentId` - author only
pub fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/:videoId", get(list_comments).post(add_comment))
        .route("/c/:commentId", patch(update_comment).delete(delete_comment))
}
