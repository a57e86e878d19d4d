//! Router for video endpoints.

use axum::{
    routing::{get, patch},
    Router,
};

use super::handlers::{
    delete_video, list_videos, publish_video, toggle_publish, update_video, watch_video,
};
use crate::adapters::http::state::AppState;

/// # Routes
///
/// - `GET /` - published videos (`page`, `limit`, `sortBy`, `sortType`, `userId`)
/// - `POST /` - upload a video (authenticated, multipart)
/// - `GET /:videoId` - watch; counts a view and records watch history (authenticated)
/// - `PATCH /:videoId`, `DELETE /:videoId` - owner only
/// - `PATCH /toggle/publish/:videoId` - owner only
pub fn video_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_videos).post(publish_video))
        .route(
            "/:videoId",
            get(watch_video).patch(update_video).delete(delete_video),
        )
        .route("/toggle/publish/:videoId", patch(toggle_publish))
}
