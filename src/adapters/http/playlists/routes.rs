//! Router for playlist endpoints.

use axum::{
    routing::{get, patch, post},
    Router,
};

use super::handlers::{
    add_video, create_playlist, delete_playlist, get_playlist, remove_video, update_playlist,
    user_playlists,
};
use crate::adapters::http::state::AppState;

/// # Routes
///
/// - `POST /` - create (authenticated)
/// - `GET /user/:userId` - playlists of a user
/// - `GET /:playlistId` - one playlist with its videos
/// - `PATCH /:playlistId`, `DELETE /:playlistId` - owner only
/// - `PATCH /add/:videoId/:playlistId`, `PATCH /remove/:videoId/:playlistId` - owner only
pub fn playlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_playlist))
        .route("/user/:userId", get(user_playlists))
        .route(
            "/:playlistId",
            get(get_playlist).patch(update_playlist).delete(delete_playlist),
        )
        .route("/add/:videoId/:playlistId", patch(add_video))
        .route("/remove/:videoId/:playlistId", patch(remove_video))
}
