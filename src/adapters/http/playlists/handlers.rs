//! HTTP handlers for playlist endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::application::handlers::playlist::{
    CreatePlaylistCommand, DeletePlaylistCommand, EditPlaylistVideosCommand, GetPlaylistQuery,
    ListUserPlaylistsQuery, PlaylistEdit, UpdatePlaylistCommand,
};
use crate::domain::foundation::{PlaylistId, UserId, VideoId};

use crate::adapters::http::envelope::{json_body, ApiError, ApiResponse};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaylistRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePlaylistRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// POST /playlist
pub async fn create_playlist(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    body: Result<Json<CreatePlaylistRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req = json_body(body)?;
    let cmd = CreatePlaylistCommand {
        owner: user.id,
        name: req.name,
        description: req.description,
    };
    let playlist = state.create_playlist_handler().handle(cmd).await?;
    Ok(ApiResponse::created(playlist, "Playlist created successfully"))
}

/// GET /playlist/user/:userId
pub async fn user_playlists(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let query = ListUserPlaylistsQuery {
        owner: UserId::parse(&user_id)?,
    };
    let playlists = state.user_playlists_handler().handle(query).await?;
    Ok(ApiResponse::ok(playlists, "User playlists fetched successfully"))
}

/// GET /playlist/:playlistId
pub async fn get_playlist(
    State(state): State<AppState>,
    Path(playlist_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetPlaylistQuery {
        playlist_id: PlaylistId::parse(&playlist_id)?,
    };
    let playlist = state.get_playlist_handler().handle(query).await?;
    Ok(ApiResponse::ok(playlist, "Playlist fetched successfully"))
}

/// PATCH /playlist/:playlistId
pub async fn update_playlist(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(playlist_id): Path<String>,
    body: Result<Json<UpdatePlaylistRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let playlist_id = PlaylistId::parse(&playlist_id)?;
    let req = json_body(body)?;
    let cmd = UpdatePlaylistCommand {
        playlist_id,
        caller: user.id,
        name: req.name,
        description: req.description,
    };
    let playlist = state.update_playlist_handler().handle(cmd).await?;
    Ok(ApiResponse::ok(playlist, "Playlist updated successfully"))
}

/// DELETE /playlist/:playlistId
pub async fn delete_playlist(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(playlist_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = DeletePlaylistCommand {
        playlist_id: PlaylistId::parse(&playlist_id)?,
        caller: user.id,
    };
    state.delete_playlist_handler().handle(cmd).await?;
    Ok(ApiResponse::ok(json!({}), "Playlist deleted successfully"))
}

async fn edit_videos(
    state: AppState,
    caller: UserId,
    (video_id, playlist_id): (String, String),
    edit: PlaylistEdit,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = EditPlaylistVideosCommand {
        playlist_id: PlaylistId::parse(&playlist_id)?,
        video_id: VideoId::parse(&video_id)?,
        caller,
        edit,
    };
    let playlist = state.edit_playlist_videos_handler().handle(cmd).await?;
    let message = match edit {
        PlaylistEdit::Add => "Video added to playlist successfully",
        PlaylistEdit::Remove => "Video removed from playlist successfully",
    };
    Ok(ApiResponse::ok(playlist, message))
}

/// PATCH /playlist/add/:videoId/:playlistId
pub async fn add_video(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(ids): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    edit_videos(state, user.id, ids, PlaylistEdit::Add).await
}

/// PATCH /playlist/remove/:videoId/:playlistId
pub async fn remove_video(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(ids): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    edit_videos(state, user.id, ids, PlaylistEdit::Remove).await
}
