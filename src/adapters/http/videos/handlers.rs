//! HTTP handlers for video endpoints.

use axum::extract::{Multipart, Path, Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::json;

use crate::application::handlers::video::{
    DeleteVideoCommand, ListVideosQuery, PublishVideoCommand, TogglePublishCommand,
    UpdateVideoCommand, WatchVideoQuery,
};
use crate::domain::foundation::VideoId;
use crate::domain::read_model::PageRequest;
use crate::domain::video::VideoListQuery;

use crate::adapters::http::envelope::{ApiError, ApiResponse};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::multipart::MultipartForm;
use crate::adapters::http::state::AppState;

/// `GET /videos` query string.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub sort_type: Option<String>,
    pub user_id: Option<String>,
}

impl VideoListParams {
    fn into_query(self) -> Result<ListVideosQuery, ApiError> {
        Ok(ListVideosQuery {
            filter: VideoListQuery::parse(
                self.sort_by.as_deref(),
                self.sort_type.as_deref(),
                self.user_id.as_deref(),
            )?,
            page: PageRequest::parse(self.page.as_deref(), self.limit.as_deref())?,
        })
    }
}

/// GET /videos
pub async fn list_videos(
    State(state): State<AppState>,
    Query(params): Query<VideoListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state.list_videos_handler().handle(params.into_query()?).await?;
    Ok(ApiResponse::ok(page, "Videos fetched successfully"))
}

/// POST /videos
pub async fn publish_video(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut form = MultipartForm::read(multipart).await?;
    let cmd = PublishVideoCommand {
        owner: user.id,
        title: form.text_or_empty("title"),
        description: form.text("description").map(str::to_string),
        duration: form.text("duration").map(str::to_string),
        video_file: form.take_file("videoFile"),
        thumbnail: form.take_file("thumbnail"),
    };
    let video = state.publish_video_handler().handle(cmd).await?;
    Ok(ApiResponse::created(video, "Video published successfully"))
}

/// GET /videos/:videoId
pub async fn watch_video(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(video_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let query = WatchVideoQuery {
        video_id: VideoId::parse(&video_id)?,
        viewer: user.id,
    };
    let video = state.watch_video_handler().handle(query).await?;
    Ok(ApiResponse::ok(video, "Video fetched successfully"))
}

/// PATCH /videos/:videoId
pub async fn update_video(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(video_id): Path<String>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let video_id = VideoId::parse(&video_id)?;
    let mut form = MultipartForm::read(multipart).await?;
    let cmd = UpdateVideoCommand {
        video_id,
        caller: user.id,
        title: form.text("title").map(str::to_string),
        description: form.text("description").map(str::to_string),
        thumbnail: form.take_file("thumbnail"),
    };
    let video = state.update_video_handler().handle(cmd).await?;
    Ok(ApiResponse::ok(video, "Video updated successfully"))
}

/// DELETE /videos/:videoId
pub async fn delete_video(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(video_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = DeleteVideoCommand {
        video_id: VideoId::parse(&video_id)?,
        caller: user.id,
    };
    state.delete_video_handler().handle(cmd).await?;
    Ok(ApiResponse::ok(json!({}), "Video deleted successfully"))
}

/// PATCH /videos/toggle/publish/:videoId
pub async fn toggle_publish(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(video_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = TogglePublishCommand {
        video_id: VideoId::parse(&video_id)?,
        caller: user.id,
    };
    let video = state.toggle_publish_handler().handle(cmd).await?;
    Ok(ApiResponse::ok(
        json!({ "isPublished": video.is_published }),
        "Publish status toggled successfully",
    ))
}
