//! Owner-only video commands: update, delete and publish toggle.

use std::sync::Arc;

use tracing::info;

use crate::application::handlers::support::{discard_media, load, remove, update};
use crate::domain::foundation::{DomainError, OwnedByUser, UserId, VideoId};
use crate::domain::read_model::{Collection, Filter};
use crate::domain::video::{Video, VideoChanges};
use crate::ports::{DocumentStore, MediaStorage, MediaUpload};

/// Command to change a video's title, description or thumbnail.
#[derive(Debug, Clone)]
pub struct UpdateVideoCommand {
    pub video_id: VideoId,
    pub caller: UserId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<MediaUpload>,
}

pub struct UpdateVideoHandler {
    store: Arc<dyn DocumentStore>,
    media: Arc<dyn MediaStorage>,
}

impl UpdateVideoHandler {
    pub fn new(store: Arc<dyn DocumentStore>, media: Arc<dyn MediaStorage>) -> Self {
        Self { store, media }
    }

    pub async fn handle(&self, cmd: UpdateVideoCommand) -> Result<Video, DomainError> {
        // 1. Validate the text changes
        let mut changes = VideoChanges::new(cmd.title.as_deref(), cmd.description.as_deref())?;
        if changes.is_empty() && cmd.thumbnail.is_none() {
            return Err(DomainError::validation(
                "title",
                "Provide a title, description or thumbnail to update",
            ));
        }

        // 2. Check ownership
        let video: Video = load(self.store.as_ref(), cmd.video_id).await?;
        video.check_ownership(&cmd.caller)?;

        // 3. Upload the new thumbnail and persist
        let replaced = cmd.thumbnail.is_some();
        if let Some(upload) = cmd.thumbnail {
            changes = changes.with_thumbnail(self.media.store(upload).await?);
        }
        let updated: Video = update(self.store.as_ref(), video.id, &changes).await?;

        // 4. Drop the superseded thumbnail
        if replaced {
            discard_media(self.media.as_ref(), &video.thumbnail).await;
        }

        info!(video_id = %updated.id, "Video updated");
        Ok(updated)
    }
}

/// Command to delete a video together with its likes and comments.
#[derive(Debug, Clone)]
pub struct DeleteVideoCommand {
    pub video_id: VideoId,
    pub caller: UserId,
}

pub struct DeleteVideoHandler {
    store: Arc<dyn DocumentStore>,
    media: Arc<dyn MediaStorage>,
}

impl DeleteVideoHandler {
    pub fn new(store: Arc<dyn DocumentStore>, media: Arc<dyn MediaStorage>) -> Self {
        Self { store, media }
    }

    pub async fn handle(&self, cmd: DeleteVideoCommand) -> Result<(), DomainError> {
        let video: Video = load(self.store.as_ref(), cmd.video_id).await?;
        video.check_ownership(&cmd.caller)?;

        // Dependents go first so a failed cascade can be retried.
        let by_video = Filter::all().eq("video", video.id.to_value());
        let comment_ids: Vec<_> = self
            .store
            .find(Collection::Comments, &by_video)
            .await?
            .iter()
            .map(|comment| comment.id().to_value())
            .collect();
        let mut likes = self.store.delete_many(Collection::Likes, &by_video).await?;
        if !comment_ids.is_empty() {
            likes += self
                .store
                .delete_many(Collection::Likes, &Filter::all().is_in("comment", comment_ids))
                .await?;
        }
        let comments = self.store.delete_many(Collection::Comments, &by_video).await?;
        remove::<Video, _>(self.store.as_ref(), video.id).await?;

        discard_media(self.media.as_ref(), &video.video_file).await;
        discard_media(self.media.as_ref(), &video.thumbnail).await;

        info!(video_id = %video.id, likes, comments, "Video deleted");
        Ok(())
    }
}

/// Command to publish or unpublish a video.
#[derive(Debug, Clone)]
pub struct TogglePublishCommand {
    pub video_id: VideoId,
    pub caller: UserId,
}

pub struct TogglePublishHandler {
    store: Arc<dyn DocumentStore>,
}

impl TogglePublishHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: TogglePublishCommand) -> Result<Video, DomainError> {
        let video: Video = load(self.store.as_ref(), cmd.video_id).await?;
        video.check_ownership(&cmd.caller)?;

        let video: Video = update(self.store.as_ref(), video.id, &video.publish_toggled()).await?;
        info!(video_id = %video.id, is_published = video.is_published, "Video publish state toggled");
        Ok(video)
    }
}
