//! PublishVideoHandler - Command handler for video uploads.

use std::sync::Arc;

use tracing::info;

use crate::application::handlers::support::create;
use crate::domain::foundation::{DomainError, UserId, ValidationError};
use crate::domain::video::{Video, VideoDetails};
use crate::ports::{DocumentStore, MediaStorage, MediaUpload};

/// Command to upload and publish a video.
#[derive(Debug, Clone)]
pub struct PublishVideoCommand {
    pub owner: UserId,
    pub title: String,
    pub description: Option<String>,
    /// Length in seconds as sent by the client.
    pub duration: Option<String>,
    pub video_file: Option<MediaUpload>,
    pub thumbnail: Option<MediaUpload>,
}

pub struct PublishVideoHandler {
    store: Arc<dyn DocumentStore>,
    media: Arc<dyn MediaStorage>,
}

impl PublishVideoHandler {
    pub fn new(store: Arc<dyn DocumentStore>, media: Arc<dyn MediaStorage>) -> Self {
        Self { store, media }
    }

    pub async fn handle(&self, cmd: PublishVideoCommand) -> Result<Video, DomainError> {
        // 1. Validate metadata and required files
        let details = VideoDetails::new(
            &cmd.title,
            cmd.description.as_deref(),
            cmd.duration.as_deref(),
        )?;
        let video_file = cmd
            .video_file
            .ok_or_else(|| ValidationError::invalid_format("videoFile", "Video file is required"))?;
        let thumbnail = cmd
            .thumbnail
            .ok_or_else(|| ValidationError::invalid_format("thumbnail", "Thumbnail is required"))?;

        // 2. Upload
        let video_url = self.media.store(video_file).await?;
        let thumbnail_url = self.media.store(thumbnail).await?;

        // 3. Persist
        let video: Video = create(
            self.store.as_ref(),
            &details.into_new_video(cmd.owner, video_url, thumbnail_url),
        )
        .await?;

        info!(video_id = %video.id, owner = %video.owner, "Video published");
        Ok(video)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::support::fakes::{store, upload, RecordingMedia};
    use crate::domain::foundation::ErrorCode;

    fn command(owner: UserId) -> PublishVideoCommand {
        PublishVideoCommand {
            owner,
            title: "Intro".into(),
            description: Some("first".into()),
            duration: Some("61.5".into()),
            video_file: Some(upload("intro.mp4")),
            thumbnail: Some(upload("intro.png")),
        }
    }

    #[tokio::test]
    async fn publishes_with_uploaded_urls() {
        let owner = UserId::new();
        let video = PublishVideoHandler::new(store(), Arc::new(RecordingMedia::default()))
            .handle(command(owner))
            .await
            .unwrap();

        assert_eq!(video.owner, owner);
        assert_eq!(video.video_file, "/media/0-intro.mp4");
        assert_eq!(video.thumbnail, "/media/1-intro.png");
        assert_eq!(video.duration, 61.5);
        assert!(video.is_published);
    }

    #[tokio::test]
    async fn missing_file_is_rejected_without_upload() {
        let media = Arc::new(RecordingMedia::default());
        let mut cmd = command(UserId::new());
        cmd.thumbnail = None;

        let err = PublishVideoHandler::new(store(), media.clone())
            .handle(cmd)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(media.stored.lock().unwrap().is_empty());
    }
}
