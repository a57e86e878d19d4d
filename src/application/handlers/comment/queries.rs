//! Paginated comments of a video.

use std::sync::Arc;

use crate::application::handlers::support::ensure_exists;
use crate::domain::comment::{video_comments, CommentView};
use crate::domain::foundation::{DomainError, VideoId};
use crate::domain::read_model::{decode_row, PageRequest, PageResult};
use crate::domain::video::Video;
use crate::ports::DocumentStore;

#[derive(Debug, Clone)]
pub struct ListCommentsQuery {
    pub video_id: VideoId,
    pub page: PageRequest,
}

pub struct ListCommentsHandler {
    store: Arc<dyn DocumentStore>,
}

impl ListCommentsHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: ListCommentsQuery) -> Result<PageResult<CommentView>, DomainError> {
        ensure_exists::<Video, _>(self.store.as_ref(), query.video_id).await?;
        video_comments(query.video_id)
            .fetch_page(self.store.as_ref(), query.page)
            .await?
            .try_map(decode_row)
    }
}
