//! Video queries: the published listing and the watch page.

use std::sync::Arc;

use tracing::debug;

use crate::application::handlers::support::{fetch_view, load, update};
use crate::domain::foundation::{DomainError, UserId, VideoId};
use crate::domain::read_model::{decode_row, PageRequest, PageResult};
use crate::domain::user::{User, WatchHistoryChange};
use crate::domain::video::{
    published_videos, video_detail, Video, VideoCard, VideoDetail, VideoListQuery,
};
use crate::ports::DocumentStore;

/// Query for one page of published videos.
#[derive(Debug, Clone, Default)]
pub struct ListVideosQuery {
    pub filter: VideoListQuery,
    pub page: PageRequest,
}

pub struct ListVideosHandler {
    store: Arc<dyn DocumentStore>,
}

impl ListVideosHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: ListVideosQuery) -> Result<PageResult<VideoCard>, DomainError> {
        published_videos(&query.filter)
            .fetch_page(self.store.as_ref(), query.page)
            .await?
            .try_map(decode_row)
    }
}

/// Query for the watch page of a video.
///
/// Watching counts a view and moves the video to the end of the viewer's
/// watch history before the detail is read.
#[derive(Debug, Clone)]
pub struct WatchVideoQuery {
    pub video_id: VideoId,
    pub viewer: UserId,
}

pub struct WatchVideoHandler {
    store: Arc<dyn DocumentStore>,
}

impl WatchVideoHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: WatchVideoQuery) -> Result<VideoDetail, DomainError> {
        // 1. Unpublished videos exist only for their owner
        let video: Video = load(self.store.as_ref(), query.video_id).await?;
        if !video.is_visible_to(Some(&query.viewer)) {
            return Err(DomainError::not_found("Video", query.video_id));
        }

        // 2. Count the view and record history
        let _: Video = update(self.store.as_ref(), video.id, &video.viewed()).await?;
        let viewer: User = load(self.store.as_ref(), query.viewer).await?;
        let _: User = update(
            self.store.as_ref(),
            viewer.id,
            &WatchHistoryChange {
                watch_history: viewer.watch_history_with(video.id),
            },
        )
        .await?;
        debug!(video_id = %video.id, viewer = %viewer.id, "Video watched");

        // 3. Read the detail view
        fetch_view(
            self.store.as_ref(),
            video_detail(video.id, Some(query.viewer)),
            "Video",
            video.id,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::support::create;
    use crate::application::handlers::support::fakes::{seed_user, store};
    use crate::domain::foundation::ErrorCode;
    use crate::domain::read_model::SortDirection;
    use crate::domain::video::{VideoDetails, VideoSortKey};

    async fn seed_video(store: &dyn DocumentStore, owner: UserId, title: &str, published: bool) -> Video {
        let mut new_video = VideoDetails::new(title, None, None)
            .unwrap()
            .into_new_video(owner, "/media/v.mp4".into(), "/media/t.png".into());
        new_video.is_published = published;
        create(store, &new_video).await.unwrap()
    }

    #[tokio::test]
    async fn listing_skips_unpublished_and_embeds_owner() {
        let store = store();
        let ana = seed_user(store.as_ref(), "ana").await;
        seed_video(store.as_ref(), ana.id, "b", true).await;
        seed_video(store.as_ref(), ana.id, "hidden", false).await;
        seed_video(store.as_ref(), ana.id, "a", true).await;

        let page = ListVideosHandler::new(store.clone())
            .handle(ListVideosQuery {
                filter: VideoListQuery {
                    owner: Some(ana.id),
                    sort_by: VideoSortKey::Title,
                    direction: Some(SortDirection::Ascending),
                },
                page: PageRequest::default(),
            })
            .await
            .unwrap();

        assert_eq!(page.total_items, 2);
        let titles: Vec<_> = page.items.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b"]);
        assert_eq!(page.items[0].owner.as_ref().unwrap().username, "ana");
    }

    #[tokio::test]
    async fn watching_counts_view_and_records_history() {
        let store = store();
        let ana = seed_user(store.as_ref(), "ana").await;
        let bo = seed_user(store.as_ref(), "bo").await;
        let first = seed_video(store.as_ref(), ana.id, "first", true).await;
        let second = seed_video(store.as_ref(), ana.id, "second", true).await;
        let handler = WatchVideoHandler::new(store.clone());
        let watch = |video_id| WatchVideoQuery {
            video_id,
            viewer: bo.id,
        };

        handler.handle(watch(first.id)).await.unwrap();
        handler.handle(watch(second.id)).await.unwrap();
        let detail = handler.handle(watch(first.id)).await.unwrap();

        assert_eq!(detail.views, 2);
        assert!(!detail.is_liked);
        assert_eq!(detail.owner.unwrap().username, "ana");
        let viewer: User = load(store.as_ref(), bo.id).await.unwrap();
        assert_eq!(viewer.watch_history, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn unpublished_video_is_hidden_from_others() {
        let store = store();
        let ana = seed_user(store.as_ref(), "ana").await;
        let bo = seed_user(store.as_ref(), "bo").await;
        let draft = seed_video(store.as_ref(), ana.id, "draft", false).await;
        let handler = WatchVideoHandler::new(store.clone());

        let err = handler
            .handle(WatchVideoQuery {
                video_id: draft.id,
                viewer: bo.id,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(handler
            .handle(WatchVideoQuery {
                video_id: draft.id,
                viewer: ana.id,
            })
            .await
            .is_ok());
    }
}
