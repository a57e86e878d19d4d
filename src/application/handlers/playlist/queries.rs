//! Playlist queries.

use std::sync::Arc;

use crate::application::handlers::support::{ensure_exists, fetch_view};
use crate::domain::foundation::{DomainError, PlaylistId, UserId};
use crate::domain::playlist::{playlist_detail, user_playlists, PlaylistDetail, PlaylistSummary};
use crate::domain::read_model::decode_rows;
use crate::domain::user::User;
use crate::ports::DocumentStore;

/// Query for every playlist of a user.
#[derive(Debug, Clone)]
pub struct ListUserPlaylistsQuery {
    pub owner: UserId,
}

pub struct ListUserPlaylistsHandler {
    store: Arc<dyn DocumentStore>,
}

impl ListUserPlaylistsHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: ListUserPlaylistsQuery,
    ) -> Result<Vec<PlaylistSummary>, DomainError> {
        ensure_exists::<User, _>(self.store.as_ref(), query.owner).await?;
        decode_rows(user_playlists(query.owner).fetch_all(self.store.as_ref()).await?)
    }
}

/// Query for one playlist with its videos.
#[derive(Debug, Clone)]
pub struct GetPlaylistQuery {
    pub playlist_id: PlaylistId,
}

pub struct GetPlaylistHandler {
    store: Arc<dyn DocumentStore>,
}

impl GetPlaylistHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetPlaylistQuery) -> Result<PlaylistDetail, DomainError> {
        fetch_view(
            self.store.as_ref(),
            playlist_detail(query.playlist_id),
            "Playlist",
            query.playlist_id,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::playlist::{
        CreatePlaylistCommand, CreatePlaylistHandler, EditPlaylistVideosCommand,
        EditPlaylistVideosHandler, PlaylistEdit,
    };
    use crate::application::handlers::support::create;
    use crate::application::handlers::support::fakes::{seed_user, store};
    use crate::domain::foundation::ErrorCode;
    use crate::domain::video::{Video, VideoDetails};

    #[tokio::test]
    async fn detail_lists_videos_in_playlist_order() {
        let store = store();
        let ana = seed_user(store.as_ref(), "ana").await;
        let playlist = CreatePlaylistHandler::new(store.clone())
            .handle(CreatePlaylistCommand {
                owner: ana.id,
                name: "Mix".into(),
                description: Some("best of".into()),
            })
            .await
            .unwrap();
        let edit = EditPlaylistVideosHandler::new(store.clone());
        for title in ["one", "two", "three"] {
            let video: Video = create(
                store.as_ref(),
                &VideoDetails::new(title, None, None)
                    .unwrap()
                    .into_new_video(ana.id, "/v".into(), "/t".into()),
            )
            .await
            .unwrap();
            edit.handle(EditPlaylistVideosCommand {
                playlist_id: playlist.id,
                video_id: video.id,
                caller: ana.id,
                edit: PlaylistEdit::Add,
            })
            .await
            .unwrap();
        }

        let detail = GetPlaylistHandler::new(store.clone())
            .handle(GetPlaylistQuery {
                playlist_id: playlist.id,
            })
            .await
            .unwrap();
        let titles: Vec<_> = detail.videos.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, vec!["one", "two", "three"]);
        assert_eq!(detail.total_videos, 3);
        assert_eq!(detail.owner.unwrap().username, "ana");

        let summaries = ListUserPlaylistsHandler::new(store.clone())
            .handle(ListUserPlaylistsQuery { owner: ana.id })
            .await
            .unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].total_videos, 3);
    }

    #[tokio::test]
    async fn missing_playlist_or_owner_is_not_found() {
        let store = store();
        let err = GetPlaylistHandler::new(store.clone())
            .handle(GetPlaylistQuery {
                playlist_id: PlaylistId::new(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = ListUserPlaylistsHandler::new(store)
            .handle(ListUserPlaylistsQuery {
                owner: UserId::new(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
