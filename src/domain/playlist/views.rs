//! Playlist read models: a user's playlists and one playlist with its
//! videos.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PlaylistId, Timestamp, UserId, VideoId};
use crate::domain::read_model::{
    Collection, ComputedField, Filter, JoinSpec, Projection, ReadModelBuilder, SortSpec,
    CREATED_AT, ID_FIELD, UPDATED_AT,
};
use crate::domain::user::{owner_join, UserSummary};
use crate::domain::video::{with_card_shape, VideoCard};

/// A playlist in a user's list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSummary {
    #[serde(rename = "_id")]
    pub id: PlaylistId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub owner: UserId,
    #[serde(default)]
    pub videos: Vec<VideoId>,
    pub total_videos: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Playlists owned by `owner`, newest first.
pub fn user_playlists(owner: UserId) -> ReadModelBuilder {
    ReadModelBuilder::new(Collection::Playlists)
        .filter(Filter::all().eq("owner", owner.to_value()))
        .compute(ComputedField::size("totalVideos", "videos"))
        .sort(SortSpec::newest_first())
        .project(Projection::new().fields([
            "name",
            "description",
            "owner",
            "videos",
            "totalVideos",
            CREATED_AT,
            UPDATED_AT,
        ]))
}

/// One playlist with its owner and its videos as cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistDetail {
    #[serde(rename = "_id")]
    pub id: PlaylistId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub owner: Option<UserSummary>,
    /// Videos in playlist order; deleted videos are skipped.
    #[serde(default)]
    pub videos: Vec<VideoCard>,
    pub total_videos: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

pub fn playlist_detail(playlist: PlaylistId) -> ReadModelBuilder {
    ReadModelBuilder::new(Collection::Playlists)
        .filter(Filter::by_id(playlist))
        .join(owner_join(&["username", "fullName", "avatar"]))
        .join(with_card_shape(JoinSpec::many(
            Collection::Videos,
            "videos",
            ID_FIELD,
            "videos",
        )))
        .compute(ComputedField::size("totalVideos", "videos"))
        .project(Projection::new().fields([
            "name",
            "description",
            "owner",
            "videos",
            "totalVideos",
            CREATED_AT,
            UPDATED_AT,
        ]))
}
