//! Paginated videos liked by a user.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{LikeId, Timestamp, UserId};
use crate::domain::read_model::{
    Collection, Filter, JoinSpec, Projection, ReadModelBuilder, SortSpec, CREATED_AT, ID_FIELD,
};
use crate::domain::video::{with_card_shape, VideoCard};

/// One like of a video, with the video as a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikedVideo {
    #[serde(rename = "_id")]
    pub id: LikeId,
    pub created_at: Timestamp,
    /// `None` when the video has been deleted since it was liked.
    #[serde(default)]
    pub video: Option<VideoCard>,
}

/// Videos liked by `user`, most recently liked first.
pub fn liked_videos(user: UserId) -> ReadModelBuilder {
    ReadModelBuilder::new(Collection::Likes)
        .filter(Filter::all().eq("likedBy", user.to_value()).not_null("video"))
        .join(with_card_shape(JoinSpec::one(
            Collection::Videos,
            "video",
            ID_FIELD,
            "video",
        )))
        .sort(SortSpec::newest_first())
        .project(Projection::new().fields(["video", CREATED_AT]))
}
