//! Video domain module.
//!
//! Uploaded videos, their metadata rules, and the video read models:
//! published listings, the detail page, and the card shape embedded in
//! watch history, liked videos and playlists.

mod aggregate;
mod views;

pub use aggregate::{
    parse_duration, NewVideo, PublishState, Video, VideoChanges, VideoDetails, ViewCount,
};
pub use views::{
    published_videos, video_detail, with_card_shape, VideoCard, VideoDetail, VideoListQuery,
    VideoSortKey,
};
