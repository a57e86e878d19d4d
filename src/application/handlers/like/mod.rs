//! Like handlers.

mod liked_videos;
mod toggle_like;

pub use liked_videos::{ListLikedVideosHandler, ListLikedVideosQuery};
pub use toggle_like::{ToggleLikeCommand, ToggleLikeHandler, ToggleLikeResult};
