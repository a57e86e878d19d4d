//! Like domain module.
//!
//! Likes of videos, comments and tweets, and the liked-videos listing.

mod aggregate;
mod views;

pub use aggregate::{like_filter, Like, LikeTarget, NewLike};
pub use views::{liked_videos, LikedVideo};
