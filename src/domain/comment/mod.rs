//! Comment domain module.
//!
//! Comments on videos and the paginated comment listing.

mod aggregate;
mod views;

pub use aggregate::{Comment, CommentChanges, NewComment};
pub use views::{video_comments, CommentView};
