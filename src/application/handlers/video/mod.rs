//! Video handlers.
//!
//! ## Commands
//! - Publishing (upload), metadata update, deletion and publish toggle
//!
//! ## Queries
//! - Published video listing and the watch page

mod manage_video;
mod publish_video;
mod queries;

pub use manage_video::{
    DeleteVideoCommand, DeleteVideoHandler, TogglePublishCommand, TogglePublishHandler,
    UpdateVideoCommand, UpdateVideoHandler,
};
pub use publish_video::{PublishVideoCommand, PublishVideoHandler};
pub use queries::{ListVideosHandler, ListVideosQuery, WatchVideoHandler, WatchVideoQuery};
