//! Domain layer containing entities, validation rules and read models.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, ownership)
//! - `read_model` - Join, shape and paginate queries over document collections
//! - `user` - Accounts, channel profiles and watch history
//! - `video` - Uploaded videos, listings and the detail view
//! - `comment` - Comments on videos
//! - `tweet` - Short text posts
//! - `like` - Likes of videos, comments and tweets
//! - `playlist` - User-curated video lists
//! - `subscription` - Channel subscriptions

pub mod comment;
pub mod foundation;
pub mod like;
pub mod playlist;
pub mod read_model;
pub mod subscription;
pub mod tweet;
pub mod user;
pub mod video;
