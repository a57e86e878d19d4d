//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Every
//! handler receives the caller's id explicitly in its command or query.

pub mod comment;
pub mod like;
pub mod playlist;
pub mod subscription;
pub mod tweet;
pub mod user;
pub mod video;

pub(crate) mod support;
