//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the VidTube domain.

mod auth;
mod errors;
mod ids;
mod ownership;
mod text;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    CommentId, DocumentId, LikeId, PlaylistId, SubscriptionId, TweetId, UserId, VideoId,
};
pub use ownership::OwnedByUser;
pub use text::{optional_text, require_text, text_or_empty};
pub use timestamp::Timestamp;
