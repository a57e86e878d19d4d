//! Like entity.
//!
//! A like links the user in `likedBy` to exactly one video, comment or
//! tweet. Liking is a toggle: a second like of the same target removes the
//! first.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::{
    CommentId, DocumentId, LikeId, Timestamp, TweetId, UserId, VideoId,
};
use crate::domain::read_model::{Collection, Filter, StoredEntity};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    #[serde(rename = "_id")]
    pub id: LikeId,
    pub liked_by: UserId,
    #[serde(default)]
    pub video: Option<VideoId>,
    #[serde(default)]
    pub comment: Option<CommentId>,
    #[serde(default)]
    pub tweet: Option<TweetId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StoredEntity for Like {
    const COLLECTION: Collection = Collection::Likes;
    const NAME: &'static str = "Like";
}

impl Like {
    /// The liked entity.
    pub fn target(&self) -> Option<LikeTarget> {
        match (self.video, self.comment, self.tweet) {
            (Some(video), None, None) => Some(LikeTarget::Video(video)),
            (None, Some(comment), None) => Some(LikeTarget::Comment(comment)),
            (None, None, Some(tweet)) => Some(LikeTarget::Tweet(tweet)),
            _ => None,
        }
    }
}

/// What a like points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeTarget {
    Video(VideoId),
    Comment(CommentId),
    Tweet(TweetId),
}

impl LikeTarget {
    /// Relation field holding the target key.
    pub fn field(&self) -> &'static str {
        match self {
            LikeTarget::Video(_) => "video",
            LikeTarget::Comment(_) => "comment",
            LikeTarget::Tweet(_) => "tweet",
        }
    }

    /// Collection the target lives in.
    pub fn collection(&self) -> Collection {
        match self {
            LikeTarget::Video(_) => Collection::Videos,
            LikeTarget::Comment(_) => Collection::Comments,
            LikeTarget::Tweet(_) => Collection::Tweets,
        }
    }

    /// Display name used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            LikeTarget::Video(_) => "Video",
            LikeTarget::Comment(_) => "Comment",
            LikeTarget::Tweet(_) => "Tweet",
        }
    }

    pub fn key(&self) -> Value {
        match self {
            LikeTarget::Video(id) => id.to_value(),
            LikeTarget::Comment(id) => id.to_value(),
            LikeTarget::Tweet(id) => id.to_value(),
        }
    }

    pub fn document_id(&self) -> DocumentId {
        match self {
            LikeTarget::Video(id) => id.document_id(),
            LikeTarget::Comment(id) => id.document_id(),
            LikeTarget::Tweet(id) => id.document_id(),
        }
    }
}

/// Selects the like of `target` by `user`, if there is one.
pub fn like_filter(user: UserId, target: LikeTarget) -> Filter {
    Filter::all()
        .eq("likedBy", user.to_value())
        .eq(target.field(), target.key())
}

/// Fields written when a like is created. Exactly one target is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLike {
    pub liked_by: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<CommentId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tweet: Option<TweetId>,
}

impl NewLike {
    pub fn new(liked_by: UserId, target: LikeTarget) -> Self {
        let mut like = Self {
            liked_by,
            video: None,
            comment: None,
            tweet: None,
        };
        match target {
            LikeTarget::Video(id) => like.video = Some(id),
            LikeTarget::Comment(id) => like.comment = Some(id),
            LikeTarget::Tweet(id) => like.tweet = Some(id),
        }
        like
    }
}
