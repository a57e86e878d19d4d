//! Comment entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    require_text, CommentId, OwnedByUser, Timestamp, UserId, ValidationError, VideoId,
};
use crate::domain::read_model::{Collection, StoredEntity};

/// A comment on a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: CommentId,
    pub content: String,
    pub video: VideoId,
    pub owner: UserId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StoredEntity for Comment {
    const COLLECTION: Collection = Collection::Comments;
    const NAME: &'static str = "Comment";
}

impl OwnedByUser for Comment {
    fn owner_id(&self) -> &UserId {
        &self.owner
    }
}

/// Fields written when a comment is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub content: String,
    pub video: VideoId,
    pub owner: UserId,
}

impl NewComment {
    pub fn new(video: VideoId, owner: UserId, content: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            content: require_text("content", content)?,
            video,
            owner,
        })
    }
}

/// Replacement text of an existing comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentChanges {
    pub content: String,
}

impl CommentChanges {
    pub fn new(content: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            content: require_text("content", content)?,
        })
    }
}
