//! Tweet entity: a short text post on a user's channel.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    require_text, OwnedByUser, Timestamp, TweetId, UserId, ValidationError,
};
use crate::domain::read_model::{Collection, StoredEntity};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tweet {
    #[serde(rename = "_id")]
    pub id: TweetId,
    pub content: String,
    pub owner: UserId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StoredEntity for Tweet {
    const COLLECTION: Collection = Collection::Tweets;
    const NAME: &'static str = "Tweet";
}

impl OwnedByUser for Tweet {
    fn owner_id(&self) -> &UserId {
        &self.owner
    }
}

/// Fields written when a tweet is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTweet {
    pub content: String,
    pub owner: UserId,
}

impl NewTweet {
    pub fn new(owner: UserId, content: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            content: require_text("content", content)?,
            owner,
        })
    }
}

/// Replacement text of an existing tweet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TweetChanges {
    pub content: String,
}

impl TweetChanges {
    pub fn new(content: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            content: require_text("content", content)?,
        })
    }
}
