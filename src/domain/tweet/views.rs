//! Tweet listings with the author's name and email.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, TweetId, UserId};
use crate::domain::read_model::{
    Collection, Filter, Projection, ReadModelBuilder, SortSpec, CREATED_AT, UPDATED_AT,
};
use crate::domain::user::{owner_join, UserSummary};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TweetView {
    #[serde(rename = "_id")]
    pub id: TweetId,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default)]
    pub owner: Option<UserSummary>,
}

fn tweets(filter: Filter) -> ReadModelBuilder {
    ReadModelBuilder::new(Collection::Tweets)
        .filter(filter)
        .join(owner_join(&["username", "email"]))
        .sort(SortSpec::newest_first())
        .project(Projection::new().fields(["content", CREATED_AT, UPDATED_AT, "owner"]))
}

/// Tweets of one user, newest first.
pub fn user_tweets(owner: UserId) -> ReadModelBuilder {
    tweets(Filter::all().eq("owner", owner.to_value()))
}

/// Every tweet, newest first.
pub fn all_tweets() -> ReadModelBuilder {
    tweets(Filter::all())
}
