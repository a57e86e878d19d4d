//! Subscriber and subscribed-channel listings.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SubscriptionId, Timestamp, UserId};
use crate::domain::read_model::{
    Collection, Filter, JoinSpec, Projection, ReadModelBuilder, SortSpec,
    CREATED_AT, ID_FIELD,
};
use crate::domain::user::{user_join, UserSummary};

/// A subscription row carrying the user on the other end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionView {
    #[serde(rename = "_id")]
    pub id: SubscriptionId,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscriber: Option<UserSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<UserSummary>,
}

/// Users subscribed to `channel`, newest subscription first.
pub fn channel_subscribers(channel: UserId) -> ReadModelBuilder {
    ReadModelBuilder::new(Collection::Subscriptions)
        .filter(Filter::all().eq("channel", channel.to_value()))
        .join(user_join(
            "subscriber",
            "subscriber",
            &["username", "fullName", "avatar"],
        ))
        .sort(SortSpec::newest_first())
        .project(Projection::new().fields(["subscriber", CREATED_AT]))
}

/// Channels `subscriber` follows, each with its own subscriber count.
pub fn subscribed_channels(subscriber: UserId) -> ReadModelBuilder {
    let channel = JoinSpec::one(Collection::Users, "channel", ID_FIELD, "channel")
        .join(JoinSpec::count(
            Collection::Subscriptions,
            ID_FIELD,
            "channel",
            "subscribersCount",
        ))
        .project(Projection::new().without_id().fields([
            "username",
            "fullName",
            "avatar",
            "subscribersCount",
        ]));
    ReadModelBuilder::new(Collection::Subscriptions)
        .filter(Filter::all().eq("subscriber", subscriber.to_value()))
        .join(channel)
        .sort(SortSpec::newest_first())
        .project(Projection::new().fields(["channel", CREATED_AT]))
}
