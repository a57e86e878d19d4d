//! Subscription entity: `subscriber` follows the channel owned by
//! `channel`. At most one subscription exists per pair.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SubscriptionId, Timestamp, UserId, ValidationError};
use crate::domain::read_model::{Collection, Filter, StoredEntity};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    #[serde(rename = "_id")]
    pub id: SubscriptionId,
    pub subscriber: UserId,
    pub channel: UserId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StoredEntity for Subscription {
    const COLLECTION: Collection = Collection::Subscriptions;
    const NAME: &'static str = "Subscription";
}

/// Selects the subscription of `subscriber` to `channel`, if there is one.
pub fn subscription_filter(subscriber: UserId, channel: UserId) -> Filter {
    Filter::all()
        .eq("subscriber", subscriber.to_value())
        .eq("channel", channel.to_value())
}

/// Fields written when a subscription is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSubscription {
    pub subscriber: UserId,
    pub channel: UserId,
}

impl NewSubscription {
    /// # Errors
    ///
    /// - `InvalidFormat` when a user subscribes to their own channel
    pub fn new(subscriber: UserId, channel: UserId) -> Result<Self, ValidationError> {
        if subscriber == channel {
            return Err(ValidationError::invalid_format(
                "channelId",
                "cannot subscribe to your own channel",
            ));
        }
        Ok(Self {
            subscriber,
            channel,
        })
    }
}
