//! ToggleSubscriptionHandler - Command handler for subscribing and
//! unsubscribing.

use std::sync::Arc;

use tracing::info;

use crate::application::handlers::support::ensure_exists;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::read_model::{encode_fields, Collection};
use crate::domain::subscription::{subscription_filter, NewSubscription};
use crate::domain::user::User;
use crate::ports::DocumentStore;

#[derive(Debug, Clone)]
pub struct ToggleSubscriptionCommand {
    pub subscriber: UserId,
    pub channel: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleSubscriptionResult {
    /// Whether the caller is subscribed after the toggle.
    pub subscribed: bool,
}

pub struct ToggleSubscriptionHandler {
    store: Arc<dyn DocumentStore>,
}

impl ToggleSubscriptionHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: ToggleSubscriptionCommand,
    ) -> Result<ToggleSubscriptionResult, DomainError> {
        // 1. No self-subscription, and the channel must exist
        let new_subscription = NewSubscription::new(cmd.subscriber, cmd.channel)?;
        ensure_exists::<User, _>(self.store.as_ref(), cmd.channel).await?;

        // 2. Unsubscribe if subscribed
        let filter = subscription_filter(cmd.subscriber, cmd.channel);
        if let Some(existing) = self
            .store
            .delete_one(Collection::Subscriptions, &filter)
            .await?
        {
            info!(subscription_id = %existing.id(), channel = %cmd.channel, "Unsubscribed");
            return Ok(ToggleSubscriptionResult { subscribed: false });
        }

        // 3. Otherwise subscribe
        let created = self
            .store
            .create(Collection::Subscriptions, encode_fields(&new_subscription)?)
            .await?;
        info!(subscription_id = %created.id(), channel = %cmd.channel, "Subscribed");
        Ok(ToggleSubscriptionResult { subscribed: true })
    }
}
