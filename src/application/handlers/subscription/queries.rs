//! Paginated subscriber and subscribed-channel listings.

use std::sync::Arc;

use crate::application::handlers::support::ensure_exists;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::read_model::{decode_row, PageRequest, PageResult};
use crate::domain::subscription::{channel_subscribers, subscribed_channels, SubscriptionView};
use crate::domain::user::User;
use crate::ports::DocumentStore;

/// Query for the users subscribed to a channel.
#[derive(Debug, Clone)]
pub struct ListSubscribersQuery {
    pub channel: UserId,
    pub page: PageRequest,
}

pub struct ListSubscribersHandler {
    store: Arc<dyn DocumentStore>,
}

impl ListSubscribersHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: ListSubscribersQuery,
    ) -> Result<PageResult<SubscriptionView>, DomainError> {
        ensure_exists::<User, _>(self.store.as_ref(), query.channel).await?;
        channel_subscribers(query.channel)
            .fetch_page(self.store.as_ref(), query.page)
            .await?
            .try_map(decode_row)
    }
}

/// Query for the channels a user subscribes to.
#[derive(Debug, Clone)]
pub struct ListSubscribedChannelsQuery {
    pub subscriber: UserId,
    pub page: PageRequest,
}

pub struct ListSubscribedChannelsHandler {
    store: Arc<dyn DocumentStore>,
}

impl ListSubscribedChannelsHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: ListSubscribedChannelsQuery,
    ) -> Result<PageResult<SubscriptionView>, DomainError> {
        ensure_exists::<User, _>(self.store.as_ref(), query.subscriber).await?;
        subscribed_channels(query.subscriber)
            .fetch_page(self.store.as_ref(), query.page)
            .await?
            .try_map(decode_row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::subscription::{
        ToggleSubscriptionCommand, ToggleSubscriptionHandler,
    };
    use crate::application::handlers::support::fakes::{seed_user, store};

    #[tokio::test]
    async fn listings_embed_the_other_side() {
        let store = store();
        let ana = seed_user(store.as_ref(), "ana").await;
        let bo = seed_user(store.as_ref(), "bo").await;
        let cy = seed_user(store.as_ref(), "cy").await;
        let toggle = ToggleSubscriptionHandler::new(store.clone());
        for subscriber in [bo.id, cy.id] {
            toggle
                .handle(ToggleSubscriptionCommand {
                    subscriber,
                    channel: ana.id,
                })
                .await
                .unwrap();
        }

        let subscribers = ListSubscribersHandler::new(store.clone())
            .handle(ListSubscribersQuery {
                channel: ana.id,
                page: PageRequest::default(),
            })
            .await
            .unwrap();
        assert_eq!(subscribers.total_items, 2);
        let mut names: Vec<_> = subscribers
            .items
            .iter()
            .map(|s| s.subscriber.as_ref().unwrap().username.clone())
            .collect();
        names.sort();
        assert_eq!(names, vec!["bo", "cy"]);

        let channels = ListSubscribedChannelsHandler::new(store.clone())
            .handle(ListSubscribedChannelsQuery {
                subscriber: bo.id,
                page: PageRequest::default(),
            })
            .await
            .unwrap();
        assert_eq!(channels.total_items, 1);
        let channel = channels.items[0].channel.clone().unwrap();
        assert_eq!(channel.username, "ana");
        assert_eq!(channel.subscribers_count, Some(2));
    }
}
