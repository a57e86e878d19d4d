//! Tweet listings.

use std::sync::Arc;

use crate::application::handlers::support::ensure_exists;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::read_model::decode_rows;
use crate::domain::tweet::{all_tweets, user_tweets, TweetView};
use crate::domain::user::User;
use crate::ports::DocumentStore;

/// Query for tweets, either all of them or those of one user.
#[derive(Debug, Clone, Default)]
pub struct ListTweetsQuery {
    pub owner: Option<UserId>,
}

pub struct ListTweetsHandler {
    store: Arc<dyn DocumentStore>,
}

impl ListTweetsHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// An empty result is an empty list. A missing owner is `NotFound`.
    pub async fn handle(&self, query: ListTweetsQuery) -> Result<Vec<TweetView>, DomainError> {
        let builder = match query.owner {
            Some(owner) => {
                ensure_exists::<User, _>(self.store.as_ref(), owner).await?;
                user_tweets(owner)
            }
            None => all_tweets(),
        };
        decode_rows(builder.fetch_all(self.store.as_ref()).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::support::fakes::{seed_user, store};
    use crate::application::handlers::tweet::{CreateTweetCommand, CreateTweetHandler};
    use crate::domain::foundation::ErrorCode;

    #[tokio::test]
    async fn no_tweets_is_empty_list() {
        let tweets = ListTweetsHandler::new(store())
            .handle(ListTweetsQuery::default())
            .await
            .unwrap();
        assert!(tweets.is_empty());
    }

    #[tokio::test]
    async fn user_tweets_carry_name_and_email_only() {
        let store = store();
        let ana = seed_user(store.as_ref(), "ana").await;
        let bo = seed_user(store.as_ref(), "bo").await;
        let create = CreateTweetHandler::new(store.clone());
        for (owner, content) in [(ana.id, "a1"), (bo.id, "b1"), (ana.id, "a2")] {
            create
                .handle(CreateTweetCommand {
                    owner,
                    content: content.into(),
                })
                .await
                .unwrap();
        }
        let handler = ListTweetsHandler::new(store.clone());

        let tweets = handler
            .handle(ListTweetsQuery {
                owner: Some(ana.id),
            })
            .await
            .unwrap();
        assert_eq!(tweets.len(), 2);
        let owner = tweets[0].owner.clone().unwrap();
        assert_eq!(owner.username, "ana");
        assert_eq!(owner.email.as_deref(), Some("ana@example.com"));
        assert_eq!(owner.avatar, None);

        assert_eq!(handler.handle(ListTweetsQuery::default()).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn tweets_of_missing_user_is_not_found() {
        let err = ListTweetsHandler::new(store())
            .handle(ListTweetsQuery {
                owner: Some(UserId::new()),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
