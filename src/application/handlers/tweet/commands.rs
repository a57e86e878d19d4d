//! Tweet commands: post, edit and delete.

use std::sync::Arc;

use tracing::info;

use crate::application::handlers::support::{create, load, remove, update};
use crate::domain::foundation::{DomainError, OwnedByUser, TweetId, UserId};
use crate::domain::read_model::{Collection, Filter};
use crate::domain::tweet::{NewTweet, Tweet, TweetChanges};
use crate::ports::DocumentStore;

#[derive(Debug, Clone)]
pub struct CreateTweetCommand {
    pub owner: UserId,
    pub content: String,
}

pub struct CreateTweetHandler {
    store: Arc<dyn DocumentStore>,
}

impl CreateTweetHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: CreateTweetCommand) -> Result<Tweet, DomainError> {
        let new_tweet = NewTweet::new(cmd.owner, &cmd.content)?;
        let tweet: Tweet = create(self.store.as_ref(), &new_tweet).await?;
        info!(tweet_id = %tweet.id, owner = %tweet.owner, "Tweet posted");
        Ok(tweet)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateTweetCommand {
    pub tweet_id: TweetId,
    pub caller: UserId,
    pub content: String,
}

pub struct UpdateTweetHandler {
    store: Arc<dyn DocumentStore>,
}

impl UpdateTweetHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: UpdateTweetCommand) -> Result<Tweet, DomainError> {
        let changes = TweetChanges::new(&cmd.content)?;
        let tweet: Tweet = load(self.store.as_ref(), cmd.tweet_id).await?;
        tweet.check_ownership(&cmd.caller)?;

        let tweet: Tweet = update(self.store.as_ref(), tweet.id, &changes).await?;
        info!(tweet_id = %tweet.id, "Tweet updated");
        Ok(tweet)
    }
}

/// Command to delete a tweet and its likes.
#[derive(Debug, Clone)]
pub struct DeleteTweetCommand {
    pub tweet_id: TweetId,
    pub caller: UserId,
}

pub struct DeleteTweetHandler {
    store: Arc<dyn DocumentStore>,
}

impl DeleteTweetHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: DeleteTweetCommand) -> Result<(), DomainError> {
        let tweet: Tweet = load(self.store.as_ref(), cmd.tweet_id).await?;
        tweet.check_ownership(&cmd.caller)?;

        remove::<Tweet, _>(self.store.as_ref(), tweet.id).await?;
        let likes = self
            .store
            .delete_many(Collection::Likes, &Filter::all().eq("tweet", tweet.id.to_value()))
            .await?;

        info!(tweet_id = %tweet.id, likes, "Tweet deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::like::{ToggleLikeCommand, ToggleLikeHandler};
    use crate::application::handlers::support::fakes::store;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::like::LikeTarget;

    #[tokio::test]
    async fn blank_tweet_is_rejected() {
        let err = CreateTweetHandler::new(store())
            .handle(CreateTweetCommand {
                owner: UserId::new(),
                content: " ".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn owner_edits_and_deletes_with_likes() {
        let store = store();
        let owner = UserId::new();
        let tweet = CreateTweetHandler::new(store.clone())
            .handle(CreateTweetCommand {
                owner,
                content: "hello".into(),
            })
            .await
            .unwrap();
        ToggleLikeHandler::new(store.clone())
            .handle(ToggleLikeCommand {
                user_id: UserId::new(),
                target: LikeTarget::Tweet(tweet.id),
            })
            .await
            .unwrap();

        let err = UpdateTweetHandler::new(store.clone())
            .handle(UpdateTweetCommand {
                tweet_id: tweet.id,
                caller: UserId::new(),
                content: "mine now".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);

        let edited = UpdateTweetHandler::new(store.clone())
            .handle(UpdateTweetCommand {
                tweet_id: tweet.id,
                caller: owner,
                content: "hello again".into(),
            })
            .await
            .unwrap();
        assert_eq!(edited.content, "hello again");

        DeleteTweetHandler::new(store.clone())
            .handle(DeleteTweetCommand {
                tweet_id: tweet.id,
                caller: owner,
            })
            .await
            .unwrap();
        assert_eq!(store.count(Collection::Tweets).await, 0);
        assert_eq!(store.count(Collection::Likes).await, 0);
    }
}
