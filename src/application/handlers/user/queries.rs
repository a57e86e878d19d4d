//! User queries: the caller's account, channel profiles and watch history.

use std::sync::Arc;

use crate::application::handlers::support::{fetch_view, load};
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{channel_profile, watch_history, ChannelProfile, User, WatchHistory};
use crate::domain::video::VideoCard;
use crate::ports::DocumentStore;

/// Query for the caller's own account.
#[derive(Debug, Clone)]
pub struct GetCurrentUserQuery {
    pub user_id: UserId,
}

pub struct GetCurrentUserHandler {
    store: Arc<dyn DocumentStore>,
}

impl GetCurrentUserHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetCurrentUserQuery) -> Result<User, DomainError> {
        load(self.store.as_ref(), query.user_id).await
    }
}

/// Query for a channel page as seen by the caller.
#[derive(Debug, Clone)]
pub struct GetChannelProfileQuery {
    pub username: String,
    pub caller: UserId,
}

pub struct GetChannelProfileHandler {
    store: Arc<dyn DocumentStore>,
}

impl GetChannelProfileHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetChannelProfileQuery) -> Result<ChannelProfile, DomainError> {
        if query.username.trim().is_empty() {
            return Err(DomainError::validation("username", "username is missing"));
        }
        fetch_view(
            self.store.as_ref(),
            channel_profile(&query.username, query.caller),
            "Channel",
            &query.username,
        )
        .await
    }
}

/// Query for the caller's watch history.
#[derive(Debug, Clone)]
pub struct GetWatchHistoryQuery {
    pub user_id: UserId,
}

pub struct GetWatchHistoryHandler {
    store: Arc<dyn DocumentStore>,
}

impl GetWatchHistoryHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetWatchHistoryQuery) -> Result<Vec<VideoCard>, DomainError> {
        let history: WatchHistory = fetch_view(
            self.store.as_ref(),
            watch_history(query.user_id),
            "User",
            query.user_id,
        )
        .await?;
        Ok(history.watch_history)
    }
}
