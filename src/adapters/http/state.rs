//! Shared application state.

use std::sync::Arc;

use crate::application::handlers::comment::{
    AddCommentHandler, DeleteCommentHandler, ListCommentsHandler, UpdateCommentHandler,
};
use crate::application::handlers::like::{ListLikedVideosHandler, ToggleLikeHandler};
use crate::application::handlers::playlist::{
    CreatePlaylistHandler, DeletePlaylistHandler, EditPlaylistVideosHandler, GetPlaylistHandler,
    ListUserPlaylistsHandler, UpdatePlaylistHandler,
};
use crate::application::handlers::subscription::{
    ListSubscribedChannelsHandler, ListSubscribersHandler, ToggleSubscriptionHandler,
};
use crate::application::handlers::tweet::{
    CreateTweetHandler, DeleteTweetHandler, ListTweetsHandler, UpdateTweetHandler,
};
use crate::application::handlers::user::{
    ChangePasswordHandler, GetChannelProfileHandler, GetCurrentUserHandler,
    GetWatchHistoryHandler, LoginHandler, LogoutHandler, RefreshSessionHandler,
    RegisterUserHandler, UpdateAccountHandler, UpdateProfileImageHandler,
};
use crate::application::handlers::video::{
    DeleteVideoHandler, ListVideosHandler, PublishVideoHandler, TogglePublishHandler,
    UpdateVideoHandler, WatchVideoHandler,
};
use crate::ports::{DocumentStore, MediaStorage, PasswordHasher, SessionValidator, TokenIssuer};

use super::cookies::CookiePolicy;

/// Dependencies shared by every route.
///
/// Cloned per request; handlers are built on demand from the shared ports.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub session_validator: Arc<dyn SessionValidator>,
    pub token_issuer: Arc<dyn TokenIssuer>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub media: Arc<dyn MediaStorage>,
    /// Mark session cookies `Secure`.
    pub secure_cookies: bool,
}

impl AppState {
    pub fn cookie_policy(&self) -> CookiePolicy {
        CookiePolicy {
            secure: self.secure_cookies,
            access_ttl_secs: self.token_issuer.access_ttl_secs(),
            refresh_ttl_secs: self.token_issuer.refresh_ttl_secs(),
        }
    }

    // Users

    pub fn register_user_handler(&self) -> RegisterUserHandler {
        RegisterUserHandler::new(
            self.store.clone(),
            self.password_hasher.clone(),
            self.media.clone(),
        )
    }

    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(
            self.store.clone(),
            self.password_hasher.clone(),
            self.token_issuer.clone(),
        )
    }

    pub fn logout_handler(&self) -> LogoutHandler {
        LogoutHandler::new(self.store.clone())
    }

    pub fn refresh_session_handler(&self) -> RefreshSessionHandler {
        RefreshSessionHandler::new(self.store.clone(), self.token_issuer.clone())
    }

    pub fn change_password_handler(&self) -> ChangePasswordHandler {
        ChangePasswordHandler::new(self.store.clone(), self.password_hasher.clone())
    }

    pub fn update_account_handler(&self) -> UpdateAccountHandler {
        UpdateAccountHandler::new(self.store.clone())
    }

    pub fn update_profile_image_handler(&self) -> UpdateProfileImageHandler {
        UpdateProfileImageHandler::new(self.store.clone(), self.media.clone())
    }

    pub fn current_user_handler(&self) -> GetCurrentUserHandler {
        GetCurrentUserHandler::new(self.store.clone())
    }

    pub fn channel_profile_handler(&self) -> GetChannelProfileHandler {
        GetChannelProfileHandler::new(self.store.clone())
    }

    pub fn watch_history_handler(&self) -> GetWatchHistoryHandler {
        GetWatchHistoryHandler::new(self.store.clone())
    }

    // Videos

    pub fn list_videos_handler(&self) -> ListVideosHandler {
        ListVideosHandler::new(self.store.clone())
    }

    pub fn publish_video_handler(&self) -> PublishVideoHandler {
        PublishVideoHandler::new(self.store.clone(), self.media.clone())
    }

    pub fn watch_video_handler(&self) -> WatchVideoHandler {
        WatchVideoHandler::new(self.store.clone())
    }

    pub fn update_video_handler(&self) -> UpdateVideoHandler {
        UpdateVideoHandler::new(self.store.clone(), self.media.clone())
    }

    pub fn delete_video_handler(&self) -> DeleteVideoHandler {
        DeleteVideoHandler::new(self.store.clone(), self.media.clone())
    }

    pub fn toggle_publish_handler(&self) -> TogglePublishHandler {
        TogglePublishHandler::new(self.store.clone())
    }

    // Comments

    pub fn list_comments_handler(&self) -> ListCommentsHandler {
        ListCommentsHandler::new(self.store.clone())
    }

    pub fn add_comment_handler(&self) -> AddCommentHandler {
        AddCommentHandler::new(self.store.clone())
    }

    pub fn update_comment_handler(&self) -> UpdateCommentHandler {
        UpdateCommentHandler::new(self.store.clone())
    }

    pub fn delete_comment_handler(&self) -> DeleteCommentHandler {
        DeleteCommentHandler::new(self.store.clone())
    }

    // Likes

    pub fn toggle_like_handler(&self) -> ToggleLikeHandler {
        ToggleLikeHandler::new(self.store.clone())
    }

    pub fn liked_videos_handler(&self) -> ListLikedVideosHandler {
        ListLikedVideosHandler::new(self.store.clone())
    }

    // Playlists

    pub fn create_playlist_handler(&self) -> CreatePlaylistHandler {
        CreatePlaylistHandler::new(self.store.clone())
    }

    pub fn update_playlist_handler(&self) -> UpdatePlaylistHandler {
        UpdatePlaylistHandler::new(self.store.clone())
    }

    pub fn delete_playlist_handler(&self) -> DeletePlaylistHandler {
        DeletePlaylistHandler::new(self.store.clone())
    }

    pub fn edit_playlist_videos_handler(&self) -> EditPlaylistVideosHandler {
        EditPlaylistVideosHandler::new(self.store.clone())
    }

    pub fn user_playlists_handler(&self) -> ListUserPlaylistsHandler {
        ListUserPlaylistsHandler::new(self.store.clone())
    }

    pub fn get_playlist_handler(&self) -> GetPlaylistHandler {
        GetPlaylistHandler::new(self.store.clone())
    }

    // Tweets

    pub fn create_tweet_handler(&self) -> CreateTweetHandler {
        CreateTweetHandler::new(self.store.clone())
    }

    pub fn update_tweet_handler(&self) -> UpdateTweetHandler {
        UpdateTweetHandler::new(self.store.clone())
    }

    pub fn delete_tweet_handler(&self) -> DeleteTweetHandler {
        DeleteTweetHandler::new(self.store.clone())
    }

    pub fn list_tweets_handler(&self) -> ListTweetsHandler {
        ListTweetsHandler::new(self.store.clone())
    }

    // Subscriptions

    pub fn toggle_subscription_handler(&self) -> ToggleSubscriptionHandler {
        ToggleSubscriptionHandler::new(self.store.clone())
    }

    pub fn subscribers_handler(&self) -> ListSubscribersHandler {
        ListSubscribersHandler::new(self.store.clone())
    }

    pub fn subscribed_channels_handler(&self) -> ListSubscribedChannelsHandler {
        ListSubscribedChannelsHandler::new(self.store.clone())
    }
}
