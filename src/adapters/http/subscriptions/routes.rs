//! Router for subscription endpoints.

use axum::{routing::get, Router};

use super::handlers::{channel_subscribers, subscribed_channels, toggle_subscription};
use crate::adapters::http::state::AppState;

/// # Routes
///
/// - `POST /c/:channelId` - subscribe or unsubscribe (authenticated)
/// - `GET /c/:channelId` - subscribers of a channel (`page`, `limit`)
/// - `GET /u/:subscriberId` - channels a user subscribes to (`page`, `limit`)
pub fn subscription_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/c/:channelId",
            get(channel_subscribers).post(toggle_subscription),
        )
        .route("/u/:subscriberId", get(subscribed_channels))
}
