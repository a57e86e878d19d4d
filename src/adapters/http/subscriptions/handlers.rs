//! HTTP handlers for subscription endpoints.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::handlers::subscription::{
    ListSubscribedChannelsQuery, ListSubscribersQuery, ToggleSubscriptionCommand,
};
use crate::domain::foundation::UserId;

use crate::adapters::http::envelope::{ApiError, ApiResponse};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::params::PageParams;
use crate::adapters::http::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionStatus {
    pub is_subscribed: bool,
}

/// POST /subscriptions/c/:channelId
pub async fn toggle_subscription(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(channel_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = ToggleSubscriptionCommand {
        subscriber: user.id,
        channel: UserId::parse(&channel_id)?,
    };
    let result = state.toggle_subscription_handler().handle(cmd).await?;
    let message = if result.subscribed {
        "Subscribed successfully"
    } else {
        "Unsubscribed successfully"
    };
    Ok(ApiResponse::ok(
        SubscriptionStatus {
            is_subscribed: result.subscribed,
        },
        message,
    ))
}

/// GET /subscriptions/c/:channelId
pub async fn channel_subscribers(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = ListSubscribersQuery {
        channel: UserId::parse(&channel_id)?,
        page: params.request()?,
    };
    let page = state.subscribers_handler().handle(query).await?;
    Ok(ApiResponse::ok(page, "Subscribers fetched successfully"))
}

/// GET /subscriptions/u/:subscriberId
pub async fn subscribed_channels(
    State(state): State<AppState>,
    Path(subscriber_id): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = ListSubscribedChannelsQuery {
        subscriber: UserId::parse(&subscriber_id)?,
        page: params.request()?,
    };
    let page = state.subscribed_channels_handler().handle(query).await?;
    Ok(ApiResponse::ok(page, "Subscribed channels fetched successfully"))
}
