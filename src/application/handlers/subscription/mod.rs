//! Subscription handlers.

mod queries;
mod toggle_subscription;

pub use queries::{
    ListSubscribedChannelsHandler, ListSubscribedChannelsQuery, ListSubscribersHandler,
    ListSubscribersQuery,
};
pub use toggle_subscription::{
    ToggleSubscriptionCommand, ToggleSubscriptionHandler, ToggleSubscriptionResult,
};
