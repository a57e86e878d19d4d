//! Subscription domain module.

mod aggregate;
mod views;

pub use aggregate::{subscription_filter, NewSubscription, Subscription};
pub use views::{channel_subscribers, subscribed_channels, SubscriptionView};
