//! HTTP adapter for subscriptions.

mod handlers;
mod routes;

pub use routes::subscription_routes;
