//! HTTP adapter for tweets.

mod handlers;
mod routes;

pub use routes::tweet_routes;
