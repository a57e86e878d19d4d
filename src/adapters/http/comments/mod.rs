//! HTTP adapter for comments.

mod handlers;
mod routes;

pub use routes::comment_routes;
