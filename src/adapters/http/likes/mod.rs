//! HTTP adapter for likes.

mod handlers;
mod routes;

pub use routes::like_routes;
