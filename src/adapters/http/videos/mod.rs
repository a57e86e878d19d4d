//! HTTP adapter for videos.

mod handlers;
mod routes;

pub use routes::video_routes;
