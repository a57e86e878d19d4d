//! HTTP adapter for playlists.

mod handlers;
mod routes;

pub use routes::playlist_routes;
