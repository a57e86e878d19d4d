//! HTTP adapter - the REST API over axum.
//!
//! Each resource has its own module with handlers and a router; `router`
//! nests them under `/api/v1`. Every response uses the envelopes in
//! `envelope`.

pub mod cookies;
pub mod envelope;
pub mod middleware;
pub mod router;
pub mod state;

mod comments;
mod health;
mod likes;
mod multipart;
mod params;
mod playlists;
mod subscriptions;
mod tweets;
mod users;
mod videos;

pub use envelope::{ApiError, ApiResponse};
pub use router::{api_router, API_PREFIX};
pub use state::AppState;
