//! HTTP adapter for users: registration, sessions and account management.

mod dto;
mod handlers;
mod routes;

pub use routes::user_routes;
