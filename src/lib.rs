//! VidTube - video-sharing platform backend
//!
//! Users upload videos, comment, like, tweet, build playlists and subscribe
//! to channels. Every listing is produced by a declarative read-model
//! pipeline (filter, joins, computed fields, sort, pagination, projection)
//! run against a document store.
//!
//! Layout follows ports and adapters:
//!
//! - `domain` - entities, validation and the read-model builder
//! - `ports` - contracts for storage, media, tokens and password hashing
//! - `application` - one command or query handler per use case
//! - `adapters` - in-memory and Postgres stores, JWT/bcrypt, local files, axum
//! - `config` - typed configuration from the environment

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
