//! Adapters - Implementations of port interfaces.
//!
//! - `store` - Document stores (in-memory, Postgres JSONB)
//! - `auth` - JWT tokens, bcrypt hashing and a test session validator
//! - `media` - Uploaded files on the local filesystem
//! - `http` - The axum REST API

pub mod auth;
pub mod http;
pub mod media;
pub mod store;

pub use auth::{BcryptPasswordHasher, JwtTokenService, MockSessionValidator};
pub use media::LocalMediaStorage;
pub use store::{InMemoryDocumentStore, PostgresDocumentStore};
