//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence
//!
//! - `DocumentStore` - Collections of JSON documents plus aggregation pipelines
//!
//! ## Authentication
//!
//! - `SessionValidator` - Access token validation
//! - `TokenIssuer` - Access/refresh token signing
//! - `PasswordHasher` - One-way password hashing
//!
//! ## Media
//!
//! - `MediaStorage` - Uploaded video, thumbnail and image files

mod document_store;
mod media_storage;
mod password_hasher;
mod session_validator;
mod token_issuer;

pub use document_store::{DocumentStore, StoreError};
pub use media_storage::{MediaStorage, MediaUpload, StorageError};
pub use password_hasher::PasswordHasher;
pub use session_validator::SessionValidator;
pub use token_issuer::{TokenIssuer, TokenPair};
