//! Document store adapters.
//!
//! - `InMemoryDocumentStore` - process-local collections for development and tests
//! - `PostgresDocumentStore` - JSONB document table in PostgreSQL

mod executor;
mod in_memory;
mod postgres;

pub use executor::{execute, RowSource};
pub use in_memory::InMemoryDocumentStore;
pub use postgres::PostgresDocumentStore;
