//! Document store port.
//!
//! Defines the contract for persisting and querying collections of
//! documents. Both the write side (create, update, delete) and the read
//! side (filtered finds and aggregation pipelines) go through this port.
//!
//! # Design
//!
//! - **Schemaless bodies**: documents are JSON objects; typed entities are
//!   deserialized by the caller
//! - **Consistent aggregation**: one `aggregate` call reads every
//!   collection it touches from the same snapshot, so `total` and `rows`
//!   always agree
//! - **Left-outer joins**: a relation pointing at a deleted document joins
//!   to `null` (or an empty list) and never drops the base row

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{DocumentId, DomainError, ErrorCode};
use crate::domain::read_model::{Aggregation, Collection, Document, Filter, Pipeline, Row};

/// Errors raised by store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backend could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The backend did not answer in time.
    #[error("Store operation timed out")]
    Timeout,

    /// The backend rejected the operation.
    #[error("Store query failed: {0}")]
    Query(String),

    /// A unique constraint rejected the write.
    #[error("Duplicate document: {0}")]
    Duplicate(String),

    /// A stored body could not be read back as a document.
    #[error("Corrupt document in {collection}: {reason}")]
    Corrupt { collection: String, reason: String },
}

impl StoreError {
    /// Returns true if a retry with backoff may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_) | StoreError::Timeout)
    }
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        let code = match &err {
            StoreError::Duplicate(_) => ErrorCode::Conflict,
            e if e.is_transient() => ErrorCode::StoreUnavailable,
            _ => ErrorCode::DatabaseError,
        };
        DomainError::new(code, err.to_string())
    }
}

/// Persistence and query port for all collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents matching `filter`, in insertion order.
    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Document>, StoreError>;

    /// First document matching `filter`.
    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError>;

    /// Document by key.
    async fn find_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<Option<Document>, StoreError> {
        self.find_one(collection, &Filter::by_id(id)).await
    }

    /// Runs a validated pipeline against one consistent snapshot.
    async fn aggregate(&self, pipeline: &Pipeline) -> Result<Aggregation, StoreError>;

    /// Inserts a new document built from `fields`.
    async fn create(&self, collection: Collection, fields: Row) -> Result<Document, StoreError>;

    /// Merges `fields` into the document. Returns the updated document, or
    /// `None` when it does not exist.
    async fn update_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
        fields: Row,
    ) -> Result<Option<Document>, StoreError>;

    /// Deletes by key. Returns the removed document, if any.
    async fn delete_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<Option<Document>, StoreError>;

    /// Deletes the first document matching `filter`.
    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError>;

    /// Deletes every document matching `filter`, returning how many went.
    async fn delete_many(&self, collection: Collection, filter: &Filter) -> Result<u64, StoreError>;

    /// Cheap liveness probe.
    async fn ping(&self) -> Result<(), StoreError>;
}
