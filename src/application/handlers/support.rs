//! Store helpers shared by the handlers.
//!
//! Each helper turns a missing document into a `NotFound` error naming the
//! entity, so handlers read as a sequence of `?` steps.

use std::fmt::Display;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::domain::foundation::{DocumentId, DomainError};
use crate::domain::read_model::{decode_row, encode_fields, ReadModelBuilder, StoredEntity};
use crate::ports::{DocumentStore, MediaStorage};

/// Loads an entity by id.
pub(crate) async fn load<T, I>(store: &dyn DocumentStore, id: I) -> Result<T, DomainError>
where
    T: StoredEntity,
    I: Into<DocumentId> + Display + Copy,
{
    match store.find_by_id(T::COLLECTION, id.into()).await? {
        Some(document) => T::from_document(&document),
        None => Err(DomainError::not_found(T::NAME, id)),
    }
}

/// Fails with `NotFound` unless an entity with this id exists.
pub(crate) async fn ensure_exists<T, I>(store: &dyn DocumentStore, id: I) -> Result<(), DomainError>
where
    T: StoredEntity,
    I: Into<DocumentId> + Display + Copy,
{
    load::<T, I>(store, id).await.map(|_| ())
}

/// Inserts a new entity from its field set.
pub(crate) async fn create<T, F>(store: &dyn DocumentStore, fields: &F) -> Result<T, DomainError>
where
    T: StoredEntity,
    F: Serialize,
{
    let document = store.create(T::COLLECTION, encode_fields(fields)?).await?;
    T::from_document(&document)
}

/// Merges a field set into an existing entity and returns the result.
pub(crate) async fn update<T, I, F>(
    store: &dyn DocumentStore,
    id: I,
    fields: &F,
) -> Result<T, DomainError>
where
    T: StoredEntity,
    I: Into<DocumentId> + Display + Copy,
    F: Serialize,
{
    match store
        .update_by_id(T::COLLECTION, id.into(), encode_fields(fields)?)
        .await?
    {
        Some(document) => T::from_document(&document),
        None => Err(DomainError::not_found(T::NAME, id)),
    }
}

/// Deletes an entity by id.
pub(crate) async fn remove<T, I>(store: &dyn DocumentStore, id: I) -> Result<(), DomainError>
where
    T: StoredEntity,
    I: Into<DocumentId> + Display + Copy,
{
    match store.delete_by_id(T::COLLECTION, id.into()).await? {
        Some(_) => Ok(()),
        None => Err(DomainError::not_found(T::NAME, id)),
    }
}

/// Deletes a file that no stored document points at any more.
///
/// Runs after the owning write has committed, so a failure leaves only an
/// orphaned file and is logged instead of returned. Empty URLs are skipped.
pub(crate) async fn discard_media(media: &dyn MediaStorage, url: &str) {
    if url.is_empty() {
        return;
    }
    if let Err(e) = media.delete(url).await {
        warn!(url, error = %e, "Failed to delete media file");
    }
}

/// Runs a single-row read model, failing with `NotFound` when it is empty.
pub(crate) async fn fetch_view<V: DeserializeOwned>(
    store: &dyn DocumentStore,
    builder: ReadModelBuilder,
    name: &str,
    id: impl Display,
) -> Result<V, DomainError> {
    match builder.fetch_one(store).await? {
        Some(row) => decode_row(row),
        None => Err(DomainError::not_found(name, id)),
    }
}
