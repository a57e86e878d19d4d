//! Typed access to schemaless documents.
//!
//! Entities and views are plain serde structs. Decoding failures mean the
//! stored body does not have the shape this code wrote, so they surface as
//! internal errors rather than validation errors.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::document::{Collection, Document, Row};
use crate::domain::foundation::DomainError;

/// An entity stored as one document in a fixed collection.
pub trait StoredEntity: DeserializeOwned {
    const COLLECTION: Collection;
    /// Human-readable name used in not-found messages.
    const NAME: &'static str;

    fn from_document(document: &Document) -> Result<Self, DomainError> {
        document.deserialize().map_err(|e| {
            DomainError::internal(format!(
                "Stored {} {} is malformed: {}",
                Self::NAME,
                document.id(),
                e
            ))
        })
    }
}

/// Decodes one shaped row into a view type.
pub fn decode_row<T: DeserializeOwned>(row: Row) -> Result<T, DomainError> {
    serde_json::from_value(Value::Object(row))
        .map_err(|e| DomainError::internal(format!("Read model row is malformed: {}", e)))
}

/// Decodes every row, failing on the first malformed one.
pub fn decode_rows<T: DeserializeOwned>(rows: Vec<Row>) -> Result<Vec<T>, DomainError> {
    rows.into_iter().map(decode_row).collect()
}

/// Serializes a field set for a create or update call.
pub fn encode_fields<T: Serialize>(fields: &T) -> Result<Row, DomainError> {
    match serde_json::to_value(fields) {
        Ok(Value::Object(row)) => Ok(row),
        Ok(other) => Err(DomainError::internal(format!(
            "Field set must serialize to an object, got {}",
            other
        ))),
        Err(e) => Err(DomainError::internal(format!("Failed to encode fields: {}", e))),
    }
}
