//! Stored documents and field-path helpers.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::domain::foundation::{DocumentId, Timestamp, ValidationError};

/// A shaped or stored document body: field name to JSON value.
pub type Row = Map<String, Value>;

/// Primary key field present in every document.
pub const ID_FIELD: &str = "_id";

/// Creation time field, set once on insert.
pub const CREATED_AT: &str = "createdAt";

/// Last modification time field.
pub const UPDATED_AT: &str = "updatedAt";

/// Named set of documents of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Users,
    Videos,
    Tweets,
    Comments,
    Likes,
    Playlists,
    Subscriptions,
}

impl Collection {
    /// Storage name of the collection.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Videos => "videos",
            Collection::Tweets => "tweets",
            Collection::Comments => "comments",
            Collection::Likes => "likes",
            Collection::Playlists => "playlists",
            Collection::Subscriptions => "subscriptions",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record belonging to exactly one collection.
///
/// The body always carries `_id`, `createdAt` and `updatedAt` alongside the
/// entity fields, so a document can be handed to the pipeline as a row
/// without conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    collection: Collection,
    id: DocumentId,
    body: Row,
}

impl Document {
    /// Creates a new document with a fresh key and timestamps.
    ///
    /// Reserved fields in `fields` are overwritten.
    pub fn new(collection: Collection, fields: Row, now: Timestamp) -> Self {
        let id = DocumentId::new();
        let mut body = fields;
        body.insert(ID_FIELD.to_string(), id.to_value());
        body.insert(CREATED_AT.to_string(), Value::String(now.to_rfc3339()));
        body.insert(UPDATED_AT.to_string(), Value::String(now.to_rfc3339()));
        Self {
            collection,
            id,
            body,
        }
    }

    /// Rebuilds a document from a stored body.
    pub fn from_body(collection: Collection, body: Row) -> Result<Self, ValidationError> {
        let id = body
            .get(ID_FIELD)
            .and_then(Value::as_str)
            .ok_or_else(|| ValidationError::empty_field(ID_FIELD))
            .and_then(|raw| DocumentId::parse(collection.as_str(), raw))?;
        Ok(Self {
            collection,
            id,
            body,
        })
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    pub fn body(&self) -> &Row {
        &self.body
    }

    pub fn into_body(self) -> Row {
        self.body
    }

    /// Reads a (possibly dotted) field path.
    pub fn get(&self, path: &str) -> Option<&Value> {
        lookup_path(&self.body, path)
    }

    pub fn created_at(&self) -> Option<Timestamp> {
        self.body
            .get(CREATED_AT)
            .and_then(Value::as_str)
            .and_then(Timestamp::parse)
    }

    /// Merges `fields` into the body and bumps `updatedAt`.
    ///
    /// `_id` and `createdAt` are never overwritten.
    pub fn apply_update(&mut self, fields: Row, now: Timestamp) {
        for (key, value) in fields {
            if key == ID_FIELD || key == CREATED_AT {
                continue;
            }
            self.body.insert(key, value);
        }
        self.body
            .insert(UPDATED_AT.to_string(), Value::String(now.to_rfc3339()));
    }

    /// Deserializes the body into a typed entity.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.body.clone()))
    }
}

/// Resolves a dotted path (`owner.username`) through nested objects.
pub fn lookup_path<'a>(row: &'a Row, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = row.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Checks that a key is a plain field path: dot-separated segments of
/// ASCII letters, digits and underscores.
pub fn validate_key(key: &str) -> Result<(), ValidationError> {
    let valid = !key.is_empty()
        && key.split('.').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
        });
    if valid {
        Ok(())
    } else {
        Err(ValidationError::invalid_key(key))
    }
}
