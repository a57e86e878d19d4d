//! Strongly-typed identifier value objects.
//!
//! Every stored document is keyed by a [`DocumentId`]. The entity-specific
//! identifiers wrap the same UUID so handlers cannot mix a video id up with a
//! playlist id, while the read-model layer still works on plain document keys.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Primary key of any stored document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Creates a new random DocumentId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a DocumentId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Parses a caller-supplied key, naming the entity in the error.
    pub fn parse(entity: &str, raw: &str) -> Result<Self, ValidationError> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| ValidationError::invalid_identifier(entity, raw))
    }

    /// The JSON form stored in relation fields.
    pub fn to_value(&self) -> Value {
        Value::String(self.0.to_string())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DocumentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Declares an entity identifier backed by a [`DocumentId`].
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $entity:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(DocumentId);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(DocumentId::new())
            }

            /// Parses a caller-supplied identifier.
            pub fn parse(raw: &str) -> Result<Self, ValidationError> {
                DocumentId::parse($entity, raw).map(Self)
            }

            /// Returns the underlying document key.
            pub fn document_id(&self) -> DocumentId {
                self.0
            }

            /// The JSON form stored in relation fields.
            pub fn to_value(&self) -> Value {
                self.0.to_value()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<DocumentId> for $name {
            fn from(id: DocumentId) -> Self {
                Self(id)
            }
        }

        impl From<$name> for DocumentId {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a registered user (also the channel id).
    UserId,
    "user"
);
entity_id!(
    /// Identifier of an uploaded video.
    VideoId,
    "video"
);
entity_id!(
    /// Identifier of a comment on a video.
    CommentId,
    "comment"
);
entity_id!(
    /// Identifier of a tweet.
    TweetId,
    "tweet"
);
entity_id!(
    /// Identifier of a playlist.
    PlaylistId,
    "playlist"
);

entity_id!(
    /// Identifier of a like on a video, comment or tweet.
    LikeId,
    "like"
);

entity_id!(
    /// Identifier of a subscriber-to-channel link.
    SubscriptionId,
    "subscription"
);
