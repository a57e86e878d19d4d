//! Match filters over base-document fields.
//!
//! A filter is a conjunction of conditions. Equality and membership follow
//! document-store semantics: when the stored field is an array, the
//! condition matches if any element matches, and a missing field compares
//! equal to `null`.

use serde_json::Value;

use super::document::{lookup_path, validate_key, Row, ID_FIELD};
use crate::domain::foundation::{DocumentId, ValidationError};

/// One predicate on a field path.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Exact value match.
    Equals { field: String, value: Value },
    /// Case-normalized string equality (usernames, emails).
    EqualsIgnoreCase { field: String, value: String },
    /// Field is present and not `null`.
    NotNull { field: String },
    /// Field equals one of `values`.
    In { field: String, values: Vec<Value> },
}

impl Condition {
    pub fn field(&self) -> &str {
        match self {
            Condition::Equals { field, .. }
            | Condition::EqualsIgnoreCase { field, .. }
            | Condition::NotNull { field }
            | Condition::In { field, .. } => field,
        }
    }

    pub fn matches(&self, row: &Row) -> bool {
        let stored = lookup_path(row, self.field());
        match self {
            Condition::Equals { value, .. } => value_matches(stored, |v| v == value),
            Condition::EqualsIgnoreCase { value, .. } => {
                let wanted = value.to_lowercase();
                value_matches(stored, |v| {
                    v.as_str().map(|s| s.to_lowercase() == wanted).unwrap_or(false)
                })
            }
            Condition::NotNull { .. } => !matches!(stored, None | Some(Value::Null)),
            Condition::In { values, .. } => {
                value_matches(stored, |v| values.iter().any(|candidate| candidate == v))
            }
        }
    }
}

/// Applies `pred` to a stored value, or to each element when it is an array.
fn value_matches(stored: Option<&Value>, pred: impl Fn(&Value) -> bool) -> bool {
    match stored {
        None => pred(&Value::Null),
        Some(Value::Array(items)) => items.iter().any(&pred),
        Some(value) => pred(value),
    }
}

/// Conjunction of conditions. The empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    /// A filter matching every document.
    pub fn all() -> Self {
        Self::default()
    }

    /// Matches the document with the given key.
    pub fn by_id(id: impl Into<DocumentId>) -> Self {
        Self::all().eq(ID_FIELD, id.into().to_value())
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push(Condition::Equals {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn eq_ignore_case(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.conditions.push(Condition::EqualsIgnoreCase {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn not_null(mut self, field: impl Into<String>) -> Self {
        self.conditions.push(Condition::NotNull {
            field: field.into(),
        });
        self
    }

    pub fn is_in(mut self, field: impl Into<String>, values: Vec<Value>) -> Self {
        self.conditions.push(Condition::In {
            field: field.into(),
            values,
        });
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches(&self, row: &Row) -> bool {
        self.conditions.iter().all(|c| c.matches(row))
    }

    /// Rejects conditions on keys that are not plain field paths.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.conditions
            .iter()
            .try_for_each(|c| validate_key(c.field()))
    }
}
