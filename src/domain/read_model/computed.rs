//! Fields derived from joined data.

use serde_json::Value;

use super::document::{lookup_path, validate_key};
use super::join::StagedRow;
use crate::domain::foundation::ValidationError;

/// Expression evaluated over an array of joined (or embedded) documents.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Number of elements.
    Size { array: String },
    /// Whether any element has `value` at `path` (or equals `value` when
    /// `path` is empty).
    Contains {
        array: String,
        path: Option<String>,
        value: Value,
    },
}

/// A named derived field added to each row before sorting.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedField {
    pub name: String,
    pub expression: Expression,
}

impl ComputedField {
    pub fn size(name: impl Into<String>, array: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expression: Expression::Size {
                array: array.into(),
            },
        }
    }

    /// `target` is `array.path`, e.g. `subscribers.subscriber`.
    pub fn contains(name: impl Into<String>, target: &str, value: impl Into<Value>) -> Self {
        let (array, path) = match target.split_once('.') {
            Some((array, path)) => (array.to_string(), Some(path.to_string())),
            None => (target.to_string(), None),
        };
        Self {
            name: name.into(),
            expression: Expression::Contains {
                array,
                path,
                value: value.into(),
            },
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_key(&self.name)?;
        match &self.expression {
            Expression::Size { array } => validate_key(array),
            Expression::Contains { array, path, .. } => {
                validate_key(array)?;
                path.as_deref().map_or(Ok(()), validate_key)
            }
        }
    }

    pub fn evaluate(&self, staged: &StagedRow) -> Value {
        match &self.expression {
            Expression::Size { array } => Value::from(staged.joined(array).len() as u64),
            Expression::Contains { array, path, value } => {
                let found = staged.joined(array).iter().any(|item| match path {
                    None => item == value,
                    Some(path) => item
                        .as_object()
                        .and_then(|obj| lookup_path(obj, path))
                        .map_or(false, |v| v == value),
                });
                Value::Bool(found)
            }
        }
    }
}
