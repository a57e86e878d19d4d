//! Output shaping: field allow-lists and secret stripping.
//!
//! Credentials never leave the read model. Secret fields are removed from
//! every returned row and from every joined document at every depth, with
//! or without a projection.

use serde_json::Value;

use super::document::{validate_key, Row, ID_FIELD};
use crate::domain::foundation::ValidationError;

/// Field names that are always stripped.
const SECRET_FIELDS: &[&str] = &["password", "refreshToken", "accessToken"];

/// True for fields holding credentials or tokens.
pub fn is_secret_field(name: &str) -> bool {
    if SECRET_FIELDS.contains(&name) {
        return true;
    }
    let lowered = name.to_ascii_lowercase();
    lowered.contains("password") || lowered.ends_with("token")
}

/// Removes secret fields from a value, recursing into objects and arrays.
pub fn strip_secrets(value: &mut Value) {
    match value {
        Value::Object(map) => strip_secrets_row(map),
        Value::Array(items) => items.iter_mut().for_each(strip_secrets),
        _ => {}
    }
}

/// Removes secret fields from a row, recursing into nested values.
pub fn strip_secrets_row(row: &mut Row) {
    row.retain(|key, _| !is_secret_field(key));
    for value in row.values_mut() {
        strip_secrets(value);
    }
}

/// Allow-list of output fields.
///
/// `_id` is kept unless [`Projection::without_id`] is used. A nested
/// projection applies to an object field or to each object of an array
/// field; a `null` field stays `null` so missing relations remain visible.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    fields: Vec<(String, Option<Projection>)>,
    include_id: bool,
}

impl Default for Projection {
    fn default() -> Self {
        Self::new()
    }
}

impl Projection {
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            include_id: true,
        }
    }

    /// Keeps a field. Dotted paths (`owner.username`) become nested
    /// projections without `_id`.
    pub fn include(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        match path.split_once('.') {
            None => {
                if !self.fields.iter().any(|(name, _)| *name == path) {
                    self.fields.push((path, None));
                }
            }
            Some((head, rest)) => {
                let rest = rest.to_string();
                match self.fields.iter_mut().find(|(name, _)| name == head) {
                    Some((_, nested)) => {
                        let inner = nested.take().unwrap_or_else(|| Projection::new().without_id());
                        *nested = Some(inner.include(rest));
                    }
                    None => {
                        let inner = Projection::new().without_id().include(rest);
                        self.fields.push((head.to_string(), Some(inner)));
                    }
                }
            }
        }
        self
    }

    /// Keeps several top-level fields.
    pub fn fields<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().fold(self, |p, name| p.include(name))
    }

    /// Keeps a field and shapes it with its own projection.
    pub fn nested(mut self, field: impl Into<String>, projection: Projection) -> Self {
        let field = field.into();
        self.fields.retain(|(name, _)| *name != field);
        self.fields.push((field, Some(projection)));
        self
    }

    pub fn without_id(mut self) -> Self {
        self.include_id = false;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for (name, nested) in &self.fields {
            validate_key(name)?;
            if let Some(nested) = nested {
                nested.validate()?;
            }
        }
        Ok(())
    }

    /// Produces the shaped copy of `row`. Secrets are stripped even when
    /// explicitly listed.
    pub fn apply(&self, row: &Row) -> Row {
        let mut out = Row::new();
        if self.include_id {
            if let Some(id) = row.get(ID_FIELD) {
                out.insert(ID_FIELD.to_string(), id.clone());
            }
        }
        for (name, nested) in &self.fields {
            if is_secret_field(name) {
                continue;
            }
            let Some(value) = row.get(name) else {
                continue;
            };
            let shaped = match nested {
                None => Some(value.clone()),
                Some(nested) => nested.apply_value(value),
            };
            if let Some(shaped) = shaped {
                out.insert(name.clone(), shaped);
            }
        }
        strip_secrets_row(&mut out);
        out
    }

    fn apply_value(&self, value: &Value) -> Option<Value> {
        match value {
            Value::Object(map) => Some(Value::Object(self.apply(map))),
            Value::Array(items) => Some(Value::Array(
                items
                    .iter()
                    .filter_map(|item| item.as_object().map(|map| Value::Object(self.apply(map))))
                    .collect(),
            )),
            Value::Null => Some(Value::Null),
            _ => None,
        }
    }
}
