//! Left-outer joins between collections.
//!
//! A join matches `local_field` of each row against `foreign_field` of the
//! documents in `from`. When the local value is an array (a playlist's
//! `videos`, a user's `watchHistory`), each element is matched and the
//! output follows the array order. Rows without a match are kept.

use std::collections::{HashMap, HashSet};

use serde_json::Value;

use super::document::{lookup_path, validate_key, Collection, Row};
use super::filter::Filter;
use super::projection::{strip_secrets_row, Projection};
use crate::domain::foundation::ValidationError;

/// How matched documents are written into the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// First match, or `null` when there is none.
    One,
    /// Number of matches. The matches stay available to computed fields.
    Count,
    /// Every match, in order.
    Many,
}

/// Row under construction: the visible fields plus joined documents kept
/// aside for computed fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StagedRow {
    pub row: Row,
    pub scratch: HashMap<String, Vec<Value>>,
}

impl StagedRow {
    pub fn new(row: Row) -> Self {
        Self {
            row,
            scratch: HashMap::new(),
        }
    }

    /// Joined documents for `field`: scratch first, then an array field of
    /// the row itself.
    pub fn joined(&self, field: &str) -> &[Value] {
        if let Some(items) = self.scratch.get(field) {
            return items;
        }
        match lookup_path(&self.row, field) {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        }
    }
}

/// One join stage.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinSpec {
    pub from: Collection,
    pub local_field: String,
    pub foreign_field: String,
    pub as_field: String,
    pub kind: JoinKind,
    pub projection: Option<Projection>,
    pub joins: Vec<JoinSpec>,
}

impl JoinSpec {
    fn with_kind(
        kind: JoinKind,
        from: Collection,
        local_field: impl Into<String>,
        foreign_field: impl Into<String>,
        as_field: impl Into<String>,
    ) -> Self {
        Self {
            from,
            local_field: local_field.into(),
            foreign_field: foreign_field.into(),
            as_field: as_field.into(),
            kind,
            projection: None,
            joins: Vec::new(),
        }
    }

    pub fn one(
        from: Collection,
        local_field: impl Into<String>,
        foreign_field: impl Into<String>,
        as_field: impl Into<String>,
    ) -> Self {
        Self::with_kind(JoinKind::One, from, local_field, foreign_field, as_field)
    }

    pub fn count(
        from: Collection,
        local_field: impl Into<String>,
        foreign_field: impl Into<String>,
        as_field: impl Into<String>,
    ) -> Self {
        Self::with_kind(JoinKind::Count, from, local_field, foreign_field, as_field)
    }

    pub fn many(
        from: Collection,
        local_field: impl Into<String>,
        foreign_field: impl Into<String>,
        as_field: impl Into<String>,
    ) -> Self {
        Self::with_kind(JoinKind::Many, from, local_field, foreign_field, as_field)
    }

    /// Shapes each matched document.
    pub fn project(mut self, projection: Projection) -> Self {
        self.projection = Some(projection);
        self
    }

    /// Adds a join run on the matched documents before they are attached.
    pub fn join(mut self, nested: JoinSpec) -> Self {
        self.joins.push(nested);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_key(&self.local_field)?;
        validate_key(&self.foreign_field)?;
        validate_key(&self.as_field)?;
        if let Some(projection) = &self.projection {
            projection.validate()?;
        }
        self.joins.iter().try_for_each(JoinSpec::validate)
    }

    /// Distinct non-null local values across `rows`, in first-seen order.
    pub fn local_keys(&self, rows: &[StagedRow]) -> Vec<Value> {
        let mut seen = HashSet::new();
        rows.iter()
            .flat_map(|staged| local_values(&staged.row, &self.local_field))
            .filter(|value| seen.insert(value.to_string()))
            .collect()
    }

    /// Filter selecting the foreign documents that can match `keys`.
    pub fn foreign_filter(&self, keys: Vec<Value>) -> Filter {
        Filter::all().is_in(self.foreign_field.clone(), keys)
    }

    /// Attaches the matches among `foreign` to `staged`.
    ///
    /// `foreign` must already have had nested joins applied. Matched
    /// documents are projected (or stripped of secrets) before they are
    /// written.
    pub fn attach(&self, staged: &mut StagedRow, foreign: &[Row]) {
        let mut taken = vec![false; foreign.len()];
        let mut matched = Vec::new();
        for local in local_values(&staged.row, &self.local_field) {
            for (index, candidate) in foreign.iter().enumerate() {
                if taken[index] {
                    continue;
                }
                if foreign_matches(candidate, &self.foreign_field, &local) {
                    taken[index] = true;
                    matched.push(Value::Object(self.shape(candidate)));
                }
            }
        }

        let visible = match self.kind {
            JoinKind::One => matched.first().cloned().unwrap_or(Value::Null),
            JoinKind::Count => Value::from(matched.len() as u64),
            JoinKind::Many => Value::Array(matched.clone()),
        };
        staged.row.insert(self.as_field.clone(), visible);
        staged.scratch.insert(self.as_field.clone(), matched);
    }

    fn shape(&self, row: &Row) -> Row {
        match &self.projection {
            Some(projection) => projection.apply(row),
            None => {
                let mut row = row.clone();
                strip_secrets_row(&mut row);
                row
            }
        }
    }
}

/// Local join values: each element of an array, a scalar on its own, and
/// nothing for a missing or null field.
fn local_values(row: &Row, field: &str) -> Vec<Value> {
    match lookup_path(row, field) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => {
            let mut seen = HashSet::new();
            items
                .iter()
                .filter(|v| !v.is_null() && seen.insert(v.to_string()))
                .cloned()
                .collect()
        }
        Some(value) => vec![value.clone()],
    }
}

fn foreign_matches(candidate: &Row, field: &str, local: &Value) -> bool {
    match lookup_path(candidate, field) {
        Some(Value::Array(items)) => items.contains(local),
        Some(value) => value == local,
        None => false,
    }
}
