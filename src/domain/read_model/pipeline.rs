//! Validated aggregation pipelines.
//!
//! Stages run in a fixed order: filter, joins, computed fields, sort,
//! count, window, project. The filter and joins need store access and are
//! run by the store adapter; everything after the joins is pure and lives
//! in [`Pipeline::finish`], so every adapter shapes rows identically.

use super::computed::ComputedField;
use super::document::{Collection, Row};
use super::filter::Filter;
use super::join::{JoinSpec, StagedRow};
use super::page::PageWindow;
use super::projection::{strip_secrets_row, Projection};
use super::sort::SortSpec;

/// Rows of one page (or of the whole set) plus the pre-window count.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Aggregation {
    pub rows: Vec<Row>,
    pub total: u64,
}

/// A pipeline whose keys have all been validated.
///
/// Built only through `ReadModelBuilder::build`.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    pub(super) collection: Collection,
    pub(super) filter: Filter,
    pub(super) joins: Vec<JoinSpec>,
    pub(super) computed: Vec<ComputedField>,
    pub(super) sort: Option<SortSpec>,
    pub(super) projection: Option<Projection>,
    pub(super) window: Option<PageWindow>,
}

impl Pipeline {
    pub fn collection(&self) -> Collection {
        self.collection
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn joins(&self) -> &[JoinSpec] {
        &self.joins
    }

    pub fn window(&self) -> Option<PageWindow> {
        self.window
    }

    /// Runs the stages after the joins over the joined rows.
    pub fn finish(&self, mut rows: Vec<StagedRow>) -> Aggregation {
        for staged in rows.iter_mut() {
            for field in &self.computed {
                let value = field.evaluate(staged);
                staged.row.insert(field.name.clone(), value);
            }
        }

        let mut rows: Vec<Row> = rows.into_iter().map(|staged| staged.row).collect();
        if let Some(sort) = &self.sort {
            rows.sort_by(|a, b| sort.compare(a, b));
        }

        let total = rows.len() as u64;
        let rows = match self.window {
            Some(window) => window.apply(rows),
            None => rows,
        };

        let rows = rows
            .into_iter()
            .map(|row| match &self.projection {
                Some(projection) => projection.apply(&row),
                None => {
                    let mut row = row;
                    strip_secrets_row(&mut row);
                    row
                }
            })
            .collect();

        Aggregation { rows, total }
    }
}
