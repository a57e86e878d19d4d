//! Read model - join, shape and paginate queries over document collections.
//!
//! A [`ReadModelBuilder`] describes a query as data: a base collection, a
//! filter, left-outer joins (optionally nested), computed fields, a sort,
//! an output projection and a page window. The builder validates every key
//! and hands a [`Pipeline`] to a `DocumentStore`, which resolves the
//! filter and joins against a single snapshot and then calls
//! [`Pipeline::finish`] for the pure shaping stages.

mod builder;
mod computed;
mod document;
mod entity;
mod filter;
mod join;
mod page;
mod pipeline;
mod projection;
mod sort;

pub use builder::ReadModelBuilder;
pub use computed::{ComputedField, Expression};
pub use document::{
    lookup_path, validate_key, Collection, Document, Row, CREATED_AT, ID_FIELD, UPDATED_AT,
};
pub use entity::{decode_row, decode_rows, encode_fields, StoredEntity};
pub use filter::{Condition, Filter};
pub use join::{JoinKind, JoinSpec, StagedRow};
pub use page::{total_pages, PageRequest, PageResult, PageWindow, DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT};
pub use pipeline::{Aggregation, Pipeline};
pub use projection::{is_secret_field, strip_secrets, strip_secrets_row, Projection};
pub use sort::{compare_values, SortDirection, SortSpec};
