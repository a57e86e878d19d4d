//! Fluent construction and execution of read-model pipelines.

use tracing::debug;

use super::computed::ComputedField;
use super::document::{Collection, Row};
use super::filter::Filter;
use super::join::JoinSpec;
use super::page::{PageRequest, PageResult, PageWindow};
use super::pipeline::Pipeline;
use super::projection::Projection;
use super::sort::SortSpec;
use crate::domain::foundation::{DomainError, ValidationError};
use crate::ports::DocumentStore;

/// Assembles a join + shape + paginate query over one base collection.
///
/// ```ignore
/// let page = ReadModelBuilder::new(Collection::Comments)
///     .filter(Filter::all().eq("video", video_id.to_value()))
///     .join(JoinSpec::one(Collection::Users, "owner", "_id", "owner"))
///     .sort(SortSpec::newest_first())
///     .fetch_page(store, PageRequest::default())
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct ReadModelBuilder {
    collection: Collection,
    filter: Filter,
    joins: Vec<JoinSpec>,
    computed: Vec<ComputedField>,
    sort: Option<SortSpec>,
    projection: Option<Projection>,
}

impl ReadModelBuilder {
    pub fn new(collection: Collection) -> Self {
        Self {
            collection,
            filter: Filter::all(),
            joins: Vec::new(),
            computed: Vec::new(),
            sort: None,
            projection: None,
        }
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn join(mut self, join: JoinSpec) -> Self {
        self.joins.push(join);
        self
    }

    pub fn compute(mut self, field: ComputedField) -> Self {
        self.computed.push(field);
        self
    }

    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn project(mut self, projection: Projection) -> Self {
        self.projection = Some(projection);
        self
    }

    /// Validates every key and freezes the pipeline.
    pub fn build(self, window: Option<PageWindow>) -> Result<Pipeline, ValidationError> {
        self.filter.validate()?;
        self.joins.iter().try_for_each(JoinSpec::validate)?;
        self.computed.iter().try_for_each(ComputedField::validate)?;
        if let Some(sort) = &self.sort {
            sort.validate()?;
        }
        if let Some(projection) = &self.projection {
            projection.validate()?;
        }
        Ok(Pipeline {
            collection: self.collection,
            filter: self.filter,
            joins: self.joins,
            computed: self.computed,
            sort: self.sort,
            projection: self.projection,
            window,
        })
    }

    /// Every matching row, unpaginated.
    pub async fn fetch_all(self, store: &dyn DocumentStore) -> Result<Vec<Row>, DomainError> {
        let pipeline = self.build(None)?;
        let aggregation = store.aggregate(&pipeline).await?;
        debug!(
            collection = %pipeline.collection(),
            total = aggregation.total,
            "Read model fetched"
        );
        Ok(aggregation.rows)
    }

    /// The first matching row after sorting.
    pub async fn fetch_one(self, store: &dyn DocumentStore) -> Result<Option<Row>, DomainError> {
        let pipeline = self.build(Some(PageWindow { skip: 0, take: 1 }))?;
        let aggregation = store.aggregate(&pipeline).await?;
        Ok(aggregation.rows.into_iter().next())
    }

    /// One page of rows plus navigation metadata.
    pub async fn fetch_page(
        self,
        store: &dyn DocumentStore,
        page: PageRequest,
    ) -> Result<PageResult<Row>, DomainError> {
        let pipeline = self.build(Some(page.window()))?;
        let aggregation = store.aggregate(&pipeline).await?;
        debug!(
            collection = %pipeline.collection(),
            page = page.page(),
            limit = page.limit(),
            total = aggregation.total,
            "Read model page fetched"
        );
        Ok(PageResult::new(aggregation.rows, aggregation.total, &page))
    }
}
