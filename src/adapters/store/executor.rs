//! Shared pipeline execution for store adapters.
//!
//! Adapters only need to supply filtered scans over one snapshot; join
//! resolution and the shaping stages are the same for every backend.

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};

use crate::domain::read_model::{Aggregation, Collection, Filter, JoinSpec, Pipeline, Row, StagedRow};
use crate::ports::StoreError;

/// Filtered reads against a single consistent snapshot.
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Document bodies of `collection` matching `filter`, in insertion order.
    async fn scan(&self, collection: Collection, filter: &Filter) -> Result<Vec<Row>, StoreError>;
}

/// Runs `pipeline` against `source`.
pub async fn execute(pipeline: &Pipeline, source: &dyn RowSource) -> Result<Aggregation, StoreError> {
    let base = source.scan(pipeline.collection(), pipeline.filter()).await?;
    let mut rows: Vec<StagedRow> = base.into_iter().map(StagedRow::new).collect();
    for join in pipeline.joins() {
        resolve_join(join, &mut rows, source).await?;
    }
    Ok(pipeline.finish(rows))
}

/// Fetches the foreign side of `join` in one scan, applies nested joins to
/// it, then attaches matches to each row.
fn resolve_join<'a>(
    join: &'a JoinSpec,
    rows: &'a mut [StagedRow],
    source: &'a dyn RowSource,
) -> BoxFuture<'a, Result<(), StoreError>> {
    async move {
        let keys = join.local_keys(rows);
        let foreign = if keys.is_empty() {
            Vec::new()
        } else {
            let scanned = source.scan(join.from, &join.foreign_filter(keys)).await?;
            let mut staged: Vec<StagedRow> = scanned.into_iter().map(StagedRow::new).collect();
            for nested in &join.joins {
                resolve_join(nested, &mut staged, source).await?;
            }
            staged.into_iter().map(|s| s.row).collect()
        };
        for row in rows.iter_mut() {
            join.attach(row, &foreign);
        }
        Ok(())
    }
    .boxed()
}
