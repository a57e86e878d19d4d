//! PostgreSQL implementation of DocumentStore.
//!
//! All collections share one `documents` table with a JSONB body. Filters
//! are translated to JSONB path predicates; aggregation runs inside a
//! read-only REPEATABLE READ transaction so every scan of one pipeline sees
//! the same snapshot.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{Executor, PgPool, Postgres, QueryBuilder, Row as _, Transaction};
use tokio::sync::Mutex;
use tracing::warn;

use super::executor::{execute, RowSource};
use crate::domain::foundation::{DocumentId, Timestamp};
use crate::domain::read_model::{
    Aggregation, Collection, Condition, Document, Filter, Pipeline, Row, CREATED_AT, ID_FIELD,
    UPDATED_AT,
};
use crate::ports::{DocumentStore, StoreError};

/// PostgreSQL implementation of DocumentStore.
#[derive(Clone)]
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    /// Creates a new PostgresDocumentStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies pending schema migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Query(format!("Failed to run migrations: {}", e)))
    }
}

/// Maps driver errors onto the port's error kinds.
fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolTimedOut => StoreError::Timeout,
        sqlx::Error::Io(e) => StoreError::Unavailable(e.to_string()),
        sqlx::Error::PoolClosed => StoreError::Unavailable("connection pool closed".to_string()),
        sqlx::Error::Tls(e) => StoreError::Unavailable(e.to_string()),
        sqlx::Error::Database(e) if e.is_unique_violation() => {
            StoreError::Duplicate(e.message().to_string())
        }
        other => StoreError::Query(other.to_string()),
    }
}

fn path_segments(field: &str) -> Vec<String> {
    field.split('.').map(str::to_string).collect()
}

fn push_path(qb: &mut QueryBuilder<'_, Postgres>, field: &str) {
    qb.push("(body #> ");
    qb.push_bind(path_segments(field));
    qb.push(")");
}

/// Appends the SQL predicate for one condition.
///
/// Array-valued fields match when any element matches, and a missing field
/// compares equal to JSON `null`.
fn push_condition(qb: &mut QueryBuilder<'_, Postgres>, condition: &Condition) {
    match condition {
        Condition::Equals { field, value } if value.is_null() => {
            qb.push("(");
            push_path(qb, field);
            qb.push(" IS NULL OR ");
            push_path(qb, field);
            qb.push(" = 'null'::jsonb)");
        }
        Condition::Equals { field, value } => {
            qb.push("(");
            push_path(qb, field);
            qb.push(" = ");
            qb.push_bind(Json(value.clone()));
            qb.push(" OR (jsonb_typeof");
            push_path(qb, field);
            qb.push(" = 'array' AND ");
            push_path(qb, field);
            qb.push(" @> jsonb_build_array(");
            qb.push_bind(Json(value.clone()));
            qb.push(")))");
        }
        Condition::EqualsIgnoreCase { field, value } => {
            qb.push("lower(body #>> ");
            qb.push_bind(path_segments(field));
            qb.push(") = lower(");
            qb.push_bind(value.clone());
            qb.push(")");
        }
        Condition::NotNull { field } => {
            qb.push("(");
            push_path(qb, field);
            qb.push(" IS NOT NULL AND ");
            push_path(qb, field);
            qb.push(" <> 'null'::jsonb)");
        }
        Condition::In { values, .. } if values.is_empty() => {
            qb.push("FALSE");
        }
        Condition::In { field, values } => {
            let values = Value::Array(values.clone());
            qb.push("((jsonb_typeof");
            push_path(qb, field);
            qb.push(" <> 'array' AND ");
            qb.push_bind(Json(values.clone()));
            qb.push(" @> jsonb_build_array");
            push_path(qb, field);
            qb.push(") OR (jsonb_typeof");
            push_path(qb, field);
            qb.push(" = 'array' AND EXISTS (SELECT 1 FROM jsonb_array_elements");
            push_path(qb, field);
            qb.push(" AS elem WHERE ");
            qb.push_bind(Json(values));
            qb.push(" @> jsonb_build_array(elem))))");
        }
    }
}

/// `collection = $1 AND <conditions>`.
fn push_where(qb: &mut QueryBuilder<'_, Postgres>, collection: Collection, filter: &Filter) {
    qb.push("collection = ");
    qb.push_bind(collection.as_str());
    for condition in filter.conditions() {
        qb.push(" AND ");
        push_condition(qb, condition);
    }
}

fn select_bodies(collection: Collection, filter: &Filter, limit: Option<i64>) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT body FROM documents WHERE ");
    push_where(&mut qb, collection, filter);
    qb.push(" ORDER BY seq");
    if let Some(limit) = limit {
        qb.push(" LIMIT ");
        qb.push_bind(limit);
    }
    qb
}

fn row_to_body(row: &PgRow) -> Result<Row, StoreError> {
    row.try_get::<Json<Row>, _>("body")
        .map(|json| json.0)
        .map_err(map_sqlx_error)
}

fn row_to_document(collection: Collection, row: &PgRow) -> Result<Document, StoreError> {
    let body = row_to_body(row)?;
    Document::from_body(collection, body).map_err(|e| StoreError::Corrupt {
        collection: collection.to_string(),
        reason: e.to_string(),
    })
}

async fn fetch_bodies<'e, E>(
    executor: E,
    collection: Collection,
    filter: &Filter,
) -> Result<Vec<Row>, StoreError>
where
    E: Executor<'e, Database = Postgres>,
{
    let mut qb = select_bodies(collection, filter, None);
    let rows = qb
        .build()
        .fetch_all(executor)
        .await
        .map_err(map_sqlx_error)?;
    rows.iter().map(row_to_body).collect()
}

fn timestamp_field(body: &Row, field: &str) -> DateTime<Utc> {
    body.get(field)
        .and_then(Value::as_str)
        .and_then(Timestamp::parse)
        .map(|ts| *ts.as_datetime())
        .unwrap_or_else(Utc::now)
}

/// Scans issued through one open transaction.
struct TransactionSource<'c> {
    tx: Mutex<Transaction<'c, Postgres>>,
}

#[async_trait]
impl RowSource for TransactionSource<'_> {
    async fn scan(&self, collection: Collection, filter: &Filter) -> Result<Vec<Row>, StoreError> {
        let mut guard = self.tx.lock().await;
        fetch_bodies(&mut **guard, collection, filter).await
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Document>, StoreError> {
        let mut qb = select_bodies(collection, filter, None);
        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        rows.iter()
            .map(|row| row_to_document(collection, row))
            .collect()
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        let mut qb = select_bodies(collection, filter, Some(1));
        let row = qb
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        row.as_ref()
            .map(|row| row_to_document(collection, row))
            .transpose()
    }

    async fn aggregate(&self, pipeline: &Pipeline) -> Result<Aggregation, StoreError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        let source = TransactionSource { tx: Mutex::new(tx) };
        let aggregation = execute(pipeline, &source).await?;

        if let Err(e) = source.tx.into_inner().commit().await {
            warn!(error = %e, "Failed to close read-only snapshot");
        }
        Ok(aggregation)
    }

    async fn create(&self, collection: Collection, fields: Row) -> Result<Document, StoreError> {
        let document = Document::new(collection, fields, Timestamp::now());
        let created_at = timestamp_field(document.body(), CREATED_AT);

        sqlx::query(
            r#"
            INSERT INTO documents (id, collection, body, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            "#,
        )
        .bind(document.id().as_uuid())
        .bind(collection.as_str())
        .bind(Json(document.body()))
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(document)
    }

    async fn update_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
        fields: Row,
    ) -> Result<Option<Document>, StoreError> {
        let now = Timestamp::now();
        let mut patch: Row = fields
            .into_iter()
            .filter(|(key, _)| key != ID_FIELD && key != CREATED_AT)
            .collect();
        patch.insert(UPDATED_AT.to_string(), Value::String(now.to_rfc3339()));

        let row = sqlx::query(
            r#"
            UPDATE documents
            SET body = body || $3, updated_at = $4
            WHERE collection = $1 AND id = $2
            RETURNING body
            "#,
        )
        .bind(collection.as_str())
        .bind(id.as_uuid())
        .bind(Json(patch))
        .bind(*now.as_datetime())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref()
            .map(|row| row_to_document(collection, row))
            .transpose()
    }

    async fn delete_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2 RETURNING body")
            .bind(collection.as_str())
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.as_ref()
            .map(|row| row_to_document(collection, row))
            .transpose()
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        let mut qb = QueryBuilder::new("DELETE FROM documents WHERE id = (SELECT id FROM documents WHERE ");
        push_where(&mut qb, collection, filter);
        qb.push(" ORDER BY seq LIMIT 1) RETURNING body");

        let row = qb
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        row.as_ref()
            .map(|row| row_to_document(collection, row))
            .transpose()
    }

    async fn delete_many(&self, collection: Collection, filter: &Filter) -> Result<u64, StoreError> {
        let mut qb = QueryBuilder::new("DELETE FROM documents WHERE ");
        push_where(&mut qb, collection, filter);
        let result = qb
            .build()
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(map_sqlx_error)
    }
}
