//! In-Memory Document Store Adapter
//!
//! Keeps every collection in a process-local map.
//! Used for development without a database and throughout the tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::executor::{execute, RowSource};
use crate::domain::foundation::{DocumentId, Timestamp};
use crate::domain::read_model::{Aggregation, Collection, Document, Filter, Pipeline, Row};
use crate::ports::{DocumentStore, StoreError};

type Collections = HashMap<Collection, Vec<Document>>;

/// In-memory storage for all collections.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    collections: Arc<RwLock<Collections>>,
}

impl InMemoryDocumentStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection
    pub async fn count(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .await
            .get(&collection)
            .map_or(0, Vec::len)
    }
}

/// Read view over a held read guard.
struct Snapshot<'a> {
    collections: &'a Collections,
}

#[async_trait]
impl RowSource for Snapshot<'_> {
    async fn scan(&self, collection: Collection, filter: &Filter) -> Result<Vec<Row>, StoreError> {
        Ok(self
            .collections
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| filter.matches(doc.body()))
                    .map(|doc| doc.body().clone())
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| filter.matches(doc.body()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|doc| filter.matches(doc.body())))
            .cloned())
    }

    async fn aggregate(&self, pipeline: &Pipeline) -> Result<Aggregation, StoreError> {
        // One read guard for the whole pipeline keeps total and rows consistent.
        let collections = self.collections.read().await;
        let snapshot = Snapshot {
            collections: &collections,
        };
        execute(pipeline, &snapshot).await
    }

    async fn create(&self, collection: Collection, fields: Row) -> Result<Document, StoreError> {
        let document = Document::new(collection, fields, Timestamp::now());
        let mut collections = self.collections.write().await;
        collections
            .entry(collection)
            .or_default()
            .push(document.clone());
        Ok(document)
    }

    async fn update_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
        fields: Row,
    ) -> Result<Option<Document>, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(document) = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id() == id))
        else {
            return Ok(None);
        };
        document.apply_update(fields, Timestamp::now());
        Ok(Some(document.clone()))
    }

    async fn delete_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<Option<Document>, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(None);
        };
        Ok(docs
            .iter()
            .position(|doc| doc.id() == id)
            .map(|index| docs.remove(index)))
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(None);
        };
        Ok(docs
            .iter()
            .position(|doc| filter.matches(doc.body()))
            .map(|index| docs.remove(index)))
    }

    async fn delete_many(&self, collection: Collection, filter: &Filter) -> Result<u64, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(0);
        };
        let before = docs.len();
        docs.retain(|doc| !filter.matches(doc.body()));
        Ok((before - docs.len()) as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::read_model::{JoinSpec, PageRequest, Projection, ReadModelBuilder, SortSpec};
    use serde_json::{json, Value};

    fn fields(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn create_then_find_by_id() {
        let store = InMemoryDocumentStore::new();
        let doc = store
            .create(Collection::Tweets, fields(json!({"content": "hello"})))
            .await
            .unwrap();

        let found = store.find_by_id(Collection::Tweets, doc.id()).await.unwrap().unwrap();
        assert_eq!(found, doc);
        assert_eq!(store.count(Collection::Tweets).await, 1);
    }

    #[tokio::test]
    async fn update_merges_fields() {
        let store = InMemoryDocumentStore::new();
        let doc = store
            .create(Collection::Videos, fields(json!({"title": "a", "views": 0})))
            .await
            .unwrap();

        let updated = store
            .update_by_id(Collection::Videos, doc.id(), fields(json!({"views": 3})))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.get("title"), Some(&json!("a")));
        assert_eq!(updated.get("views"), Some(&json!(3)));

        let missing = store
            .update_by_id(Collection::Videos, DocumentId::new(), fields(json!({})))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn delete_one_and_many() {
        let store = InMemoryDocumentStore::new();
        for owner in ["a", "a", "b"] {
            store
                .create(Collection::Likes, fields(json!({"likedBy": owner})))
                .await
                .unwrap();
        }

        let removed = store
            .delete_one(Collection::Likes, &Filter::all().eq("likedBy", "b"))
            .await
            .unwrap();
        assert!(removed.is_some());

        let count = store
            .delete_many(Collection::Likes, &Filter::all().eq("likedBy", "a"))
            .await
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(store.count(Collection::Likes).await, 0);
    }

    #[tokio::test]
    async fn aggregate_resolves_nested_joins() {
        let store = InMemoryDocumentStore::new();
        let owner = store
            .create(
                Collection::Users,
                fields(json!({"username": "ana", "fullName": "Ana", "password": "h"})),
            )
            .await
            .unwrap();
        let video = store
            .create(
                Collection::Videos,
                fields(json!({"title": "v", "owner": owner.id().to_value()})),
            )
            .await
            .unwrap();
        store
            .create(
                Collection::Likes,
                fields(json!({"likedBy": owner.id().to_value(), "video": video.id().to_value()})),
            )
            .await
            .unwrap();

        let page = ReadModelBuilder::new(Collection::Likes)
            .join(
                JoinSpec::one(Collection::Videos, "video", "_id", "video").join(
                    JoinSpec::one(Collection::Users, "owner", "_id", "owner")
                        .project(Projection::new().without_id().include("username")),
                ),
            )
            .sort(SortSpec::newest_first())
            .fetch_page(&store, PageRequest::default())
            .await
            .unwrap();

        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0]["video"]["owner"], json!({"username": "ana"}));
    }
}
