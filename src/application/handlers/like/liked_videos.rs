//! Paginated videos the caller has liked.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::like::{liked_videos, LikedVideo};
use crate::domain::read_model::{decode_row, PageRequest, PageResult};
use crate::ports::DocumentStore;

#[derive(Debug, Clone)]
pub struct ListLikedVideosQuery {
    pub user_id: UserId,
    pub page: PageRequest,
}

pub struct ListLikedVideosHandler {
    store: Arc<dyn DocumentStore>,
}

impl ListLikedVideosHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: ListLikedVideosQuery,
    ) -> Result<PageResult<LikedVideo>, DomainError> {
        liked_videos(query.user_id)
            .fetch_page(self.store.as_ref(), query.page)
            .await?
            .try_map(decode_row)
    }
}
