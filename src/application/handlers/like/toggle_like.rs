//! ToggleLikeHandler - Command handler for liking and unliking.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::like::{like_filter, Like, LikeTarget, NewLike};
use crate::domain::read_model::{encode_fields, Collection, StoredEntity};
use crate::ports::DocumentStore;

/// Command to flip the caller's like of a video, comment or tweet.
#[derive(Debug, Clone)]
pub struct ToggleLikeCommand {
    pub user_id: UserId,
    pub target: LikeTarget,
}

/// Outcome of a toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleLikeResult {
    /// Whether the target is liked after the toggle.
    pub liked: bool,
}

pub struct ToggleLikeHandler {
    store: Arc<dyn DocumentStore>,
}

impl ToggleLikeHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: ToggleLikeCommand) -> Result<ToggleLikeResult, DomainError> {
        // 1. The target must exist
        let target = cmd.target;
        if self
            .store
            .find_by_id(target.collection(), target.document_id())
            .await?
            .is_none()
        {
            return Err(DomainError::not_found(target.name(), target.document_id()));
        }

        // 2. Remove an existing like, or add one
        let filter = like_filter(cmd.user_id, target);
        if let Some(existing) = self.store.find_one(Collection::Likes, &filter).await? {
            let like = Like::from_document(&existing)?;
            self.store.delete_by_id(Collection::Likes, existing.id()).await?;
            info!(like_id = %like.id, target = target.name(), "Like removed");
            return Ok(ToggleLikeResult { liked: false });
        }

        let fields = encode_fields(&NewLike::new(cmd.user_id, target))?;
        let created = self.store.create(Collection::Likes, fields).await?;
        info!(like_id = %created.id(), target = target.name(), "Like added");
        Ok(ToggleLikeResult { liked: true })
    }
}
