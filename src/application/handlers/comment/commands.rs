//! Comment commands: add, edit and delete.

use std::sync::Arc;

use tracing::info;

use crate::application::handlers::support::{create, ensure_exists, load, remove, update};
use crate::domain::comment::{Comment, CommentChanges, NewComment};
use crate::domain::foundation::{CommentId, DomainError, OwnedByUser, UserId, VideoId};
use crate::domain::read_model::{Collection, Filter};
use crate::domain::video::Video;
use crate::ports::DocumentStore;

/// Command to comment on a video.
#[derive(Debug, Clone)]
pub struct AddCommentCommand {
    pub video_id: VideoId,
    pub owner: UserId,
    pub content: String,
}

pub struct AddCommentHandler {
    store: Arc<dyn DocumentStore>,
}

impl AddCommentHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: AddCommentCommand) -> Result<Comment, DomainError> {
        let new_comment = NewComment::new(cmd.video_id, cmd.owner, &cmd.content)?;
        ensure_exists::<Video, _>(self.store.as_ref(), cmd.video_id).await?;

        let comment: Comment = create(self.store.as_ref(), &new_comment).await?;
        info!(comment_id = %comment.id, video_id = %comment.video, "Comment added");
        Ok(comment)
    }
}

/// Command to edit the caller's comment.
#[derive(Debug, Clone)]
pub struct UpdateCommentCommand {
    pub comment_id: CommentId,
    pub caller: UserId,
    pub content: String,
}

pub struct UpdateCommentHandler {
    store: Arc<dyn DocumentStore>,
}

impl UpdateCommentHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: UpdateCommentCommand) -> Result<Comment, DomainError> {
        let changes = CommentChanges::new(&cmd.content)?;
        let comment: Comment = load(self.store.as_ref(), cmd.comment_id).await?;
        comment.check_ownership(&cmd.caller)?;

        let comment: Comment = update(self.store.as_ref(), comment.id, &changes).await?;
        info!(comment_id = %comment.id, "Comment updated");
        Ok(comment)
    }
}

/// Command to delete the caller's comment and its likes.
#[derive(Debug, Clone)]
pub struct DeleteCommentCommand {
    pub comment_id: CommentId,
    pub caller: UserId,
}

pub struct DeleteCommentHandler {
    store: Arc<dyn DocumentStore>,
}

impl DeleteCommentHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: DeleteCommentCommand) -> Result<(), DomainError> {
        let comment: Comment = load(self.store.as_ref(), cmd.comment_id).await?;
        comment.check_ownership(&cmd.caller)?;

        remove::<Comment, _>(self.store.as_ref(), comment.id).await?;
        let likes = self
            .store
            .delete_many(
                Collection::Likes,
                &Filter::all().eq("comment", comment.id.to_value()),
            )
            .await?;

        info!(comment_id = %comment.id, likes, "Comment deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::support::fakes::store;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::video::VideoDetails;

    async fn seed_video(store: &dyn DocumentStore) -> Video {
        let new_video = VideoDetails::new("Intro", None, None)
            .unwrap()
            .into_new_video(UserId::new(), "/v".into(), "/t".into());
        create(store, &new_video).await.unwrap()
    }

    #[tokio::test]
    async fn comment_on_missing_video_is_not_found() {
        let err = AddCommentHandler::new(store())
            .handle(AddCommentCommand {
                video_id: VideoId::new(),
                owner: UserId::new(),
                content: "hi".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn only_author_may_edit_or_delete() {
        let store = store();
        let video = seed_video(store.as_ref()).await;
        let author = UserId::new();
        let comment = AddCommentHandler::new(store.clone())
            .handle(AddCommentCommand {
                video_id: video.id,
                owner: author,
                content: "first".into(),
            })
            .await
            .unwrap();

        let err = UpdateCommentHandler::new(store.clone())
            .handle(UpdateCommentCommand {
                comment_id: comment.id,
                caller: UserId::new(),
                content: "hijacked".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);

        let edited = UpdateCommentHandler::new(store.clone())
            .handle(UpdateCommentCommand {
                comment_id: comment.id,
                caller: author,
                content: "edited".into(),
            })
            .await
            .unwrap();
        assert_eq!(edited.content, "edited");

        let delete = DeleteCommentHandler::new(store.clone());
        let err = delete
            .handle(DeleteCommentCommand {
                comment_id: comment.id,
                caller: UserId::new(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
        delete
            .handle(DeleteCommentCommand {
                comment_id: comment.id,
                caller: author,
            })
            .await
            .unwrap();
        assert_eq!(store.count(Collection::Comments).await, 0);
    }
}
