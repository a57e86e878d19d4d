//! Paginated comments of a video.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CommentId, Timestamp, VideoId};
use crate::domain::read_model::{
    Collection, Filter, Projection, ReadModelBuilder, SortSpec, CREATED_AT,
};
use crate::domain::user::{owner_join, UserSummary};

/// A comment with its author's public name and avatar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    #[serde(rename = "_id")]
    pub id: CommentId,
    pub content: String,
    pub created_at: Timestamp,
    /// `None` when the author no longer exists.
    #[serde(default)]
    pub owner: Option<UserSummary>,
}

/// Comments on `video`, newest first.
pub fn video_comments(video: VideoId) -> ReadModelBuilder {
    ReadModelBuilder::new(Collection::Comments)
        .filter(Filter::all().eq("video", video.to_value()))
        .join(owner_join(&["username", "avatar"]))
        .sort(SortSpec::newest_first())
        .project(Projection::new().fields(["content", CREATED_AT, "owner"]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::read_model::{decode_rows, StagedRow};
    use serde_json::json;

    #[test]
    fn comments_keep_author_summary_only() {
        let pipeline = video_comments(VideoId::new()).build(None).unwrap();
        let mut row = StagedRow::new(
            json!({
                "_id": CommentId::new().to_string(),
                "content": "first",
                "video": "v",
                "owner": "u1",
                "createdAt": "2024-01-01T00:00:00.000000Z",
            })
            .as_object()
            .cloned()
            .unwrap(),
        );
        let author = json!({
            "_id": "u1", "username": "ana", "avatar": "/a.png",
            "email": "ana@example.com", "password": "hash", "refreshToken": "r"
        });
        pipeline.joins()[0].attach(&mut row, &[author.as_object().cloned().unwrap()]);

        let views: Vec<CommentView> = decode_rows(pipeline.finish(vec![row]).rows).unwrap();
        let owner = views[0].owner.clone().unwrap();
        assert_eq!(owner.username, "ana");
        assert_eq!(owner.avatar.as_deref(), Some("/a.png"));
        assert_eq!(owner.email, None);
        assert_eq!(owner.id, None);
    }

    #[test]
    fn deleted_author_joins_as_null() {
        let pipeline = video_comments(VideoId::new()).build(None).unwrap();
        let mut row = StagedRow::new(
            json!({
                "_id": CommentId::new().to_string(),
                "content": "orphan",
                "owner": "gone",
                "createdAt": "2024-01-01T00:00:00.000000Z",
            })
            .as_object()
            .cloned()
            .unwrap(),
        );
        pipeline.joins()[0].attach(&mut row, &[]);

        let out = pipeline.finish(vec![row]);
        assert_eq!(out.rows[0].get("owner"), Some(&serde_json::Value::Null));
    }
}
