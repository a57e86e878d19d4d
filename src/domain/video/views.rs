//! Video read models: listing cards, the detail page and the card shape
//! reused by watch history, liked videos and playlists.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::{Timestamp, UserId, ValidationError, VideoId};
use crate::domain::read_model::{
    Collection, ComputedField, Filter, JoinSpec, Projection, ReadModelBuilder, SortDirection,
    SortSpec, CREATED_AT, ID_FIELD,
};
use crate::domain::user::{owner_join, UserSummary};

/// Owner fields shown on a video card.
const CARD_OWNER_FIELDS: [&str; 3] = ["username", "fullName", "avatar"];

/// A video as shown in lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoCard {
    #[serde(rename = "_id")]
    pub id: VideoId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub thumbnail: String,
    pub video_file: String,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub views: u64,
    pub created_at: Timestamp,
    #[serde(default)]
    pub owner: Option<UserSummary>,
}

fn card_projection() -> Projection {
    Projection::new().fields([
        "title",
        "description",
        "thumbnail",
        "videoFile",
        "duration",
        "views",
        CREATED_AT,
        "owner",
    ])
}

/// Shapes the videos matched by `join` as cards with owner summaries.
pub fn with_card_shape(join: JoinSpec) -> JoinSpec {
    join.project(card_projection())
        .join(owner_join(&CARD_OWNER_FIELDS))
}

/// Fields a listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoSortKey {
    #[default]
    CreatedAt,
    Views,
    Duration,
    Title,
}

impl VideoSortKey {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        match raw.trim() {
            "createdAt" => Ok(Self::CreatedAt),
            "views" => Ok(Self::Views),
            "duration" => Ok(Self::Duration),
            "title" => Ok(Self::Title),
            other => Err(ValidationError::invalid_format(
                "sortBy",
                format!("'{}' is not one of createdAt, views, duration, title", other),
            )),
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            Self::CreatedAt => CREATED_AT,
            Self::Views => "views",
            Self::Duration => "duration",
            Self::Title => "title",
        }
    }
}

/// Listing options for published videos.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VideoListQuery {
    pub owner: Option<UserId>,
    pub sort_by: VideoSortKey,
    pub direction: Option<SortDirection>,
}

impl VideoListQuery {
    /// Parses the raw `sortBy`, `sortType` and `userId` query values.
    ///
    /// Without `sortType` the newest or largest values come first.
    pub fn parse(
        sort_by: Option<&str>,
        sort_type: Option<&str>,
        user_id: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let sort_by = match sort_by.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => VideoSortKey::parse(raw)?,
            None => VideoSortKey::default(),
        };
        let direction = match sort_type.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(SortDirection::parse(raw).ok_or_else(|| {
                ValidationError::invalid_format("sortType", "must be asc or desc")
            })?),
            None => None,
        };
        let owner = match user_id.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(UserId::parse(raw)?),
            None => None,
        };
        Ok(Self {
            owner,
            sort_by,
            direction,
        })
    }

    fn sort(&self) -> SortSpec {
        SortSpec {
            field: self.sort_by.field().to_string(),
            direction: self.direction.unwrap_or(SortDirection::Descending),
        }
    }
}

/// Published videos, optionally of one owner, as cards.
pub fn published_videos(query: &VideoListQuery) -> ReadModelBuilder {
    let mut filter = Filter::all().eq("isPublished", true);
    if let Some(owner) = query.owner {
        filter = filter.eq("owner", owner.to_value());
    }
    ReadModelBuilder::new(Collection::Videos)
        .filter(filter)
        .join(owner_join(&CARD_OWNER_FIELDS))
        .sort(query.sort())
        .project(card_projection())
}

/// A single video with its owner and like statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetail {
    #[serde(rename = "_id")]
    pub id: VideoId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub thumbnail: String,
    pub video_file: String,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default)]
    pub owner: Option<UserSummary>,
    pub likes_count: u64,
    pub is_liked: bool,
}

/// Detail view of `video`; `isLiked` is relative to `viewer`.
pub fn video_detail(video: VideoId, viewer: Option<UserId>) -> ReadModelBuilder {
    let viewer = viewer.map_or(Value::Null, |id| id.to_value());
    ReadModelBuilder::new(Collection::Videos)
        .filter(Filter::by_id(video))
        .join(
            JoinSpec::one(Collection::Users, "owner", ID_FIELD, "owner")
                .project(Projection::new().fields(CARD_OWNER_FIELDS)),
        )
        .join(JoinSpec::count(Collection::Likes, ID_FIELD, "video", "likes"))
        .compute(ComputedField::size("likesCount", "likes"))
        .compute(ComputedField::contains("isLiked", "likes.likedBy", viewer))
        .project(Projection::new().fields([
            "title",
            "description",
            "thumbnail",
            "videoFile",
            "duration",
            "views",
            "isPublished",
            CREATED_AT,
            "updatedAt",
            "owner",
            "likesCount",
            "isLiked",
        ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::read_model::{decode_row, StagedRow};
    use serde_json::json;

    #[test]
    fn list_query_defaults_to_newest_first() {
        let query = VideoListQuery::parse(None, None, None).unwrap();
        assert_eq!(query.sort_by, VideoSortKey::CreatedAt);
        assert_eq!(query.sort().direction, SortDirection::Descending);
        assert_eq!(query.owner, None);
    }

    #[test]
    fn list_query_parses_all_options() {
        let owner = UserId::new();
        let query =
            VideoListQuery::parse(Some("views"), Some("asc"), Some(&owner.to_string())).unwrap();
        assert_eq!(query.sort().field, "views");
        assert_eq!(query.sort().direction, SortDirection::Ascending);
        assert_eq!(query.owner, Some(owner));
    }

    #[test]
    fn list_query_rejects_unknown_values() {
        assert!(VideoListQuery::parse(Some("password"), None, None).is_err());
        assert!(VideoListQuery::parse(None, Some("sideways"), None).is_err());
        assert!(VideoListQuery::parse(None, None, Some("nope")).is_err());
    }

    #[test]
    fn view_pipelines_validate() {
        assert!(published_videos(&VideoListQuery::default()).build(None).is_ok());
        assert!(video_detail(VideoId::new(), None).build(None).is_ok());
    }

    #[test]
    fn detail_counts_likes_and_flags_viewer() {
        let viewer = UserId::new();
        let video = VideoId::new();
        let pipeline = video_detail(video, Some(viewer)).build(None).unwrap();

        let mut row = StagedRow::new(
            json!({
                "_id": video.to_string(),
                "title": "t", "thumbnail": "/t", "videoFile": "/v",
                "isPublished": true,
                "createdAt": "2024-01-01T00:00:00.000000Z",
                "updatedAt": "2024-01-01T00:00:00.000000Z",
                "owner": UserId::new().to_string(),
            })
            .as_object()
            .cloned()
            .unwrap(),
        );
        pipeline.joins()[0].attach(&mut row, &[]);
        let like = json!({"_id": "l", "video": video.to_string(), "likedBy": viewer.to_string()});
        pipeline.joins()[1].attach(&mut row, &[like.as_object().cloned().unwrap()]);

        let detail: VideoDetail = decode_row(pipeline.finish(vec![row]).rows.remove(0)).unwrap();
        assert_eq!(detail.likes_count, 1);
        assert!(detail.is_liked);
        assert_eq!(detail.owner, None);
    }
}
