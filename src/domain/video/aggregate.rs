//! Video entity.
//!
//! # Invariants
//!
//! - `title` is non-empty
//! - `duration` is a finite, non-negative number of seconds
//! - `videoFile` and `thumbnail` are public URLs returned by media storage
//! - unpublished videos are visible to their owner only

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    optional_text, require_text, text_or_empty, OwnedByUser, Timestamp, UserId, ValidationError,
    VideoId,
};
use crate::domain::read_model::{Collection, StoredEntity};

/// An uploaded video as stored in the videos collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    #[serde(rename = "_id")]
    pub id: VideoId,
    pub video_file: String,
    pub thumbnail: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub is_published: bool,
    pub owner: UserId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StoredEntity for Video {
    const COLLECTION: Collection = Collection::Videos;
    const NAME: &'static str = "Video";
}

impl OwnedByUser for Video {
    fn owner_id(&self) -> &UserId {
        &self.owner
    }
}

impl Video {
    /// Whether `viewer` may see this video.
    pub fn is_visible_to(&self, viewer: Option<&UserId>) -> bool {
        self.is_published || viewer.map_or(false, |v| self.is_owner(v))
    }

    /// View count after one more view.
    pub fn viewed(&self) -> ViewCount {
        ViewCount {
            views: self.views.saturating_add(1),
        }
    }

    /// Publication state flipped.
    pub fn publish_toggled(&self) -> PublishState {
        PublishState {
            is_published: !self.is_published,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewCount {
    pub views: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishState {
    pub is_published: bool,
}

/// Parses a duration in seconds.
pub fn parse_duration(raw: Option<&str>) -> Result<f64, ValidationError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(0.0),
        Some(raw) => raw,
    };
    let duration: f64 = raw
        .parse()
        .map_err(|_| ValidationError::invalid_format("duration", "must be a number of seconds"))?;
    if !duration.is_finite() || duration < 0.0 {
        return Err(ValidationError::invalid_format(
            "duration",
            "must be a non-negative number of seconds",
        ));
    }
    Ok(duration)
}

/// Validated metadata of a video about to be uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoDetails {
    pub title: String,
    pub description: String,
    pub duration: f64,
}

impl VideoDetails {
    pub fn new(
        title: &str,
        description: Option<&str>,
        duration: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            title: require_text("title", title)?,
            description: text_or_empty(description),
            duration: parse_duration(duration)?,
        })
    }

    /// The stored field set once both files are uploaded.
    pub fn into_new_video(self, owner: UserId, video_file: String, thumbnail: String) -> NewVideo {
        NewVideo {
            video_file,
            thumbnail,
            title: self.title,
            description: self.description,
            duration: self.duration,
            views: 0,
            is_published: true,
            owner,
        }
    }
}

/// Fields written when a video is created.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVideo {
    pub video_file: String,
    pub thumbnail: String,
    pub title: String,
    pub description: String,
    pub duration: f64,
    pub views: u64,
    pub is_published: bool,
    pub owner: UserId,
}

/// Partial update of a video's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl VideoChanges {
    /// A present title must not be blank; a present description may be.
    pub fn new(title: Option<&str>, description: Option<&str>) -> Result<Self, ValidationError> {
        Ok(Self {
            title: optional_text("title", title)?,
            description: description.map(|d| d.trim().to_string()),
            thumbnail: None,
        })
    }

    pub fn with_thumbnail(mut self, url: String) -> Self {
        self.thumbnail = Some(url);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.thumbnail.is_none()
    }
}
