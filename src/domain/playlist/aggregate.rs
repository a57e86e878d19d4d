//! Playlist entity.
//!
//! # Invariants
//!
//! - `name` is non-empty
//! - `videos` holds no duplicates and keeps insertion order

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    optional_text, require_text, text_or_empty, OwnedByUser, PlaylistId, Timestamp, UserId,
    ValidationError, VideoId,
};
use crate::domain::read_model::{Collection, StoredEntity};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    #[serde(rename = "_id")]
    pub id: PlaylistId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub videos: Vec<VideoId>,
    pub owner: UserId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StoredEntity for Playlist {
    const COLLECTION: Collection = Collection::Playlists;
    const NAME: &'static str = "Playlist";
}

impl OwnedByUser for Playlist {
    fn owner_id(&self) -> &UserId {
        &self.owner
    }
}

impl Playlist {
    pub fn contains(&self, video: &VideoId) -> bool {
        self.videos.contains(video)
    }

    /// Appends `video`.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if the video is already in the playlist
    pub fn add_video(&mut self, video: VideoId) -> Result<(), ValidationError> {
        if self.contains(&video) {
            return Err(ValidationError::invalid_format(
                "videoId",
                "Video already exists in this playlist",
            ));
        }
        self.videos.push(video);
        Ok(())
    }

    /// Removes `video`.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if the video is not in the playlist
    pub fn remove_video(&mut self, video: &VideoId) -> Result<(), ValidationError> {
        if !self.contains(video) {
            return Err(ValidationError::invalid_format(
                "videoId",
                "Video not found in this playlist",
            ));
        }
        self.videos.retain(|v| v != video);
        Ok(())
    }

    /// Field set persisting the current video list.
    pub fn videos_changes(&self) -> PlaylistVideos {
        PlaylistVideos {
            videos: self.videos.clone(),
        }
    }
}

/// Fields written when a playlist is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlaylist {
    pub name: String,
    pub description: String,
    pub videos: Vec<VideoId>,
    pub owner: UserId,
}

impl NewPlaylist {
    pub fn new(owner: UserId, name: &str, description: Option<&str>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: require_text("name", name)?,
            description: text_or_empty(description),
            videos: Vec::new(),
            owner,
        })
    }
}

/// Partial update of a playlist's name and description.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PlaylistChanges {
    pub fn new(name: Option<&str>, description: Option<&str>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: optional_text("name", name)?,
            description: description.map(|d| d.trim().to_string()),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

/// Replacement video list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistVideos {
    pub videos: Vec<VideoId>,
}
