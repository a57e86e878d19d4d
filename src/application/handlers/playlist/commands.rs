//! Playlist commands.
//!
//! Every change other than creation requires the caller to own the
//! playlist.

use std::sync::Arc;

use tracing::info;

use crate::application::handlers::support::{create, ensure_exists, load, remove, update};
use crate::domain::foundation::{DomainError, OwnedByUser, PlaylistId, UserId, VideoId};
use crate::domain::playlist::{NewPlaylist, Playlist, PlaylistChanges};
use crate::domain::video::Video;
use crate::ports::DocumentStore;

/// Command to create an empty playlist.
#[derive(Debug, Clone)]
pub struct CreatePlaylistCommand {
    pub owner: UserId,
    pub name: String,
    pub description: Option<String>,
}

pub struct CreatePlaylistHandler {
    store: Arc<dyn DocumentStore>,
}

impl CreatePlaylistHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: CreatePlaylistCommand) -> Result<Playlist, DomainError> {
        let new_playlist = NewPlaylist::new(cmd.owner, &cmd.name, cmd.description.as_deref())?;
        let playlist: Playlist = create(self.store.as_ref(), &new_playlist).await?;
        info!(playlist_id = %playlist.id, owner = %playlist.owner, "Playlist created");
        Ok(playlist)
    }
}

/// Command to rename or re-describe a playlist.
#[derive(Debug, Clone)]
pub struct UpdatePlaylistCommand {
    pub playlist_id: PlaylistId,
    pub caller: UserId,
    pub name: Option<String>,
    pub description: Option<String>,
}

pub struct UpdatePlaylistHandler {
    store: Arc<dyn DocumentStore>,
}

impl UpdatePlaylistHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: UpdatePlaylistCommand) -> Result<Playlist, DomainError> {
        let changes = PlaylistChanges::new(cmd.name.as_deref(), cmd.description.as_deref())?;
        if changes.is_empty() {
            return Err(DomainError::validation("name", "Provide a name or description to update"));
        }
        let playlist: Playlist = load(self.store.as_ref(), cmd.playlist_id).await?;
        playlist.check_ownership(&cmd.caller)?;

        let playlist: Playlist = update(self.store.as_ref(), playlist.id, &changes).await?;
        info!(playlist_id = %playlist.id, "Playlist updated");
        Ok(playlist)
    }
}

/// Command to delete a playlist.
#[derive(Debug, Clone)]
pub struct DeletePlaylistCommand {
    pub playlist_id: PlaylistId,
    pub caller: UserId,
}

pub struct DeletePlaylistHandler {
    store: Arc<dyn DocumentStore>,
}

impl DeletePlaylistHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: DeletePlaylistCommand) -> Result<(), DomainError> {
        let playlist: Playlist = load(self.store.as_ref(), cmd.playlist_id).await?;
        playlist.check_ownership(&cmd.caller)?;
        remove::<Playlist, _>(self.store.as_ref(), playlist.id).await?;
        info!(playlist_id = %playlist.id, "Playlist deleted");
        Ok(())
    }
}

/// Whether a playlist edit adds or removes the video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistEdit {
    Add,
    Remove,
}

/// Command to add a video to, or remove it from, a playlist.
#[derive(Debug, Clone)]
pub struct EditPlaylistVideosCommand {
    pub playlist_id: PlaylistId,
    pub video_id: VideoId,
    pub caller: UserId,
    pub edit: PlaylistEdit,
}

pub struct EditPlaylistVideosHandler {
    store: Arc<dyn DocumentStore>,
}

impl EditPlaylistVideosHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: EditPlaylistVideosCommand) -> Result<Playlist, DomainError> {
        // 1. Load and authorize
        let mut playlist: Playlist = load(self.store.as_ref(), cmd.playlist_id).await?;
        playlist.check_ownership(&cmd.caller)?;

        // 2. Apply the edit
        match cmd.edit {
            PlaylistEdit::Add => {
                ensure_exists::<Video, _>(self.store.as_ref(), cmd.video_id).await?;
                playlist.add_video(cmd.video_id)?;
            }
            PlaylistEdit::Remove => playlist.remove_video(&cmd.video_id)?,
        }

        // 3. Persist the whole list
        let playlist: Playlist =
            update(self.store.as_ref(), playlist.id, &playlist.videos_changes()).await?;
        info!(
            playlist_id = %playlist.id,
            video_id = %cmd.video_id,
            edit = ?cmd.edit,
            "Playlist videos edited"
        );
        Ok(playlist)
    }
}
