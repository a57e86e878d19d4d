//! Playlist domain module.

mod aggregate;
mod views;

pub use aggregate::{NewPlaylist, Playlist, PlaylistChanges, PlaylistVideos};
pub use views::{playlist_detail, user_playlists, PlaylistDetail, PlaylistSummary};
