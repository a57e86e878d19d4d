//! Playlist handlers.

mod commands;
mod queries;

pub use commands::{
    CreatePlaylistCommand, CreatePlaylistHandler, DeletePlaylistCommand, DeletePlaylistHandler,
    EditPlaylistVideosCommand, EditPlaylistVideosHandler, PlaylistEdit, UpdatePlaylistCommand,
    UpdatePlaylistHandler,
};
pub use queries::{
    GetPlaylistHandler, GetPlaylistQuery, ListUserPlaylistsHandler, ListUserPlaylistsQuery,
};
