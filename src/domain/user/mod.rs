//! User domain module.
//!
//! Registered users double as channels. Holds the stored entity, the
//! normalization rules for identity fields, and the user-centred read
//! models (channel profile, watch history, embedded owner summaries).

mod aggregate;
mod views;

pub use aggregate::{
    normalize_email, normalize_username, AccountChanges, NewUser, PasswordChange, ProfileImage,
    RefreshTokenChange, Registration, User, WatchHistoryChange,
};
pub use views::{
    channel_profile, owner_join, user_join, watch_history, ChannelProfile, UserSummary,
    WatchHistory,
};
