//! User handlers.
//!
//! ## Commands
//! - Registration, login, logout and refresh-token rotation
//! - Password, account detail and profile image changes
//!
//! ## Queries
//! - Current user, channel profile and watch history

mod account;
mod queries;
mod register_user;
mod session;

pub use account::{
    ChangePasswordCommand, ChangePasswordHandler, UpdateAccountCommand, UpdateAccountHandler,
    UpdateProfileImageCommand, UpdateProfileImageHandler,
};
pub use queries::{
    GetChannelProfileHandler, GetChannelProfileQuery, GetCurrentUserHandler, GetCurrentUserQuery,
    GetWatchHistoryHandler, GetWatchHistoryQuery,
};
pub use register_user::{RegisterUserCommand, RegisterUserHandler};
pub use session::{
    LoginCommand, LoginHandler, LogoutCommand, LogoutHandler, RefreshSessionCommand,
    RefreshSessionHandler, SessionResult,
};
