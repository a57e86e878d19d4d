//! Router for user endpoints.

use axum::{
    routing::{get, patch, post},
    Router,
};

use super::handlers::{
    change_password, channel_profile, current_user, login, logout, refresh_token, register,
    update_account, update_avatar, update_cover_image, watch_history,
};
use crate::adapters::http::state::AppState;

/// # Routes
///
/// ## Public
/// - `POST /register` - multipart form with avatar and optional cover image
/// - `POST /login`
/// - `POST /refresh-token`
///
/// ## Authenticated
/// - `POST /logout`
/// - `POST /change-password`
/// - `GET /current-user`
/// - `PATCH /update-account`
/// - `PATCH /avatar`, `PATCH /cover-image`
/// - `GET /c/:username` - channel profile
/// - `GET /history` - watch history
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh-token", post(refresh_token))
        .route("/logout", post(logout))
        .route("/change-password", post(change_password))
        .route("/current-user", get(current_user))
        .route("/update-account", patch(update_account))
        .route("/avatar", patch(update_avatar))
        .route("/cover-image", patch(update_cover_image))
        .route("/c/:username", get(channel_profile))
        .route("/history", get(watch_history))
}
