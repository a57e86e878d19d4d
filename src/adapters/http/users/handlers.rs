//! HTTP handlers for user endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::application::handlers::user::{
    ChangePasswordCommand, GetChannelProfileQuery, GetCurrentUserQuery, GetWatchHistoryQuery,
    LoginCommand, LogoutCommand, RefreshSessionCommand, RegisterUserCommand,
    UpdateAccountCommand, UpdateProfileImageCommand,
};
use crate::domain::foundation::UserId;
use crate::domain::user::ProfileImage;

use super::dto::{
    ChangePasswordRequest, LoginRequest, LoginResponse, RefreshTokenRequest, TokensResponse,
    UpdateAccountRequest,
};
use crate::adapters::http::cookies::{read_cookie, REFRESH_COOKIE};
use crate::adapters::http::envelope::{json_body, ApiError, ApiResponse};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::multipart::MultipartForm;
use crate::adapters::http::state::AppState;

/// POST /users/register
pub async fn register(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut form = MultipartForm::read(multipart).await?;
    let cmd = RegisterUserCommand {
        full_name: form.text_or_empty("fullName"),
        email: form.text_or_empty("email"),
        username: form.text_or_empty("username"),
        password: form.text_or_empty("password"),
        avatar: form.take_file("avatar"),
        cover_image: form.take_file("coverImage"),
    };
    let user = state.register_user_handler().handle(cmd).await?;
    Ok(ApiResponse::created(user, "User registered successfully"))
}

/// POST /users/login
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req = json_body(body)?;
    let cmd = LoginCommand {
        username: req.username,
        email: req.email,
        password: req.password,
    };
    let session = state.login_handler().handle(cmd).await?;

    let mut headers = HeaderMap::new();
    state.cookie_policy().set_session(&mut headers, &session.tokens);
    let body = LoginResponse {
        user: session.user,
        access_token: session.tokens.access_token,
        refresh_token: session.tokens.refresh_token,
    };
    Ok((headers, ApiResponse::ok(body, "User logged in successfully")))
}

/// POST /users/logout
pub async fn logout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    state
        .logout_handler()
        .handle(LogoutCommand { user_id: user.id })
        .await?;

    let mut headers = HeaderMap::new();
    state.cookie_policy().clear_session(&mut headers);
    Ok((headers, ApiResponse::ok(json!({}), "User logged out")))
}

/// POST /users/refresh-token
///
/// The refresh token is read from the `refreshToken` cookie, else from
/// the JSON body.
pub async fn refresh_token(
    State(state): State<AppState>,
    request_headers: HeaderMap,
    body: Option<Json<RefreshTokenRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let refresh_token = read_cookie(&request_headers, REFRESH_COOKIE)
        .or_else(|| body.and_then(|Json(req)| req.refresh_token));
    let session = state
        .refresh_session_handler()
        .handle(RefreshSessionCommand { refresh_token })
        .await?;

    let mut headers = HeaderMap::new();
    state.cookie_policy().set_session(&mut headers, &session.tokens);
    let body = TokensResponse {
        access_token: session.tokens.access_token,
        refresh_token: session.tokens.refresh_token,
    };
    Ok((headers, ApiResponse::ok(body, "Access token refreshed")))
}

/// POST /users/change-password
pub async fn change_password(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    body: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req = json_body(body)?;
    state
        .change_password_handler()
        .handle(ChangePasswordCommand {
            user_id: user.id,
            old_password: req.old_password,
            new_password: req.new_password,
        })
        .await?;
    Ok(ApiResponse::ok(json!({}), "Password changed successfully"))
}

/// GET /users/current-user
pub async fn current_user(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .current_user_handler()
        .handle(GetCurrentUserQuery { user_id: user.id })
        .await?;
    Ok(ApiResponse::ok(user, "Current user fetched successfully"))
}

/// PATCH /users/update-account
pub async fn update_account(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    body: Result<Json<UpdateAccountRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req = json_body(body)?;
    let user = state
        .update_account_handler()
        .handle(UpdateAccountCommand {
            user_id: user.id,
            full_name: req.full_name,
            email: req.email,
        })
        .await?;
    Ok(ApiResponse::ok(user, "Account details updated successfully"))
}

async fn update_image(
    state: AppState,
    user_id: UserId,
    image: ProfileImage,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut form = MultipartForm::read(multipart).await?;
    let user = state
        .update_profile_image_handler()
        .handle(UpdateProfileImageCommand {
            user_id,
            image,
            upload: form.take_file(image.field()),
        })
        .await?;
    let message = match image {
        ProfileImage::Avatar => "Avatar updated successfully",
        ProfileImage::CoverImage => "Cover image updated successfully",
    };
    Ok(ApiResponse::ok(user, message))
}

/// PATCH /users/avatar
pub async fn update_avatar(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    update_image(state, user.id, ProfileImage::Avatar, multipart).await
}

/// PATCH /users/cover-image
pub async fn update_cover_image(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    update_image(state, user.id, ProfileImage::CoverImage, multipart).await
}

/// GET /users/c/:username
pub async fn channel_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state
        .channel_profile_handler()
        .handle(GetChannelProfileQuery {
            username,
            caller: user.id,
        })
        .await?;
    Ok(ApiResponse::ok(profile, "User channel fetched successfully"))
}

/// GET /users/history
pub async fn watch_history(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let history = state
        .watch_history_handler()
        .handle(GetWatchHistoryQuery { user_id: user.id })
        .await?;
    Ok(ApiResponse::ok(history, "Watch history fetched successfully"))
}
