//! User entity.
//!
//! A user is also a channel: videos, tweets and playlists point back at the
//! user through their `owner` relation, and subscriptions link a subscriber
//! user to a channel user.
//!
//! # Invariants
//!
//! - `username` and `email` are stored trimmed and lowercased, and are
//!   unique across users
//! - `password` holds a bcrypt hash, never plaintext
//! - `password` and `refreshToken` are never serialized back out

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    require_text, AuthenticatedUser, Timestamp, UserId, ValidationError, VideoId,
};
use crate::domain::read_model::{Collection, StoredEntity};

/// A registered user as stored in the users collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar: String,
    #[serde(default)]
    pub cover_image: String,
    /// Watched videos, oldest first.
    #[serde(default)]
    pub watch_history: Vec<VideoId>,
    #[serde(default, skip_serializing)]
    pub password: String,
    #[serde(default, skip_serializing)]
    pub refresh_token: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StoredEntity for User {
    const COLLECTION: Collection = Collection::Users;
    const NAME: &'static str = "User";
}

impl User {
    /// The identity carried in this user's access tokens.
    pub fn to_authenticated(&self) -> AuthenticatedUser {
        AuthenticatedUser::new(self.id, self.username.clone(), self.email.clone())
    }

    /// Whether `token` is the refresh token currently on record.
    pub fn holds_refresh_token(&self, token: &str) -> bool {
        self.refresh_token.as_deref() == Some(token)
    }

    /// Watch history with `video` moved to the most recent position.
    pub fn watch_history_with(&self, video: VideoId) -> Vec<VideoId> {
        let mut history: Vec<VideoId> = self
            .watch_history
            .iter()
            .copied()
            .filter(|watched| *watched != video)
            .collect();
        history.push(video);
        history
    }
}

/// Lowercases and trims a username.
pub fn normalize_username(raw: &str) -> Result<String, ValidationError> {
    let username = require_text("username", raw)?.to_lowercase();
    if username.chars().any(char::is_whitespace) {
        return Err(ValidationError::invalid_format(
            "username",
            "must not contain whitespace",
        ));
    }
    Ok(username)
}

/// Lowercases and trims an email address and checks its basic shape.
pub fn normalize_email(raw: &str) -> Result<String, ValidationError> {
    let email = require_text("email", raw)?.to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(email)
        }
        _ => Err(ValidationError::invalid_format("email", "must be an email address")),
    }
}

/// Validated registration input, before the password is hashed and the
/// images are uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

impl Registration {
    pub fn new(
        full_name: &str,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<Self, ValidationError> {
        if password.trim().is_empty() {
            return Err(ValidationError::empty_field("password"));
        }
        Ok(Self {
            full_name: require_text("fullName", full_name)?,
            email: normalize_email(email)?,
            username: normalize_username(username)?,
            password: password.to_string(),
        })
    }

    /// The stored field set, given the hashed password and uploaded image URLs.
    pub fn into_new_user(self, password_hash: String, avatar: String, cover_image: String) -> NewUser {
        NewUser {
            username: self.username,
            email: self.email,
            full_name: self.full_name,
            avatar,
            cover_image,
            watch_history: Vec::new(),
            password: password_hash,
            refresh_token: None,
        }
    }
}

/// Fields written when a user is created.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar: String,
    pub cover_image: String,
    pub watch_history: Vec<VideoId>,
    pub password: String,
    pub refresh_token: Option<String>,
}

/// Account details a user may change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountChanges {
    pub full_name: String,
    pub email: String,
}

impl AccountChanges {
    pub fn new(full_name: &str, email: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            full_name: require_text("fullName", full_name)?,
            email: normalize_email(email)?,
        })
    }
}

/// The refresh token on record; `None` revokes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenChange {
    pub refresh_token: Option<String>,
}

/// A new password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordChange {
    pub password: String,
}

/// Replacement watch history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchHistoryChange {
    pub watch_history: Vec<VideoId>,
}

/// Which profile image an upload replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileImage {
    Avatar,
    CoverImage,
}

impl ProfileImage {
    pub fn field(&self) -> &'static str {
        match self {
            ProfileImage::Avatar => "avatar",
            ProfileImage::CoverImage => "coverImage",
        }
    }

    /// URL the user's image currently points at; empty when unset.
    pub fn current<'a>(&self, user: &'a User) -> &'a str {
        match self {
            ProfileImage::Avatar => &user.avatar,
            ProfileImage::CoverImage => &user.cover_image,
        }
    }

    /// Single-field update pointing the image at `url`.
    pub fn change(&self, url: String) -> serde_json::Map<String, serde_json::Value> {
        let mut fields = serde_json::Map::new();
        fields.insert(self.field().to_string(), serde_json::Value::String(url));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::read_model::{encode_fields, Document};
    use serde_json::Value;

    fn stored_user() -> User {
        let fields = encode_fields(
            &Registration::new("Ana Lima", "Ana@Example.com", " AnaL ", "pw")
                .unwrap()
                .into_new_user("hash".into(), "/media/a.png".into(), String::new()),
        )
        .unwrap();
        let doc = Document::new(Collection::Users, fields, Timestamp::now());
        User::from_document(&doc).unwrap()
    }

    #[test]
    fn registration_normalizes_identity_fields() {
        let reg = Registration::new(" Ana ", " Ana@Example.COM ", " AnaL ", "pw").unwrap();
        assert_eq!(reg.full_name, "Ana");
        assert_eq!(reg.email, "ana@example.com");
        assert_eq!(reg.username, "anal");
    }

    #[test]
    fn registration_rejects_blank_fields() {
        assert!(Registration::new("", "a@b.c", "ana", "pw").is_err());
        assert!(Registration::new("Ana", " ", "ana", "pw").is_err());
        assert!(Registration::new("Ana", "a@b.c", "", "pw").is_err());
        assert!(Registration::new("Ana", "a@b.c", "ana", "  ").is_err());
    }

    #[test]
    fn email_must_have_local_and_domain_parts() {
        assert!(normalize_email("ana").is_err());
        assert!(normalize_email("@example.com").is_err());
        assert!(normalize_email("ana@").is_err());
        assert!(normalize_email("a@b@c").is_err());
    }

    #[test]
    fn username_rejects_inner_whitespace() {
        assert!(normalize_username("ana lima").is_err());
    }

    #[test]
    fn stored_user_serializes_without_secrets() {
        let mut user = stored_user();
        user.refresh_token = Some("r".into());

        let json = serde_json::to_value(&user).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("password"));
        assert!(!obj.contains_key("refreshToken"));
        assert_eq!(obj.get("username"), Some(&Value::from("anal")));
        assert_eq!(user.password, "hash");
    }

    #[test]
    fn refresh_token_must_match_exactly() {
        let mut user = stored_user();
        assert!(!user.holds_refresh_token("r"));
        user.refresh_token = Some("r".into());
        assert!(user.holds_refresh_token("r"));
        assert!(!user.holds_refresh_token("r2"));
    }

    #[test]
    fn watch_history_moves_rewatched_video_to_end() {
        let mut user = stored_user();
        let (a, b) = (VideoId::new(), VideoId::new());
        user.watch_history = vec![a, b];

        assert_eq!(user.watch_history_with(a), vec![b, a]);
        assert_eq!(user.watch_history_with(b), vec![a, b]);
    }

    #[test]
    fn clearing_refresh_token_writes_null() {
        let json = serde_json::to_value(RefreshTokenChange { refresh_token: None }).unwrap();
        assert_eq!(json, serde_json::json!({"refreshToken": null}));
    }

    #[test]
    fn profile_image_change_targets_one_field() {
        let fields = ProfileImage::CoverImage.change("/media/c.png".into());
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["coverImage"], Value::from("/media/c.png"));
    }
}
