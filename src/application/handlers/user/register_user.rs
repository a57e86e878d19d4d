//! RegisterUserHandler - Command handler for creating accounts.

use std::sync::Arc;

use tracing::info;

use crate::application::handlers::support::create;
use crate::domain::foundation::{DomainError, ValidationError};
use crate::domain::read_model::{Collection, Filter};
use crate::domain::user::{Registration, User};
use crate::ports::{DocumentStore, MediaStorage, MediaUpload, PasswordHasher};

/// Command to register a new user.
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub avatar: Option<MediaUpload>,
    pub cover_image: Option<MediaUpload>,
}

/// Handler for user registration.
pub struct RegisterUserHandler {
    store: Arc<dyn DocumentStore>,
    hasher: Arc<dyn PasswordHasher>,
    media: Arc<dyn MediaStorage>,
}

impl RegisterUserHandler {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        hasher: Arc<dyn PasswordHasher>,
        media: Arc<dyn MediaStorage>,
    ) -> Self {
        Self {
            store,
            hasher,
            media,
        }
    }

    pub async fn handle(&self, cmd: RegisterUserCommand) -> Result<User, DomainError> {
        // 1. Validate and normalize the text fields
        let registration =
            Registration::new(&cmd.full_name, &cmd.email, &cmd.username, &cmd.password)?;
        let avatar = cmd
            .avatar
            .ok_or_else(|| ValidationError::invalid_format("avatar", "Avatar file is required"))?;

        // 2. Reject a taken username or email
        for (field, value) in [
            ("username", &registration.username),
            ("email", &registration.email),
        ] {
            let filter = Filter::all().eq(field, value.as_str());
            if self.store.find_one(Collection::Users, &filter).await?.is_some() {
                return Err(DomainError::conflict("User with email or username already exists")
                    .with_detail("field", field));
            }
        }

        // 3. Upload images
        let avatar_url = self.media.store(avatar).await?;
        let cover_url = match cmd.cover_image {
            Some(upload) => self.media.store(upload).await?,
            None => String::new(),
        };

        // 4. Hash the password and persist
        let hash = self.hasher.hash(&registration.password).await?;
        let user: User = create(
            self.store.as_ref(),
            &registration.into_new_user(hash, avatar_url, cover_url),
        )
        .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::support::fakes::{store, upload, PlainHasher, RecordingMedia};
    use crate::domain::foundation::ErrorCode;

    fn command(username: &str, email: &str) -> RegisterUserCommand {
        RegisterUserCommand {
            full_name: "Ana Lima".into(),
            email: email.into(),
            username: username.into(),
            password: "secret".into(),
            avatar: Some(upload("a.png")),
            cover_image: None,
        }
    }

    fn handler(store: Arc<dyn DocumentStore>) -> RegisterUserHandler {
        RegisterUserHandler::new(store, Arc::new(PlainHasher), Arc::new(RecordingMedia::default()))
    }

    #[tokio::test]
    async fn registers_user_with_hashed_password() {
        let store = store();
        let user = handler(store.clone())
            .handle(command("AnaL", "ana@example.com"))
            .await
            .unwrap();

        assert_eq!(user.username, "anal");
        assert_eq!(user.password, "hashed:secret");
        assert!(user.avatar.starts_with("/media/"));
        assert_eq!(user.cover_image, "");
        assert!(user.watch_history.is_empty());
    }

    #[tokio::test]
    async fn duplicate_username_or_email_is_conflict() {
        let store = store();
        let handler = handler(store.clone());
        handler.handle(command("ana", "ana@example.com")).await.unwrap();

        let err = handler.handle(command("ANA", "other@example.com")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
        let err = handler.handle(command("bo", "Ana@Example.com")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn missing_avatar_is_rejected() {
        let mut cmd = command("ana", "ana@example.com");
        cmd.avatar = None;
        let err = handler(store()).handle(cmd).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn blank_field_is_rejected_before_any_upload() {
        let media = Arc::new(RecordingMedia::default());
        let handler = RegisterUserHandler::new(store(), Arc::new(PlainHasher), media.clone());
        let mut cmd = command("ana", "ana@example.com");
        cmd.full_name = "  ".into();

        let err = handler.handle(cmd).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(media.stored.lock().unwrap().is_empty());
    }
}
