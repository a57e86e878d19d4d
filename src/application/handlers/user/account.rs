//! Account handlers: password change, account details and profile images.

use std::sync::Arc;

use tracing::info;

use crate::application::handlers::support::{discard_media, load, update};
use crate::domain::foundation::{DomainError, UserId, ValidationError};
use crate::domain::read_model::{Collection, Filter, StoredEntity};
use crate::domain::user::{AccountChanges, PasswordChange, ProfileImage, User};
use crate::ports::{DocumentStore, MediaStorage, MediaUpload, PasswordHasher};

/// Command to change the caller's password.
#[derive(Debug, Clone)]
pub struct ChangePasswordCommand {
    pub user_id: UserId,
    pub old_password: String,
    pub new_password: String,
}

/// Handler for password changes.
pub struct ChangePasswordHandler {
    store: Arc<dyn DocumentStore>,
    hasher: Arc<dyn PasswordHasher>,
}

impl ChangePasswordHandler {
    pub fn new(store: Arc<dyn DocumentStore>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { store, hasher }
    }

    pub async fn handle(&self, cmd: ChangePasswordCommand) -> Result<(), DomainError> {
        if cmd.new_password.trim().is_empty() {
            return Err(ValidationError::empty_field("newPassword").into());
        }
        let user: User = load(self.store.as_ref(), cmd.user_id).await?;
        if !self.hasher.verify(&cmd.old_password, &user.password).await? {
            return Err(DomainError::validation("oldPassword", "Invalid old password"));
        }

        let password = self.hasher.hash(&cmd.new_password).await?;
        let _: User = update(self.store.as_ref(), user.id, &PasswordChange { password }).await?;

        info!(user_id = %user.id, "Password changed");
        Ok(())
    }
}

/// Command to update the caller's name and email.
#[derive(Debug, Clone)]
pub struct UpdateAccountCommand {
    pub user_id: UserId,
    pub full_name: String,
    pub email: String,
}

/// Handler for account detail updates.
pub struct UpdateAccountHandler {
    store: Arc<dyn DocumentStore>,
}

impl UpdateAccountHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: UpdateAccountCommand) -> Result<User, DomainError> {
        let changes = AccountChanges::new(&cmd.full_name, &cmd.email)?;

        let filter = Filter::all().eq("email", changes.email.as_str());
        if let Some(existing) = self.store.find_one(Collection::Users, &filter).await? {
            if User::from_document(&existing)?.id != cmd.user_id {
                return Err(DomainError::conflict("Email is already in use")
                    .with_detail("field", "email"));
            }
        }

        let user: User = update(self.store.as_ref(), cmd.user_id, &changes).await?;
        info!(user_id = %user.id, "Account details updated");
        Ok(user)
    }
}

/// Command to replace the caller's avatar or cover image.
#[derive(Debug, Clone)]
pub struct UpdateProfileImageCommand {
    pub user_id: UserId,
    pub image: ProfileImage,
    pub upload: Option<MediaUpload>,
}

/// Handler for avatar and cover image uploads.
pub struct UpdateProfileImageHandler {
    store: Arc<dyn DocumentStore>,
    media: Arc<dyn MediaStorage>,
}

impl UpdateProfileImageHandler {
    pub fn new(store: Arc<dyn DocumentStore>, media: Arc<dyn MediaStorage>) -> Self {
        Self { store, media }
    }

    pub async fn handle(&self, cmd: UpdateProfileImageCommand) -> Result<User, DomainError> {
        let upload = cmd.upload.ok_or_else(|| {
            ValidationError::invalid_format(cmd.image.field(), "file is missing")
        })?;
        // The caller must still exist before anything is uploaded.
        let previous: User = load(self.store.as_ref(), cmd.user_id).await?;

        let url = self.media.store(upload).await?;
        let user: User = update(self.store.as_ref(), cmd.user_id, &cmd.image.change(url)).await?;
        discard_media(self.media.as_ref(), cmd.image.current(&previous)).await;

        info!(user_id = %user.id, field = cmd.image.field(), "Profile image updated");
        Ok(user)
    }
}
