//! Ownership trait for user-owned documents.
//!
//! Comments, tweets, videos and playlists all carry an `owner` relation.
//! Mutating handlers load the entity, call [`OwnedByUser::check_ownership`]
//! with the caller's id and only then write. The check and the write are two
//! store calls; concurrent writers are last-write-wins.

use super::{DomainError, UserId};

/// Trait for entities that have a single owner.
pub trait OwnedByUser {
    /// Returns the ID of the user who owns this entity.
    fn owner_id(&self) -> &UserId;

    /// Checks if the given user is the owner.
    fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner_id() == user_id
    }

    /// Validates ownership, returning a `Forbidden` error if the caller is not the owner.
    fn check_ownership(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(DomainError::forbidden("You are not allowed to modify this resource")
                .with_detail("owner_id", self.owner_id().to_string())
                .with_detail("requested_by", user_id.to_string()))
        }
    }
}
