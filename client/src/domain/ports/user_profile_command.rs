//! Driven port for `updateUserProfile`.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{ProfileUpdate, UserId};

define_port_error! {
    /// Errors raised by profile command adapters.
    pub enum UserProfileCommandError {
        Timeout => "profile update timed out",
        Rejected { status: u16, message: String } => "profile update rejected with status {status}: {message}",
        Transport { message: String } => "profile update transport failed: {message}",
    }
}

/// Port persisting partial profile edits on the backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileCommand: Send + Sync {
    /// Send the changed fields of a user's profile.
    async fn update_user_profile(
        &self,
        user_id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<(), UserProfileCommandError>;
}

/// Command that accepts every update and stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserProfileCommand;

#[async_trait]
impl UserProfileCommand for FixtureUserProfileCommand {
    async fn update_user_profile(
        &self,
        _user_id: &UserId,
        _update: &ProfileUpdate,
    ) -> Result<(), UserProfileCommandError> {
        Ok(())
    }
}
