//! Driven port for loading a user's profile and wallet.
//!
//! The wallet inside the returned profile is the authoritative snapshot the
//! exchange flow refreshes from after a confirmed exchange.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{DisplayName, UserId, UserProfile, Wallet};

define_port_error! {
    /// Errors raised by profile query adapters.
    pub enum UserProfileQueryError {
        Timeout => "profile fetch timed out",
        NotFound => "profile not found",
        Rejected { status: u16, message: String } => "profile fetch rejected with status {status}: {message}",
        Transport { message: String } => "profile fetch transport failed: {message}",
        Decode { message: String } => "profile response could not be decoded: {message}",
    }
}

/// Port reading the current profile from the backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Return the profile, wallet included, for `user_id`.
    async fn fetch_profile(&self, user_id: &UserId) -> Result<UserProfile, UserProfileQueryError>;
}

/// Fixture profile query returning a fixed wallet for any user.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserProfileQuery {
    wallet: Wallet,
}

impl FixtureUserProfileQuery {
    /// Serve profiles holding `wallet`.
    pub const fn with_wallet(wallet: Wallet) -> Self {
        Self { wallet }
    }
}

#[async_trait]
impl UserProfileQuery for FixtureUserProfileQuery {
    async fn fetch_profile(&self, user_id: &UserId) -> Result<UserProfile, UserProfileQueryError> {
        let display_name = DisplayName::new("Layla")
            .map_err(|err| UserProfileQueryError::decode(format!("fixture display name: {err}")))?;
        Ok(UserProfile {
            id: user_id.clone(),
            display_name,
            bio: Default::default(),
            country: None,
            age: None,
            gender: None,
            avatar: None,
            vip_level: 0,
            wallet: self.wallet,
        })
    }
}
