//! Client configuration loaded via OrthoConfig.
//!
//! Values come from `ROOMS_*` environment variables and configuration files.
//! Command-line overrides are applied by the binary on top of these.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::{UserId, UserValidationError};

fn default_catalogue_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("crates")
        .join("catalogue")
        .join("fixtures")
        .join("catalogue.json")
}

/// Problems turning loaded settings into usable values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("the rooms API base URL is not configured (set ROOMS_API_BASE_URL)")]
    MissingBaseUrl,
    #[error("invalid rooms API base URL {value:?}: {message}")]
    InvalidBaseUrl { value: String, message: String },
    #[error("no user is configured (set ROOMS_USER_ID)")]
    MissingUserId,
    #[error("invalid user id: {0}")]
    InvalidUserId(UserValidationError),
}

/// Settings for talking to the rooms backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ROOMS")]
pub struct ClientSettings {
    /// Base URL of the rooms REST API.
    pub api_base_url: Option<String>,
    /// User whose wallet and profile are managed.
    pub user_id: Option<String>,
    /// Bounded wait for an exchange confirmation, in milliseconds.
    #[ortho_config(default = 15_000)]
    pub exchange_timeout_ms: u64,
    /// Per-request HTTP timeout, in milliseconds.
    #[ortho_config(default = 10_000)]
    pub request_timeout_ms: u64,
    /// Catalogue JSON override.
    pub catalogue_path: Option<PathBuf>,
}

impl ClientSettings {
    /// Parse the configured base URL.
    ///
    /// # Errors
    ///
    /// [`SettingsError::MissingBaseUrl`] when unset or blank, and
    /// [`SettingsError::InvalidBaseUrl`] when it does not parse.
    pub fn api_base_url(&self) -> Result<Url, SettingsError> {
        let raw = self
            .api_base_url
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(SettingsError::MissingBaseUrl)?;
        Url::parse(raw).map_err(|err| SettingsError::InvalidBaseUrl {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Parse the configured user id.
    ///
    /// # Errors
    ///
    /// [`SettingsError::MissingUserId`] when unset, and
    /// [`SettingsError::InvalidUserId`] when it is not a UUID.
    pub fn user_id(&self) -> Result<UserId, SettingsError> {
        let raw = self.user_id.as_deref().ok_or(SettingsError::MissingUserId)?;
        UserId::new(raw.trim()).map_err(SettingsError::InvalidUserId)
    }

    /// Replace the API base URL and user id with command-line values, where
    /// given.
    #[must_use]
    pub fn with_overrides(mut self, api_base_url: Option<String>, user_id: Option<String>) -> Self {
        if api_base_url.is_some() {
            self.api_base_url = api_base_url;
        }
        if user_id.is_some() {
            self.user_id = user_id;
        }
        self
    }

    /// Exchange confirmation timeout, 15 seconds unless configured.
    pub fn exchange_timeout(&self) -> Duration {
        Duration::from_millis(self.exchange_timeout_ms)
    }

    /// HTTP request timeout, 10 seconds unless configured.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Catalogue location, falling back to the bundled fixture.
    pub fn catalogue_path(&self) -> PathBuf {
        self.catalogue_path
            .clone()
            .unwrap_or_else(default_catalogue_path)
    }
}
