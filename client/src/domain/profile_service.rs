//! Profile editing use case.
//!
//! Validates the edit form against the injected catalogue, keeps only the
//! fields that changed, and forwards them through `updateUserProfile`.

use std::sync::Arc;

use catalogue::Catalogue;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{UserProfileCommand, UserProfileCommandError};
use crate::domain::{DomainError, FieldError, ProfileDraft, ProfileUpdate, UserProfile, validate_draft};

/// Build the error returned for a form with invalid fields.
pub(crate) fn invalid_fields_error(errors: &[FieldError]) -> DomainError {
    DomainError::invalid_request("profile form has invalid fields").with_details(json!({
        "code": "invalid_fields",
        "fields": errors,
    }))
}

/// Translate a profile command failure into a domain error.
pub(crate) fn map_command_error(error: UserProfileCommandError) -> DomainError {
    match error {
        UserProfileCommandError::Timeout => DomainError::timeout("profile update timed out"),
        UserProfileCommandError::Rejected { status, message } => match status {
            401 | 403 => DomainError::unauthorized(format!("profile update refused: {message}")),
            404 => DomainError::not_found("user profile not found"),
            400..=499 => DomainError::invalid_request(format!("profile update rejected: {message}")),
            _ => DomainError::service_unavailable(format!(
                "profile service failed with status {status}: {message}"
            )),
        },
        UserProfileCommandError::Transport { message } => {
            DomainError::service_unavailable(format!("profile service unreachable: {message}"))
        }
    }
}

/// Profile edit service over the [`UserProfileCommand`] port.
#[derive(Clone)]
pub struct ProfileEditService<C> {
    command: Arc<C>,
    catalogue: Arc<Catalogue>,
}

impl<C> ProfileEditService<C> {
    /// Create a service using `catalogue` for country and avatar lookups.
    pub fn new(command: Arc<C>, catalogue: Arc<Catalogue>) -> Self {
        Self { command, catalogue }
    }
}

impl<C> ProfileEditService<C>
where
    C: UserProfileCommand,
{
    /// Validate `draft`, diff it against `current`, and send the changes.
    ///
    /// Returns the update that was sent.
    ///
    /// # Errors
    ///
    /// - [`crate::domain::ErrorCode::InvalidRequest`] with per-field codes in
    ///   the details when the form is invalid.
    /// - [`crate::domain::ErrorCode::InvalidRequest`] with code
    ///   `empty_update` when nothing changed.
    /// - Mapped port failures otherwise.
    pub async fn save(&self, current: &UserProfile, draft: &ProfileDraft) -> Result<ProfileUpdate, DomainError> {
        let validated =
            validate_draft(draft, &self.catalogue).map_err(|errors| invalid_fields_error(&errors))?;
        let update = ProfileUpdate::diff(current, validated);
        if update.is_empty() {
            return Err(DomainError::invalid_request("no profile changes to save")
                .with_details(json!({ "code": "empty_update" })));
        }

        self.command
            .update_user_profile(&current.id, &update)
            .await
            .map_err(map_command_error)?;
        info!(user_id = %current.id, "profile update saved");
        Ok(update)
    }
}
