//! Domain service turning onboarding submissions into events.
//!
//! Onboarding asks for more than the profile editor does: country, age and
//! gender are mandatory here. The service emits an accepted or rejected
//! event so shells only translate events into UI, and sends accepted
//! submissions through `updateUserProfile`.

use std::sync::Arc;

use catalogue::Catalogue;
use tracing::info;

use crate::domain::ports::UserProfileCommand;
use crate::domain::profile_service::map_command_error;
use crate::domain::{
    DomainError, FieldError, ProfileDraft, ProfileField, ProfileUpdate, UserId, validate_draft,
};

/// Emitted when a submission passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingAccepted {
    pub user_id: UserId,
    /// Every field collected, ready to send.
    pub update: ProfileUpdate,
}

/// Emitted when one or more fields were refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingRejected {
    pub user_id: UserId,
    /// Offending fields, ordered as they appear in the form.
    pub errors: Vec<FieldError>,
}

impl OnboardingRejected {
    /// Codes per field, for shells that highlight inputs.
    pub fn codes(&self) -> Vec<(&'static str, &'static str)> {
        self.errors
            .iter()
            .map(|error| (error.field.as_str(), error.code))
            .collect()
    }
}

/// Outcome of an onboarding submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnboardingEvent {
    Accepted(OnboardingAccepted),
    Rejected(OnboardingRejected),
}

/// Onboarding service over the [`UserProfileCommand`] port.
#[derive(Clone)]
pub struct UserOnboardingService<C> {
    command: Arc<C>,
    catalogue: Arc<Catalogue>,
}

impl<C> UserOnboardingService<C> {
    /// Build the service over a profile command port and the catalogue used
    /// to check country and avatar choices.
    pub fn new(command: Arc<C>, catalogue: Arc<Catalogue>) -> Self {
        Self { command, catalogue }
    }

    /// Validate a submission and emit the matching event.
    #[must_use]
    pub fn register(&self, user_id: &UserId, draft: &ProfileDraft) -> OnboardingEvent {
        let mut errors = missing_required(draft);
        let validated = match validate_draft(draft, &self.catalogue) {
            Ok(validated) => Some(validated),
            Err(field_errors) => {
                errors.extend(field_errors);
                None
            }
        };

        match validated {
            Some(validated) if errors.is_empty() => OnboardingEvent::Accepted(OnboardingAccepted {
                user_id: user_id.clone(),
                update: ProfileUpdate::from_validated(validated),
            }),
            _ => {
                errors.sort_by_key(|error| error.field);
                OnboardingEvent::Rejected(OnboardingRejected {
                    user_id: user_id.clone(),
                    errors,
                })
            }
        }
    }
}

impl<C> UserOnboardingService<C>
where
    C: UserProfileCommand,
{
    /// Register the submission and, when accepted, persist it.
    ///
    /// Rejections are returned as events, not errors.
    ///
    /// # Errors
    ///
    /// Mapped port failures from `updateUserProfile`.
    pub async fn complete(&self, user_id: &UserId, draft: &ProfileDraft) -> Result<OnboardingEvent, DomainError> {
        let event = self.register(user_id, draft);
        if let OnboardingEvent::Accepted(accepted) = &event {
            self.command
                .update_user_profile(&accepted.user_id, &accepted.update)
                .await
                .map_err(map_command_error)?;
            info!(user_id = %accepted.user_id, "onboarding profile saved");
        }
        Ok(event)
    }
}

fn missing_required(draft: &ProfileDraft) -> Vec<FieldError> {
    [
        (ProfileField::Country, &draft.country),
        (ProfileField::Age, &draft.age),
        (ProfileField::Gender, &draft.gender),
    ]
    .into_iter()
    .filter(|(_, raw)| raw.trim().is_empty())
    .map(|(field, _)| FieldError::new(field, "required"))
    .collect()
}
