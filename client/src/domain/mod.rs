//! Domain entities, services and ports.
//!
//! Everything here is transport agnostic. The outbound adapter implements
//! the ports; shells drive the services and render what they return.

pub mod avatar;
pub mod error;
pub mod exchange;
pub mod ports;
pub mod profile;
pub mod profile_service;
pub mod user;
pub mod user_onboarding;
pub mod wallet;

#[cfg(test)]
pub(crate) mod test_support;

pub use self::avatar::{AvatarChoice, AvatarError, AvatarImage, MAX_AVATAR_BYTES};
pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode};
pub use self::exchange::{
    DialogState, ExchangeController, ExchangeDialog, ExchangeError, ExchangeReceipt, Notice,
    Settlement, Submission, SubmissionTicket, WalletExchangeService,
};
pub use self::profile::{
    AGE_MAX, AGE_MIN, Age, BIO_MAX, Bio, FieldError, Gender, ProfileDraft, ProfileField,
    ProfileUpdate, UserProfile, ValidatedProfile, validate_draft,
};
pub use self::profile_service::ProfileEditService;
pub use self::user::{DISPLAY_NAME_MAX, DISPLAY_NAME_MIN, DisplayName, UserId, UserValidationError};
pub use self::user_onboarding::{
    OnboardingAccepted, OnboardingEvent, OnboardingRejected, UserOnboardingService,
};
pub use self::wallet::{AmountRejection, CoinAmount, Wallet};
