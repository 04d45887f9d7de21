//! Profile fields, form drafts, and partial update payloads.
//!
//! Forms hand over raw strings in a [`ProfileDraft`]. [`validate_draft`]
//! turns them into typed fields, collecting every field error at once so the
//! form can flag all of them in a single pass. The resulting
//! [`ValidatedProfile`] is diffed against the current [`UserProfile`] to
//! build the [`ProfileUpdate`] sent to the backend.

use std::fmt;

use catalogue::{Catalogue, CountryCode};
use serde::{Deserialize, Serialize};

use crate::domain::avatar::AvatarChoice;
use crate::domain::user::{DisplayName, UserId};
use crate::domain::wallet::Wallet;

/// Maximum bio length in characters.
pub const BIO_MAX: usize = 150;
/// Youngest age accepted.
pub const AGE_MIN: u8 = 13;
/// Oldest age accepted.
pub const AGE_MAX: u8 = 100;

/// Profile form fields, used to key validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileField {
    /// Name shown in rooms.
    DisplayName,
    /// Free-form biography.
    Bio,
    /// Country picked from the catalogue.
    Country,
    /// Age in years.
    Age,
    /// Gender choice.
    Gender,
    /// Preset or uploaded avatar.
    Avatar,
}

impl ProfileField {
    /// Field name as used in payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DisplayName => "displayName",
            Self::Bio => "bio",
            Self::Country => "country",
            Self::Age => "age",
            Self::Gender => "gender",
            Self::Avatar => "avatar",
        }
    }
}

/// A single rejected form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: ProfileField,
    pub code: &'static str,
}

impl FieldError {
    pub(crate) const fn new(field: ProfileField, code: &'static str) -> Self {
        Self { field, code }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.as_str(), self.code)
    }
}

/// Free-form biography text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Bio(String);

impl Bio {
    /// Trim and validate a bio. Empty bios are allowed.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, FieldError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.chars().count() > BIO_MAX {
            return Err(FieldError::new(ProfileField::Bio, "too_long"));
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Bio {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Bio> for String {
    fn from(value: Bio) -> Self {
        value.0
    }
}

impl TryFrom<String> for Bio {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Age in whole years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Age(u8);

impl Age {
    /// Validate an age within [`AGE_MIN`]..=[`AGE_MAX`].
    pub fn new(years: u8) -> Result<Self, FieldError> {
        if years < AGE_MIN {
            return Err(FieldError::new(ProfileField::Age, "too_young"));
        }
        if years > AGE_MAX {
            return Err(FieldError::new(ProfileField::Age, "too_old"));
        }
        Ok(Self(years))
    }

    /// Parse an age typed into a form.
    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        let trimmed = raw.trim();
        if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
            // Digit strings too long for u8 are certainly too old.
            return trimmed
                .parse::<u8>()
                .map_or_else(|_| Err(FieldError::new(ProfileField::Age, "too_old")), Self::new);
        }
        Err(FieldError::new(ProfileField::Age, "not_a_number"))
    }

    /// Age in years.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl From<Age> for u8 {
    fn from(value: Age) -> Self {
        value.0
    }
}

impl TryFrom<u8> for Age {
    type Error = FieldError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Gender as collected during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Parse the form value.
    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            _ => Err(FieldError::new(ProfileField::Gender, "invalid_choice")),
        }
    }
}

/// A user's profile as returned by the backend, wallet included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub display_name: DisplayName,
    #[serde(default)]
    pub bio: Bio,
    #[serde(default)]
    pub country: Option<CountryCode>,
    #[serde(default)]
    pub age: Option<Age>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub avatar: Option<AvatarChoice>,
    #[serde(default)]
    pub vip_level: u8,
    pub wallet: Wallet,
}

/// Raw values from the profile or onboarding form.
///
/// Blank optional strings mean "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub display_name: String,
    pub bio: String,
    pub country: String,
    pub age: String,
    pub gender: String,
    pub avatar: Option<AvatarChoice>,
}

/// Typed form values after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedProfile {
    pub display_name: DisplayName,
    pub bio: Bio,
    pub country: Option<CountryCode>,
    pub age: Option<Age>,
    pub gender: Option<Gender>,
    pub avatar: Option<AvatarChoice>,
}

/// Validate a draft against the injected catalogue.
///
/// Every field is checked; all failures are returned together, ordered by
/// field.
pub fn validate_draft(
    draft: &ProfileDraft,
    catalogue: &Catalogue,
) -> Result<ValidatedProfile, Vec<FieldError>> {
    let mut errors = Vec::new();

    let display_name = DisplayName::new(draft.display_name.as_str())
        .map_err(|err| errors.push(FieldError::new(ProfileField::DisplayName, err.code())))
        .ok();
    let bio = Bio::new(&draft.bio).map_err(|err| errors.push(err)).ok();
    let country = optional(&draft.country, |raw| validate_country(raw, catalogue), &mut errors);
    let age = optional(&draft.age, Age::parse, &mut errors);
    let gender = optional(&draft.gender, Gender::parse, &mut errors);
    if let Some(AvatarChoice::Preset { id }) = &draft.avatar {
        if catalogue.find_avatar(id).is_none() {
            errors.push(FieldError::new(ProfileField::Avatar, "unknown_preset"));
        }
    }

    match (display_name, bio) {
        (Some(display_name), Some(bio)) if errors.is_empty() => Ok(ValidatedProfile {
            display_name,
            bio,
            country: country.flatten(),
            age: age.flatten(),
            gender: gender.flatten(),
            avatar: draft.avatar.clone(),
        }),
        _ => {
            errors.sort_by_key(|error| error.field);
            Err(errors)
        }
    }
}

/// Blank input yields `Some(None)`; invalid input records an error and
/// yields `None`.
fn optional<T>(
    raw: &str,
    parse: impl FnOnce(&str) -> Result<T, FieldError>,
    errors: &mut Vec<FieldError>,
) -> Option<Option<T>> {
    if raw.trim().is_empty() {
        return Some(None);
    }
    match parse(raw) {
        Ok(value) => Some(Some(value)),
        Err(err) => {
            errors.push(err);
            None
        }
    }
}

fn validate_country(raw: &str, catalogue: &Catalogue) -> Result<CountryCode, FieldError> {
    let code = CountryCode::parse(raw)
        .ok_or_else(|| FieldError::new(ProfileField::Country, "invalid_code"))?;
    if catalogue.find_country(&code).is_none() {
        return Err(FieldError::new(ProfileField::Country, "unknown_country"));
    }
    Ok(code)
}

/// Partial profile fields for `updateUserProfile`.
///
/// Only fields that changed are present on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<DisplayName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<Bio>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<CountryCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<Age>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<AvatarChoice>,
}

impl ProfileUpdate {
    /// Whether no field would be sent.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Every provided field of `profile`, as onboarding submits them.
    pub fn from_validated(profile: ValidatedProfile) -> Self {
        Self {
            display_name: Some(profile.display_name),
            bio: Some(profile.bio).filter(|bio| !bio.as_ref().is_empty()),
            country: profile.country,
            age: profile.age,
            gender: profile.gender,
            avatar: profile.avatar,
        }
    }

    /// Fields of `edited` that differ from `current`.
    ///
    /// A blank optional field in the form leaves the stored value untouched.
    pub fn diff(current: &UserProfile, edited: ValidatedProfile) -> Self {
        fn changed<T: PartialEq>(current: Option<&T>, edited: Option<T>) -> Option<T> {
            edited.filter(|value| current != Some(value))
        }

        Self {
            display_name: changed(Some(&current.display_name), Some(edited.display_name)),
            bio: changed(Some(&current.bio), Some(edited.bio)),
            country: changed(current.country.as_ref(), edited.country),
            age: changed(current.age.as_ref(), edited.age),
            gender: changed(current.gender.as_ref(), edited.gender),
            avatar: changed(current.avatar.as_ref(), edited.avatar),
        }
    }
}
