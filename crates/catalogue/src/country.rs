//! Country entries for the profile and onboarding pickers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::localized::LocalizedText;

/// Uppercase ISO 3166-1 alpha-2 country code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// Validate and construct a country code.
    ///
    /// Lowercase input is normalised to uppercase; anything other than two
    /// ASCII letters after trimming is rejected.
    ///
    /// # Examples
    /// ```
    /// use catalogue::CountryCode;
    ///
    /// let code = CountryCode::parse(" eg ").expect("valid code");
    /// assert_eq!(code.as_ref(), "EG");
    /// assert!(CountryCode::parse("EGY").is_none());
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let is_alpha2 = trimmed.len() == 2 && trimmed.chars().all(|c| c.is_ascii_alphabetic());
        is_alpha2.then(|| Self(trimmed.to_ascii_uppercase()))
    }
}

impl AsRef<str> for CountryCode {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<CountryCode> for String {
    fn from(value: CountryCode) -> Self {
        value.0
    }
}

impl TryFrom<String> for CountryCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid country code: {value}"))
    }
}

/// A selectable country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    code: CountryCode,
    name: LocalizedText,
    flag: Option<String>,
}

impl Country {
    pub(crate) const fn new(code: CountryCode, name: LocalizedText, flag: Option<String>) -> Self {
        Self { code, name, flag }
    }

    /// ISO alpha-2 code sent to the backend.
    #[must_use]
    pub const fn code(&self) -> &CountryCode {
        &self.code
    }

    /// Bilingual display name.
    #[must_use]
    pub const fn name(&self) -> &LocalizedText {
        &self.name
    }

    /// Flag glyph shown next to the name, when the catalogue supplies one.
    #[must_use]
    pub fn flag(&self) -> Option<&str> {
        self.flag.as_deref()
    }

    /// Whether the lowercased `needle` occurs in the code or either name.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.code.as_ref().to_ascii_lowercase().contains(needle)
            || self.name.contains_lowercase(needle)
    }
}
