//! Bilingual display names.

use serde::{Deserialize, Serialize};

/// Languages the client renders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Arabic, the default interface language.
    #[default]
    Ar,
    /// English.
    En,
}

/// A name carried in both supported languages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    ar: String,
    en: String,
}

impl LocalizedText {
    /// Build a localized text from its Arabic and English forms.
    #[must_use]
    pub fn new(ar: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            ar: ar.into(),
            en: en.into(),
        }
    }

    /// Return the text for `locale`.
    #[must_use]
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::Ar => self.ar.as_str(),
            Locale::En => self.en.as_str(),
        }
    }

    /// Whether either language form is blank.
    pub(crate) fn is_blank(&self) -> bool {
        self.ar.trim().is_empty() || self.en.trim().is_empty()
    }

    /// Case-insensitive substring match against both language forms.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn contains_lowercase(&self, needle: &str) -> bool {
        self.ar.to_lowercase().contains(needle) || self.en.to_lowercase().contains(needle)
    }
}
