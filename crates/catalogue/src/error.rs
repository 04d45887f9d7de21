//! Error types for the catalogue crate.
//!
//! Loading and validating a catalogue document is the only fallible
//! operation; lookups return `Option` because a missing entry is an ordinary
//! outcome for callers.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating a catalogue document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogueError {
    /// The catalogue file could not be read.
    #[error("failed to read catalogue file at '{path}': {message}")]
    IoError {
        /// Path to the catalogue file.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The catalogue JSON is malformed or missing required fields.
    #[error("invalid catalogue JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The catalogue version is not supported.
    #[error("unsupported catalogue version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the document.
        actual: u32,
    },

    /// The catalogue lists no countries.
    #[error("catalogue contains no countries")]
    EmptyCountries,

    /// A country code is not an uppercase ISO 3166-1 alpha-2 code.
    #[error("invalid country code at index {index}: {value}")]
    InvalidCountryCode {
        /// Index of the offending entry.
        index: usize,
        /// The rejected code.
        value: String,
    },

    /// A localized name is blank in at least one language.
    #[error("{section} entry '{id}' has a blank name")]
    BlankName {
        /// Catalogue section holding the entry.
        section: &'static str,
        /// Identifier of the entry.
        id: String,
    },

    /// Two entries in the same section share an identifier.
    #[error("duplicate {section} identifier '{id}'")]
    DuplicateId {
        /// Catalogue section holding the entries.
        section: &'static str,
        /// The repeated identifier.
        id: String,
    },

    /// A gift is priced at zero.
    #[error("gift '{id}' must have a positive price")]
    ZeroGiftPrice {
        /// Identifier of the gift.
        id: String,
    },

    /// VIP tiers are not strictly ascending by level and threshold.
    #[error("VIP tier {level} must rank above the previous tier")]
    VipTierOutOfOrder {
        /// Level of the offending tier.
        level: u8,
    },

    /// An avatar preset has an empty image reference.
    #[error("avatar preset '{id}' has an empty image URL")]
    EmptyAvatarUrl {
        /// Identifier of the preset.
        id: String,
    },
}
