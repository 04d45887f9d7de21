//! Immutable catalogues injected into the live rooms client.
//!
//! Countries, gifts, VIP tiers, and avatar presets are static lookup data.
//! They are loaded once from a versioned JSON document and then passed by
//! reference into the profile and onboarding flows, so those flows can be
//! exercised against fixture catalogues.
//!
//! # Example
//!
//! ```
//! use catalogue::{Catalogue, Locale};
//!
//! let json = r#"{
//!     "version": 1,
//!     "countries": [
//!         {"code": "EG", "name": {"ar": "مصر", "en": "Egypt"}},
//!         {"code": "SA", "name": {"ar": "السعودية", "en": "Saudi Arabia"}}
//!     ]
//! }"#;
//!
//! let catalogue = Catalogue::from_json(json).expect("valid catalogue");
//! let matches = catalogue.search_countries("egy");
//!
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches.first().map(|c| c.name().get(Locale::En)), Some("Egypt"));
//! ```

mod country;
mod error;
mod items;
mod localized;
mod registry;

pub use country::{Country, CountryCode};
pub use error::CatalogueError;
pub use items::{AvatarPreset, Gift, VipTier};
pub use localized::{Locale, LocalizedText};
pub use registry::Catalogue;
