//! Catalogue document parsing, validation, and lookups.
//!
//! The catalogue is loaded from a versioned JSON document. Validation runs
//! once at load time so every lookup afterwards works on trusted data.

use std::collections::BTreeSet;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs::Dir};
use serde::Deserialize;

use crate::country::{Country, CountryCode};
use crate::error::CatalogueError;
use crate::items::{AvatarPreset, Gift, VipTier};
use crate::localized::LocalizedText;

/// Current supported catalogue version.
const SUPPORTED_VERSION: u32 = 1;

/// Immutable catalogue of countries, gifts, VIP tiers, and avatar presets.
///
/// # Example
///
/// ```
/// use catalogue::Catalogue;
///
/// let json = r#"{
///     "version": 1,
///     "countries": [{"code": "JO", "name": {"ar": "الأردن", "en": "Jordan"}}],
///     "gifts": [{"id": "rose", "name": {"ar": "وردة", "en": "Rose"}, "priceDiamonds": 1}]
/// }"#;
///
/// let catalogue = Catalogue::from_json(json).expect("valid catalogue");
/// assert_eq!(catalogue.countries().len(), 1);
/// assert_eq!(catalogue.find_gift("rose").map(|g| g.price_diamonds()), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalogue {
    countries: Vec<Country>,
    gifts: Vec<Gift>,
    vip_tiers: Vec<VipTier>,
    avatars: Vec<AvatarPreset>,
}

impl Catalogue {
    /// Parses a catalogue from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError`] if the JSON is malformed, the version is
    /// unsupported, or any section fails validation.
    pub fn from_json(json: &str) -> Result<Self, CatalogueError> {
        let raw: RawCatalogue =
            serde_json::from_str(json).map_err(|e| CatalogueError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a catalogue from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Utf8Path) -> Result<Self, CatalogueError> {
        let io_error = |message: String| CatalogueError::IoError {
            path: path.to_path_buf(),
            message,
        };
        let parent = path
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let file_name = path
            .file_name()
            .ok_or_else(|| io_error("catalogue path must name a file".to_owned()))?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(|e| io_error(e.to_string()))?;
        let contents = dir
            .read_to_string(file_name)
            .map_err(|e| io_error(e.to_string()))?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawCatalogue) -> Result<Self, CatalogueError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(CatalogueError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }
        if raw.countries.is_empty() {
            return Err(CatalogueError::EmptyCountries);
        }

        let countries = parse_countries(raw.countries)?;
        let gifts = parse_gifts(raw.gifts)?;
        let vip_tiers = parse_vip_tiers(raw.vip_tiers)?;
        let avatars = parse_avatars(raw.avatars)?;

        Ok(Self {
            countries,
            gifts,
            vip_tiers,
            avatars,
        })
    }

    /// All countries in catalogue order.
    #[must_use]
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// All gifts in catalogue order.
    #[must_use]
    pub fn gifts(&self) -> &[Gift] {
        &self.gifts
    }

    /// VIP tiers in ascending level order.
    #[must_use]
    pub fn vip_tiers(&self) -> &[VipTier] {
        &self.vip_tiers
    }

    /// All avatar presets in catalogue order.
    #[must_use]
    pub fn avatars(&self) -> &[AvatarPreset] {
        &self.avatars
    }

    /// Filters countries by a case-insensitive substring of the code or of
    /// either localized name.
    ///
    /// A blank query returns every country. Catalogue order is preserved.
    #[must_use]
    pub fn search_countries(&self, query: &str) -> Vec<&Country> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.countries.iter().collect();
        }
        self.countries
            .iter()
            .filter(|country| country.matches(&needle))
            .collect()
    }

    /// Finds a country by code.
    #[must_use]
    pub fn find_country(&self, code: &CountryCode) -> Option<&Country> {
        self.countries.iter().find(|country| country.code() == code)
    }

    /// Finds a gift by identifier.
    #[must_use]
    pub fn find_gift(&self, id: &str) -> Option<&Gift> {
        self.gifts.iter().find(|gift| gift.id() == id)
    }

    /// Finds an avatar preset by identifier.
    #[must_use]
    pub fn find_avatar(&self, id: &str) -> Option<&AvatarPreset> {
        self.avatars.iter().find(|avatar| avatar.id() == id)
    }

    /// Finds a VIP tier by level.
    #[must_use]
    pub fn vip_tier(&self, level: u8) -> Option<&VipTier> {
        self.vip_tiers.iter().find(|tier| tier.level() == level)
    }

    /// Highest VIP tier whose spend threshold is met by `spent_diamonds`.
    #[must_use]
    pub fn vip_tier_for_spend(&self, spent_diamonds: u64) -> Option<&VipTier> {
        self.vip_tiers
            .iter()
            .rev()
            .find(|tier| tier.min_spent_diamonds() <= spent_diamonds)
    }
}

fn check_unique(
    seen: &mut BTreeSet<String>,
    section: &'static str,
    id: &str,
) -> Result<(), CatalogueError> {
    if seen.insert(id.to_owned()) {
        Ok(())
    } else {
        Err(CatalogueError::DuplicateId {
            section,
            id: id.to_owned(),
        })
    }
}

fn check_name(
    section: &'static str,
    id: &str,
    name: &LocalizedText,
) -> Result<(), CatalogueError> {
    if name.is_blank() {
        return Err(CatalogueError::BlankName {
            section,
            id: id.to_owned(),
        });
    }
    Ok(())
}

fn parse_countries(raw: Vec<RawCountry>) -> Result<Vec<Country>, CatalogueError> {
    let mut seen = BTreeSet::new();
    raw.into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let code = CountryCode::parse(&entry.code)
                .filter(|_| entry.code.trim() == entry.code.trim().to_ascii_uppercase())
                .ok_or_else(|| CatalogueError::InvalidCountryCode {
                    index,
                    value: entry.code.clone(),
                })?;
            check_unique(&mut seen, "country", code.as_ref())?;
            check_name("country", code.as_ref(), &entry.name)?;
            Ok(Country::new(code, entry.name, entry.flag))
        })
        .collect()
}

fn parse_gifts(raw: Vec<RawGift>) -> Result<Vec<Gift>, CatalogueError> {
    let mut seen = BTreeSet::new();
    raw.into_iter()
        .map(|entry| {
            check_unique(&mut seen, "gift", &entry.id)?;
            check_name("gift", &entry.id, &entry.name)?;
            if entry.price_diamonds == 0 {
                return Err(CatalogueError::ZeroGiftPrice { id: entry.id });
            }
            Ok(Gift::new(entry.id, entry.name, entry.price_diamonds))
        })
        .collect()
}

fn parse_vip_tiers(raw: Vec<RawVipTier>) -> Result<Vec<VipTier>, CatalogueError> {
    let mut previous: Option<(u8, u64)> = None;
    raw.into_iter()
        .map(|entry| {
            check_name("VIP tier", &entry.level.to_string(), &entry.name)?;
            if let Some((level, threshold)) = previous {
                if entry.level <= level || entry.min_spent_diamonds <= threshold {
                    return Err(CatalogueError::VipTierOutOfOrder { level: entry.level });
                }
            }
            previous = Some((entry.level, entry.min_spent_diamonds));
            Ok(VipTier::new(
                entry.level,
                entry.name,
                entry.min_spent_diamonds,
            ))
        })
        .collect()
}

fn parse_avatars(raw: Vec<RawAvatar>) -> Result<Vec<AvatarPreset>, CatalogueError> {
    let mut seen = BTreeSet::new();
    raw.into_iter()
        .map(|entry| {
            check_unique(&mut seen, "avatar", &entry.id)?;
            if entry.url.trim().is_empty() {
                return Err(CatalogueError::EmptyAvatarUrl { id: entry.id });
            }
            Ok(AvatarPreset::new(entry.id, entry.url))
        })
        .collect()
}

/// Raw JSON representation for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCatalogue {
    version: u32,
    countries: Vec<RawCountry>,
    #[serde(default)]
    gifts: Vec<RawGift>,
    #[serde(default)]
    vip_tiers: Vec<RawVipTier>,
    #[serde(default)]
    avatars: Vec<RawAvatar>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCountry {
    code: String,
    name: LocalizedText,
    #[serde(default)]
    flag: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGift {
    id: String,
    name: LocalizedText,
    price_diamonds: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawVipTier {
    level: u8,
    name: LocalizedText,
    min_spent_diamonds: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAvatar {
    id: String,
    url: String,
}
