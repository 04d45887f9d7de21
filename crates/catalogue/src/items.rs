//! Gift, VIP tier, and avatar preset entries.

use crate::localized::LocalizedText;

/// A gift that can be sent inside a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gift {
    id: String,
    name: LocalizedText,
    price_diamonds: u64,
}

impl Gift {
    pub(crate) const fn new(id: String, name: LocalizedText, price_diamonds: u64) -> Self {
        Self {
            id,
            name,
            price_diamonds,
        }
    }

    /// Stable gift identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Bilingual display name.
    #[must_use]
    pub const fn name(&self) -> &LocalizedText {
        &self.name
    }

    /// Price in diamonds. Always positive.
    #[must_use]
    pub const fn price_diamonds(&self) -> u64 {
        self.price_diamonds
    }
}

/// A VIP tier unlocked by cumulative diamond spend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VipTier {
    level: u8,
    name: LocalizedText,
    min_spent_diamonds: u64,
}

impl VipTier {
    pub(crate) const fn new(level: u8, name: LocalizedText, min_spent_diamonds: u64) -> Self {
        Self {
            level,
            name,
            min_spent_diamonds,
        }
    }

    /// Tier level; higher is better.
    #[must_use]
    pub const fn level(&self) -> u8 {
        self.level
    }

    /// Bilingual tier name.
    #[must_use]
    pub const fn name(&self) -> &LocalizedText {
        &self.name
    }

    /// Cumulative diamond spend required to reach the tier.
    #[must_use]
    pub const fn min_spent_diamonds(&self) -> u64 {
        self.min_spent_diamonds
    }
}

/// A preset avatar offered by the avatar selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarPreset {
    id: String,
    url: String,
}

impl AvatarPreset {
    pub(crate) const fn new(id: String, url: String) -> Self {
        Self { id, url }
    }

    /// Stable preset identifier sent in profile updates.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Image location rendered by the client.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}
