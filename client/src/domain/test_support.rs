//! Shared fixtures for domain unit tests.

use catalogue::Catalogue;

use crate::domain::{Bio, DisplayName, UserId, UserProfile, Wallet};

const CATALOGUE_JSON: &str = include_str!("../../../crates/catalogue/fixtures/catalogue.json");

pub(crate) fn fixture_catalogue() -> Catalogue {
    Catalogue::from_json(CATALOGUE_JSON).expect("fixture catalogue parses")
}

pub(crate) fn test_user_id() -> UserId {
    UserId::new("11111111-1111-1111-1111-111111111111").expect("user id")
}

pub(crate) fn profile_with_wallet(wallet: Wallet) -> UserProfile {
    UserProfile {
        id: test_user_id(),
        display_name: DisplayName::new("Layla").expect("display name"),
        bio: Bio::new("Singer from Amman").expect("bio"),
        country: None,
        age: None,
        gender: None,
        avatar: None,
        vip_level: 1,
        wallet,
    }
}
