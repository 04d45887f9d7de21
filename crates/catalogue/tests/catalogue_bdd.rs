//! Behavioural tests for catalogue loading and country search.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use camino::Utf8Path;
use catalogue::{Catalogue, CatalogueError};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};

const DUPLICATE_GIFT_JSON: &str = r#"{
    "version": 1,
    "countries": [{"code": "EG", "name": {"ar": "مصر", "en": "Egypt"}}],
    "gifts": [
        {"id": "rose", "name": {"ar": "وردة", "en": "Rose"}, "priceDiamonds": 1},
        {"id": "rose", "name": {"ar": "وردة", "en": "Rose"}, "priceDiamonds": 2}
    ]
}"#;

#[derive(Default, ScenarioState)]
struct World {
    json_input: Slot<String>,
    catalogue_result: Slot<Result<Catalogue, CatalogueError>>,
    listed_codes: Slot<Vec<String>>,
}

impl World {
    fn catalogue(&self) -> Catalogue {
        self.catalogue_result
            .get()
            .expect("catalogue result should be set")
            .expect("catalogue should be valid")
    }
}

#[fixture]
fn world() -> World {
    World::default()
}

#[given("the bundled catalogue")]
fn the_bundled_catalogue(world: &World) {
    let path = Utf8Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/catalogue.json");
    world.catalogue_result.set(Catalogue::from_file(&path));
}

#[given("a catalogue document with a duplicate gift")]
fn a_catalogue_document_with_a_duplicate_gift(world: &World) {
    world.json_input.set(DUPLICATE_GIFT_JSON.to_owned());
}

#[when("the user searches countries for {query}")]
fn the_user_searches_countries_for(world: &World, query: String) {
    let catalogue = world.catalogue();
    let needle = query.trim_matches('"');
    let codes = catalogue
        .search_countries(needle)
        .into_iter()
        .map(|country| country.code().to_string())
        .collect();
    world.listed_codes.set(codes);
}

#[when("the catalogue is parsed")]
fn the_catalogue_is_parsed(world: &World) {
    let json = world.json_input.get().expect("json input should be set");
    world.catalogue_result.set(Catalogue::from_json(&json));
}

#[then("{count:usize} countries are listed")]
fn countries_are_listed(world: &World, count: usize) {
    let codes = world.listed_codes.get().expect("search should have run");
    assert_eq!(codes.len(), count, "unexpected matches: {codes:?}");
}

#[then("every country is listed")]
fn every_country_is_listed(world: &World) {
    let codes = world.listed_codes.get().expect("search should have run");
    assert_eq!(codes.len(), world.catalogue().countries().len());
}

#[then("parsing fails with a duplicate gift error")]
fn parsing_fails_with_a_duplicate_gift_error(world: &World) {
    let result = world
        .catalogue_result
        .get()
        .expect("catalogue result should be set");
    assert_eq!(
        result,
        Err(CatalogueError::DuplicateId {
            section: "gift",
            id: "rose".to_owned(),
        })
    );
}

#[scenario(
    path = "tests/features/catalogue.feature",
    name = "Bundled catalogue loads and filters countries in both languages"
)]
fn bundled_catalogue_filters_countries(world: World) {
    drop(world);
}

#[scenario(
    path = "tests/features/catalogue.feature",
    name = "Catalogue with duplicate gifts is rejected"
)]
fn duplicate_gifts_are_rejected(world: World) {
    drop(world);
}
