//! Tests for the user identity primitives.

use super::*;
use rstest::rstest;
use serde_json::json;

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[rstest]
fn user_id_accepts_uuid() {
    let id = UserId::new(VALID_ID).expect("valid id");
    assert_eq!(id.as_ref(), VALID_ID);
    assert_eq!(id.as_uuid().to_string(), VALID_ID);
}

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
fn user_id_rejects_bad_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw), Err(expected));
}

#[rstest]
fn user_id_round_trips_through_json() {
    let id = UserId::new(VALID_ID).expect("valid id");
    let value = serde_json::to_value(&id).expect("serialize id");
    assert_eq!(value, json!(VALID_ID));
}

#[rstest]
#[case("Ada Lovelace")]
#[case("محمد علي")]
#[case("layla_99")]
#[case("dr.noor")]
#[case("  سارة  ")]
fn display_name_accepts_latin_and_arabic(#[case] raw: &str) {
    let name = DisplayName::new(raw).expect("valid display name");
    assert_eq!(name.as_ref(), raw.trim());
}

#[rstest]
#[case("", "empty")]
#[case("    ", "empty")]
#[case("a", "too_short")]
#[case(&"ع".repeat(DISPLAY_NAME_MAX + 1), "too_long")]
#[case("bad$char", "invalid_chars")]
#[case("<script>", "invalid_chars")]
fn display_name_rejects_with_stable_codes(#[case] raw: &str, #[case] expected_code: &str) {
    let err = DisplayName::new(raw).expect_err("display name should be rejected");
    assert_eq!(err.code(), expected_code);
}

#[rstest]
fn display_name_boundaries_are_inclusive() {
    assert!(DisplayName::new("ab").is_ok());
    assert!(DisplayName::new("a".repeat(DISPLAY_NAME_MAX)).is_ok());
}

#[rstest]
fn display_name_deserialization_validates() {
    let result: Result<DisplayName, _> = serde_json::from_value(json!("x"));
    assert!(result.is_err());
}
