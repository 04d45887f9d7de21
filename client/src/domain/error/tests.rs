//! Tests for the domain error payload.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn invalid_request_case() -> DomainError {
    DomainError::invalid_request("bad").with_details(json!({"field": "bio"}))
}

#[rstest]
fn invalid_request_constructor_sets_code() {
    let err = DomainError::invalid_request("bad");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[case(DomainError::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(DomainError::timeout("slow"), ErrorCode::Timeout)]
#[case(DomainError::not_found("gone"), ErrorCode::NotFound)]
#[case(DomainError::unauthorized("who"), ErrorCode::Unauthorized)]
#[case(DomainError::internal("boom"), ErrorCode::InternalError)]
fn convenience_constructors_set_codes(#[case] err: DomainError, #[case] expected: ErrorCode) {
    assert_eq!(err.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = DomainError::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(DomainErrorValidationError::EmptyMessage)));
}

#[rstest]
fn serializes_to_camel_case_envelope(invalid_request_case: DomainError) {
    let value = serde_json::to_value(&invalid_request_case).expect("serialize error");
    assert_eq!(
        value,
        json!({"code": "invalid_request", "message": "bad", "details": {"field": "bio"}})
    );
}

#[rstest]
fn deserializes_backend_envelope() {
    let err: DomainError = serde_json::from_value(json!({
        "code": "service_unavailable",
        "message": "wallet service offline"
    }))
    .expect("deserialize error");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    assert_eq!(err.message(), "wallet service offline");
    assert!(err.details().is_none());
}

#[rstest]
fn deserialization_rejects_blank_message() {
    let result: Result<DomainError, _> = serde_json::from_value(json!({
        "code": "internal_error",
        "message": "  "
    }));
    assert!(result.is_err());
}

#[rstest]
fn display_uses_message() {
    assert_eq!(DomainError::timeout("took too long").to_string(), "took too long");
}
