// crates/spec-converter-core/src/validation/tests.rs
// ============================================================================
// Module: Report Validation Unit Tests
// Description: Exercises schema checking and violation reporting.
// Purpose: Pin instance paths, keyword extraction, and the decode step.
// Dependencies: spec-converter-core
// ============================================================================

//! ## Overview
//! Unit tests for violation construction, the compiled schema cache, and the
//! [`Entity`] entry points.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_docs_in_private_items,
    reason = "Test-only validation helpers use panic-based assertions for clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::json;

use super::*;
use crate::model::Contact;
use crate::model::TestCase;
use crate::model::TestNote;

// ============================================================================
// SECTION: Keywords
// ============================================================================

#[test]
fn failing_keyword_skips_array_indexes() {
    assert_eq!(failing_keyword("/properties/name/maxLength"), "maxLength");
    assert_eq!(failing_keyword("/$ref/anyOf/1"), "anyOf");
    assert_eq!(failing_keyword("/required/0"), "required");
    assert_eq!(failing_keyword(""), SCHEMA_KEYWORD);
}

#[test]
fn violations_render_root_as_slash() {
    let violation = Violation::at_root("required", "\"title\" is a required property".to_string());
    assert_eq!(violation.to_string(), "/: \"title\" is a required property");
}

// ============================================================================
// SECTION: Schema Checks
// ============================================================================

#[test]
fn every_entity_schema_compiles() {
    for name in ENTITY_NAMES {
        assert!(matches!(VALIDATORS.get(name), Some(Ok(_))), "{name} failed to compile");
    }
}

#[test]
fn unknown_entities_are_reported_instead_of_panicking() {
    let error = check_entity("NoSuchEntity", &json!({})).unwrap_err();
    assert!(error.has("", SCHEMA_KEYWORD));
}

#[test]
fn unknown_and_missing_keys_are_reported_together() {
    let error = TestNote::from_value(&json!({"heading": "x", "extra": 1})).unwrap_err();
    assert_eq!(error.entity(), "TestNote");
    assert!(error.is_missing("", "title"));
    assert!(error.is_missing("", "body"));
    assert!(error.is_unexpected("", "heading"));
    assert!(error.is_unexpected("", "extra"));
}

#[test]
fn text_limits_count_characters_not_bytes() {
    let note = |title: String| json!({"title": title, "body": "b"});
    assert!(TestNote::from_value(&note("ä".repeat(255))).is_ok());
    let error = TestNote::from_value(&note("ä".repeat(256))).unwrap_err();
    assert!(error.has("/title", "maxLength"));
}

#[test]
fn explicit_null_optionals_read_as_absent() {
    let contact = Contact::from_value(&json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@example.org",
        "phone": null
    }))
    .unwrap();
    assert_eq!(contact.phone, None);
    assert!(contact.to_json_value().unwrap().get("phone").is_none());
}

#[test]
fn required_fields_reject_null() {
    let error = TestNote::from_value(&json!({"title": null, "body": "b"})).unwrap_err();
    assert!(error.has("/title", "type"));
}

#[test]
fn optional_fields_keep_their_own_keyword() {
    let error = Contact::from_value(&json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@example.org",
        "phone": "9".repeat(256)
    }))
    .unwrap_err();
    assert!(error.has("/phone", "maxLength"), "{error}");
}

#[test]
fn email_format_is_asserted() {
    let contact = |email: &str| {
        json!({"firstName": "Ada", "lastName": "Lovelace", "email": email})
    };
    assert!(Contact::from_value(&contact("ada@example.org")).is_ok());
    let error = Contact::from_value(&contact("not-an-email")).unwrap_err();
    assert!(error.has("/email", "format"));
}

#[test]
fn schema_passes_but_decoding_fails_for_impossible_dates() {
    let error = TestCase::from_value(&json!({
        "number": "1",
        "name": "Attach",
        "description": "UE attaches.",
        "result": "PASS",
        "status": "optional",
        "startDate": "2025-13-45T08:00:00",
        "metrics": [{
            "description": "d",
            "measurements": [{"name": "m", "values": [1], "units": "count"}],
            "status": "optional",
            "result": "PASS"
        }]
    }))
    .unwrap_err();
    assert!(error.has("", DESERIALIZE_KEYWORD));
}

// ============================================================================
// SECTION: Entity Round Trips
// ============================================================================

#[test]
fn validate_rechecks_programmatic_edits() {
    let mut note = TestNote::from_value(&json!({"title": "t", "body": "b"})).unwrap();
    assert!(note.validate().is_ok());
    note.title = "x".repeat(300);
    let error = note.validate().unwrap_err();
    assert!(error.has("/title", "maxLength"));
}

#[test]
fn malformed_text_is_a_json_error() {
    let error = TestNote::from_json_str("{\"title\": ").unwrap_err();
    assert!(matches!(error, ReportError::Json(_)));
}
