// crates/spec-converter-core/tests/report_validation.rs
// ============================================================================
// Module: Report Validation Tests
// Description: Whole-document acceptance and rejection behavior.
// Purpose: Ensure invariant violations anywhere in the tree reject the document.
// ============================================================================
//! ## Overview
//! Starts from known-good reports and mutates one spot at a time, checking that
//! the aggregated error names the exact path of every violation.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use serde_json::Value;
use serde_json::json;
use spec_converter_core::Entity;
use spec_converter_core::ReportError;
use spec_converter_core::SchemaValidationError;
use spec_converter_core::TestResultsSummary;
use spec_converter_core::Timestamp;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn minimal() -> Value {
    serde_json::from_str(include_str!("fixtures/minimal_report.json")).unwrap()
}

fn complex() -> Value {
    serde_json::from_str(include_str!("fixtures/complex_report.json")).unwrap()
}

fn reject(value: &Value) -> SchemaValidationError {
    match TestResultsSummary::from_value(value) {
        Ok(_) => panic!("document unexpectedly accepted"),
        Err(err) => err,
    }
}

// ============================================================================
// SECTION: Acceptance
// ============================================================================

#[test]
fn fixtures_are_accepted() {
    let minimal = TestResultsSummary::from_value(&minimal()).unwrap();
    assert_eq!(minimal.case_count(), 1);
    let complex = TestResultsSummary::from_value(&complex()).unwrap();
    assert_eq!(complex.case_count(), 3);
    assert_eq!(complex.testbed_components.len(), 3);
}

#[test]
fn derived_deserialize_checks_shape_but_not_model_rules() {
    let mut doc = minimal();
    doc["testMetadata"]["result"] = json!("SKIP");
    let shaped: Result<TestResultsSummary, _> = serde_json::from_value(doc.clone());
    assert!(shaped.is_ok());
    assert!(reject(&doc).has("/testMetadata/result", "not"));

    doc["testMetadata"]["unexpected"] = json!(true);
    let shaped: Result<TestResultsSummary, _> = serde_json::from_value(doc);
    let err = shaped.unwrap_err().to_string();
    assert!(err.contains("unexpected"), "{err}");
}

#[test]
fn naive_campaign_timestamps_are_accepted() {
    let mut doc = minimal();
    doc["testMetadata"]["startDate"] = json!("2025-05-01T08:00:00.123456");
    let parsed = TestResultsSummary::from_value(&doc).unwrap();
    assert!(matches!(parsed.test_metadata.start_date, Timestamp::Local(_)));
    let rendered = parsed.to_json_value().unwrap();
    let start = rendered["testMetadata"]["startDate"].as_str().unwrap();
    assert!(start.starts_with("2025-05-01T08:00:00.123456"), "{start}");
    assert_eq!(TestResultsSummary::from_value(&rendered).unwrap(), parsed);
}

#[test]
fn malformed_json_is_not_a_validation_error() {
    let err = TestResultsSummary::from_json_str("{\"schemaVersion\": 1,").unwrap_err();
    assert!(matches!(err, ReportError::Json(_)));
}

// ============================================================================
// SECTION: Cross-Field Invariants
// ============================================================================

#[test]
fn metric_warn_is_rejected() {
    let mut doc = minimal();
    doc["testResults"][0]["metrics"][0]["result"] = json!("WARN");
    let err = reject(&doc);
    assert!(err.has("/testResults/0/metrics/0/result", "not"), "{err}");
}

#[test]
fn metadata_skip_is_rejected() {
    let mut doc = minimal();
    doc["testMetadata"]["result"] = json!("SKIP");
    let err = reject(&doc);
    assert!(err.has("/testMetadata/result", "not"), "{err}");
}

#[test]
fn unversioned_testbed_component_is_rejected() {
    let mut doc = minimal();
    doc["testbedComponents"][1] = json!({
        "componentDescription": "O-RU Simulator",
        "manufacturerName": "SimCorp",
        "manufacturerModel": "RU-Sim-Y2"
    });
    let err = reject(&doc);
    assert!(err.has("/testbedComponents/1", "anyOf"), "{err}");
}

#[test]
fn tag_with_space_is_rejected() {
    let mut doc = complex();
    doc["tags"] = json!(["fronthaul", "Has Space"]);
    let err = reject(&doc);
    assert!(err.has("/tags/1", "pattern"), "{err}");
    assert_eq!(err.violations().len(), 1);
}

// ============================================================================
// SECTION: Recursive Shape
// ============================================================================

#[test]
fn empty_group_items_are_rejected() {
    let mut doc = complex();
    doc["testResults"][1]["groupItems"][0]["groupItems"] = json!([]);
    let err = reject(&doc);
    assert!(err.has("/testResults/1/groupItems/0/groupItems", "minItems"), "{err}");
}

#[test]
fn shapeless_child_item_is_rejected() {
    let mut doc = complex();
    doc["testResults"][0]["groupItems"][1] = json!({
        "number": "1.2",
        "name": "Software Download",
        "description": "Verify the SW download procedure."
    });
    let err = reject(&doc);
    assert!(err.has("/testResults/0/groupItems/1", "anyOf"), "{err}");
}

// ============================================================================
// SECTION: Aggregation
// ============================================================================

#[test]
fn every_violation_is_reported_at_once() {
    let mut doc = complex();
    doc["schemaVersion"] = json!(2);
    doc["unexpected"] = json!(true);
    doc["testMetadata"]["testId"] = json!("not-an-id");
    doc["testMetadata"]["interfaceUnderTest"] = json!(["o-ru.ofh", "o-ru.xyz"]);
    doc["testLab"]["contacts"][0]["email"] = json!("manager");
    doc["testSpecifications"][0]["links"][0]["url"] = json!("iot/v10.pdf");
    doc["testResults"][0]["groupItems"][0]["number"] = json!("1..1");
    doc["testResults"][0]["groupItems"][0]["metrics"][0]["measurements"][0]["units"] =
        json!("Hz");

    let err = reject(&doc);
    assert!(err.is_unexpected("", "unexpected"), "{err}");
    for pointer in [
        "/schemaVersion",
        "/testMetadata/testId",
        "/testMetadata/interfaceUnderTest/1",
        "/testLab/contacts/0/email",
        "/testSpecifications/0/links/0/url",
        "/testResults/0/groupItems/0/number",
        "/testResults/0/groupItems/0/metrics/0/measurements/0/units",
    ] {
        assert!(err.touches(pointer), "missing violation at {pointer}: {err}");
    }
    assert_eq!(err.violations().len(), 8, "{err}");
}

#[test]
fn missing_required_sections_are_listed() {
    let doc = json!({"schemaVersion": 1});
    let err = reject(&doc);
    for section in
        ["testMetadata", "testbedComponents", "testLab", "testSpecifications", "testResults"]
    {
        assert!(err.is_missing("", section), "{section}: {err}");
    }
}
