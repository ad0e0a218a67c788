// crates/spec-converter-core/src/schema.rs
// ============================================================================
// Module: Report Schema
// Description: JSON Schema builders for the O-RAN test results report.
// Purpose: Provide the canonical schema every report entity is validated against.
// Dependencies: serde_json, crate::{enums, identifiers, timestamp}
// ============================================================================

//! ## Overview
//! The report schema is a Draft 2020-12 document whose `$defs` hold one
//! definition per entity. [`report_schema`] roots it at the summary;
//! [`entity_schema`] roots the same definitions at any single entity so that
//! fragments (a configuration block, one test case) validate on their own.
//!
//! Optional properties accept `null` as absent; entities never write `null`.
//!
//! Security posture: schemas gate model output and operator files; every
//! object closes with `additionalProperties: false`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;
use serde_json::json;

use crate::enums::DeploymentRfScenario;
use crate::enums::InterfaceUnderTest;
use crate::enums::ResultType;
use crate::enums::TestStatus;
use crate::enums::TestType;
use crate::enums::Units;
use crate::identifiers::ITEM_NUMBER_MAX_LENGTH;
use crate::identifiers::ITEM_NUMBER_PATTERN;
use crate::identifiers::LAB_TEST_ID_MAX_LENGTH;
use crate::identifiers::LAB_TEST_ID_MIN_LENGTH;
use crate::identifiers::LAB_TEST_ID_PATTERN;
use crate::identifiers::TAG_MAX_LENGTH;
use crate::identifiers::TAG_PATTERN;
use crate::timestamp::LOCAL_TIMESTAMP_PATTERN;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Dialect declared by every generated schema.
pub const SCHEMA_DIALECT: &str = "https://json-schema.org/draft/2020-12/schema";

/// Identifier of the published report schema.
pub const REPORT_SCHEMA_ID: &str = "spec-converter://schemas/test-results-summary.schema.json";

/// Only report format version understood by this crate.
pub const SCHEMA_VERSION: u8 = 1;

/// WG4 IoT specification version such as `10.00`.
const IOT_VERSION_PATTERN: &str = r"^[0-9][0-9][.][0-9][0-9]$";

/// Short names and labels.
const TEXT_255: usize = 255;

/// Addresses and short descriptions.
const TEXT_512: usize = 512;

/// Descriptions.
const TEXT_1023: usize = 1023;

/// Long free text.
const TEXT_4095: usize = 4095;

/// Wire names of [`crate::ConfigurationParameters`] fields, in declaration order.
pub const CONFIGURATION_FIELDS: &[&str] = &[
    "deploymentArchitecture",
    "deploymentScale",
    "deploymentRfScenario",
    "frequencyRange5G",
    "band5G",
    "subCarrierSpacing",
    "totalResourceBlocks",
    "duplexMode",
    "numTxAntenna",
    "numRxAntenna",
    "totalTransmitPowerIntoAntenna",
    "azimuth",
    "tilt",
    "height",
    "numberOfCells",
    "tddDlUlRatio",
    "geoLocGrp",
];

/// Entities with a definition under `$defs`.
pub const ENTITY_NAMES: &[&str] = &[
    "GeoCoordinate",
    "ConfigurationParameters",
    "UEContext",
    "AdditionalContext",
    "Contact",
    "DecoratedLink",
    "Artifact",
    "TestNote",
    "Measurement",
    "Metric",
    "TestCase",
    "TestGroup",
    "ResultItem",
    "WG4IotProfile",
    "TestMetadata",
    "TestbedComponent",
    "TestLab",
    "TestSpecification",
    "TestResultsSummary",
];

// ============================================================================
// SECTION: Entry Points
// ============================================================================

/// Returns the JSON schema of a complete test results report.
#[must_use]
pub fn report_schema() -> Value {
    json!({
        "$schema": SCHEMA_DIALECT,
        "$id": REPORT_SCHEMA_ID,
        "title": "O-RAN Test Results Summary",
        "description": "Test results report produced by O-RAN test campaigns.",
        "$ref": "#/$defs/TestResultsSummary",
        "$defs": definitions()
    })
}

/// Returns a schema that validates a single entity named `entity`.
///
/// Unknown names yield a schema whose reference cannot be resolved.
#[must_use]
pub fn entity_schema(entity: &str) -> Value {
    json!({
        "$schema": SCHEMA_DIALECT,
        "$ref": format!("#/$defs/{entity}"),
        "$defs": definitions()
    })
}

/// Returns every entity definition keyed by entity name.
fn definitions() -> Value {
    json!({
        "GeoCoordinate": geo_coordinate_schema(),
        "ConfigurationParameters": configuration_parameters_schema(),
        "UEContext": ue_context_schema(),
        "AdditionalContext": additional_context_schema(),
        "Contact": contact_schema(),
        "DecoratedLink": decorated_link_schema(),
        "Artifact": artifact_schema(),
        "TestNote": test_note_schema(),
        "Measurement": measurement_schema(),
        "Metric": metric_schema(),
        "TestCase": test_case_schema(),
        "TestGroup": test_group_schema(),
        "ResultItem": result_item_schema(),
        "WG4IotProfile": iot_profile_schema(),
        "TestMetadata": test_metadata_schema(),
        "TestbedComponent": testbed_component_schema(),
        "TestLab": test_lab_schema(),
        "TestSpecification": test_specification_schema(),
        "TestResultsSummary": test_results_summary_schema()
    })
}

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Schema for one cell site position.
fn geo_coordinate_schema() -> Value {
    closed_object(
        &json!({
            "latitude": { "type": "number" },
            "longitude": { "type": "number" }
        }),
        &["latitude", "longitude"],
    )
}

/// Schema for deployment configuration; every field is optional.
fn configuration_parameters_schema() -> Value {
    closed_object(
        &json!({
            "deploymentArchitecture": text(TEXT_255),
            "deploymentScale": text(TEXT_255),
            "deploymentRfScenario": enumeration(DeploymentRfScenario::ALL),
            "frequencyRange5G": non_empty_list(&text(TEXT_255)),
            "band5G": non_empty_list(&text(TEXT_255)),
            "subCarrierSpacing": text(TEXT_255),
            "totalResourceBlocks": unsigned(),
            "duplexMode": text(TEXT_255),
            "numTxAntenna": unsigned(),
            "numRxAntenna": unsigned(),
            "totalTransmitPowerIntoAntenna": { "type": "number" },
            "azimuth": { "type": "integer" },
            "tilt": { "type": "integer" },
            "height": { "type": "integer" },
            "numberOfCells": unsigned(),
            "tddDlUlRatio": text(TEXT_255),
            "geoLocGrp": non_empty_list(&reference("GeoCoordinate"))
        }),
        &[],
    )
}

/// Schema for a user-equipment scenario.
fn ue_context_schema() -> Value {
    closed_object(
        &json!({
            "numberOfUE": unsigned(),
            "location": text(TEXT_255),
            "targetThroughput": text(TEXT_255),
            "slice": text(TEXT_255),
            "qosId": text(TEXT_255),
            "mobilityModel": text(TEXT_255),
            "mobilitySpeed": text(TEXT_255)
        }),
        &[],
    )
}

/// Schema for extra campaign context.
fn additional_context_schema() -> Value {
    closed_object(&json!({ "ueContext": reference("UEContext") }), &[])
}

// ============================================================================
// SECTION: Descriptive Records
// ============================================================================

/// Schema for a person.
fn contact_schema() -> Value {
    closed_object(
        &json!({
            "firstName": text(TEXT_255),
            "lastName": text(TEXT_255),
            "organization": text(TEXT_255),
            "email": { "type": "string", "format": "email" },
            "phone": text(TEXT_255)
        }),
        &["firstName", "lastName", "email"],
    )
}

/// Schema for a named hyperlink.
fn decorated_link_schema() -> Value {
    closed_object(
        &json!({
            "displayName": text(TEXT_255),
            "description": text(TEXT_1023),
            "url": uri()
        }),
        &["displayName", "url"],
    )
}

/// Schema for a produced file.
fn artifact_schema() -> Value {
    closed_object(
        &json!({
            "name": text(TEXT_255),
            "path": text(TEXT_1023),
            "description": text(TEXT_4095)
        }),
        &["name", "path", "description"],
    )
}

/// Schema for a titled note.
fn test_note_schema() -> Value {
    closed_object(
        &json!({
            "title": text(TEXT_255),
            "body": text(TEXT_4095)
        }),
        &["title", "body"],
    )
}

// ============================================================================
// SECTION: Result Tree
// ============================================================================

/// Schema for one measured quantity; values may be any JSON.
fn measurement_schema() -> Value {
    closed_object(
        &json!({
            "name": text(TEXT_255),
            "description": text(TEXT_1023),
            "values": { "type": "array", "minItems": 1 },
            "units": enumeration(Units::ALL),
            "references": non_empty_list(&reference("DecoratedLink"))
        }),
        &["name", "values", "units"],
    )
}

/// Schema for a pass criterion; `WARN` is not a metric outcome.
fn metric_schema() -> Value {
    closed_object(
        &json!({
            "description": text(TEXT_1023),
            "measurements": non_empty_list(&reference("Measurement")),
            "status": enumeration(TestStatus::ALL),
            "result": excluding(ResultType::ALL, ResultType::Warn.as_str())
        }),
        &["description", "measurements", "status", "result"],
    )
}

/// Schema for a result tree leaf.
fn test_case_schema() -> Value {
    closed_object(
        &json!({
            "number": item_number(),
            "name": text(TEXT_255),
            "description": text(TEXT_1023),
            "result": enumeration(ResultType::ALL),
            "status": enumeration(TestStatus::ALL),
            "startDate": timestamp(),
            "stopDate": timestamp(),
            "metrics": non_empty_list(&reference("Metric")),
            "artifacts": non_empty_list(&reference("Artifact")),
            "links": non_empty_list(&reference("DecoratedLink")),
            "measurements": non_empty_list(&reference("Measurement")),
            "notes": non_empty_list(&reference("TestNote")),
            "contacts": non_empty_list(&reference("Contact"))
        }),
        &["number", "name", "description", "result", "status", "metrics"],
    )
}

/// Schema for a result tree interior node.
fn test_group_schema() -> Value {
    closed_object(
        &json!({
            "number": item_number(),
            "name": text(TEXT_255),
            "description": text(TEXT_4095),
            "groupItems": non_empty_list(&reference("ResultItem"))
        }),
        &["number", "name", "groupItems"],
    )
}

/// Schema for a result tree node.
///
/// `groupItems` marks a group and `metrics` marks a case; an item must carry
/// exactly one of them and is then validated as that entity.
fn result_item_schema() -> Value {
    json!({
        "type": "object",
        "anyOf": [
            { "required": ["groupItems"] },
            { "required": ["metrics"] }
        ],
        "not": { "required": ["groupItems", "metrics"] },
        "allOf": [
            {
                "if": { "required": ["groupItems"] },
                "then": reference("TestGroup")
            },
            {
                "if": { "required": ["metrics"] },
                "then": reference("TestCase")
            }
        ]
    })
}

// ============================================================================
// SECTION: Report Root
// ============================================================================

/// Schema for the interoperability profile; one profile name is required.
fn iot_profile_schema() -> Value {
    let mut schema = closed_object(
        &json!({
            "wg4IotSpecificationVersion": {
                "type": "string",
                "maxLength": 5,
                "pattern": IOT_VERSION_PATTERN
            },
            "mPlaneIotProfileName": bounded_text(10, 128),
            "mPlaneIotProfileTestConfiguration": bounded_text(10, 128),
            "cusPlaneIotProfileName": bounded_text(10, 128),
            "cusPlaneIotProfileTestConfiguration": bounded_text(10, 128)
        }),
        &["wg4IotSpecificationVersion"],
    );
    schema["anyOf"] = json!([
        present_field("mPlaneIotProfileName"),
        present_field("cusPlaneIotProfileName")
    ]);
    schema
}

/// Schema for campaign metadata; `SKIP` is not a campaign outcome.
fn test_metadata_schema() -> Value {
    closed_object(
        &json!({
            "contacts": non_empty_list(&reference("Contact")),
            "startDate": timestamp(),
            "stopDate": timestamp(),
            "dutName": text(TEXT_255),
            "interfaceUnderTest": non_empty_list(&enumeration(InterfaceUnderTest::ALL)),
            "result": excluding(ResultType::ALL, ResultType::Skip.as_str()),
            "testType": enumeration(TestType::ALL),
            "testId": test_id(),
            "iotProfile": reference("WG4IotProfile"),
            "configurationParameters": non_empty_list(&reference("ConfigurationParameters")),
            "additionalContext": non_empty_list(&reference("AdditionalContext"))
        }),
        &["startDate", "dutName", "result", "testType", "testId"],
    )
}

/// Schema for a testbed component; one version string must be non-blank.
fn testbed_component_schema() -> Value {
    let mut schema = closed_object(
        &json!({
            "componentDescription": text(TEXT_255),
            "manufacturerName": text(TEXT_255),
            "manufacturerModel": text(TEXT_255),
            "serialNumber": text(TEXT_255),
            "testbedInventoryId": text(TEXT_255),
            "softwareVersion": text(TEXT_255),
            "hardwareVersion": text(TEXT_255),
            "firmwareVersion": text(TEXT_255),
            "contacts": non_empty_list(&reference("Contact")),
            "configurationArtifacts": non_empty_list(&reference("Artifact")),
            "configurationNotes": non_empty_list(&reference("TestNote")),
            "configurationParameters": reference("ConfigurationParameters")
        }),
        &["componentDescription", "manufacturerName", "manufacturerModel"],
    );
    schema["anyOf"] = json!([
        non_blank_field("softwareVersion"),
        non_blank_field("hardwareVersion"),
        non_blank_field("firmwareVersion")
    ]);
    schema
}

/// Schema for the hosting lab.
fn test_lab_schema() -> Value {
    closed_object(
        &json!({
            "name": text(TEXT_255),
            "address": text(TEXT_512),
            "contacts": non_empty_list(&reference("Contact")),
            "links": non_empty_list(&reference("DecoratedLink"))
        }),
        &["name", "address", "contacts"],
    )
}

/// Schema for a referenced specification document.
fn test_specification_schema() -> Value {
    closed_object(
        &json!({
            "name": text(TEXT_255),
            "version": text(TEXT_255),
            "description": text(TEXT_512),
            "links": non_empty_list(&reference("DecoratedLink"))
        }),
        &["name", "version", "links"],
    )
}

/// Schema for the report root.
fn test_results_summary_schema() -> Value {
    closed_object(
        &json!({
            "$schema": uri(),
            "schemaVersion": { "type": "integer", "const": SCHEMA_VERSION },
            "testMetadata": reference("TestMetadata"),
            "tags": non_empty_list(&json!({
                "type": "string",
                "maxLength": TAG_MAX_LENGTH,
                "pattern": TAG_PATTERN
            })),
            "testbedComponents": non_empty_list(&reference("TestbedComponent")),
            "testLab": reference("TestLab"),
            "testSpecifications": non_empty_list(&reference("TestSpecification")),
            "testResults": non_empty_list(&reference("ResultItem")),
            "notes": non_empty_list(&reference("TestNote"))
        }),
        &[
            "schemaVersion",
            "testMetadata",
            "testbedComponents",
            "testLab",
            "testSpecifications",
            "testResults",
        ],
    )
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Object schema that rejects undeclared keys; optional properties accept `null`.
fn closed_object(properties: &Value, required: &[&str]) -> Value {
    let properties: Map<String, Value> = properties
        .as_object()
        .map(|fields| {
            fields
                .iter()
                .map(|(name, schema)| {
                    let schema = if required.contains(&name.as_str()) {
                        schema.clone()
                    } else {
                        nullable(schema)
                    };
                    (name.clone(), schema)
                })
                .collect()
        })
        .unwrap_or_default();
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false
    })
}

/// Applies `schema` to every value except `null`.
///
/// `if`/`else` keeps the failing keyword of `schema` in reported errors.
fn nullable(schema: &Value) -> Value {
    json!({ "if": { "type": "null" }, "else": schema })
}

/// Reference to another entity definition.
fn reference(entity: &str) -> Value {
    json!({ "$ref": format!("#/$defs/{entity}") })
}

/// Text of at most `max` characters.
fn text(max: usize) -> Value {
    json!({ "type": "string", "maxLength": max })
}

/// Text of `min..=max` characters.
fn bounded_text(min: usize, max: usize) -> Value {
    json!({ "type": "string", "minLength": min, "maxLength": max })
}

/// Array holding at least one `items`.
fn non_empty_list(items: &Value) -> Value {
    json!({ "type": "array", "items": items, "minItems": 1 })
}

/// Closed string vocabulary.
fn enumeration(values: &[&str]) -> Value {
    json!({ "type": "string", "enum": values })
}

/// Closed string vocabulary with one value ruled out at this position.
fn excluding(values: &[&str], banned: &str) -> Value {
    json!({ "type": "string", "enum": values, "not": { "const": banned } })
}

/// Unsigned 32-bit integer.
fn unsigned() -> Value {
    json!({ "type": "integer", "minimum": 0, "maximum": u32::MAX })
}

/// Absolute URI.
fn uri() -> Value {
    json!({ "type": "string", "format": "uri" })
}

/// RFC 3339 timestamp or an offset-less ISO 8601 timestamp.
fn timestamp() -> Value {
    json!({
        "type": "string",
        "anyOf": [
            { "format": "date-time" },
            { "pattern": LOCAL_TIMESTAMP_PATTERN }
        ]
    })
}

/// Dotted outline number.
fn item_number() -> Value {
    json!({
        "type": "string",
        "minLength": 1,
        "maxLength": ITEM_NUMBER_MAX_LENGTH,
        "pattern": ITEM_NUMBER_PATTERN
    })
}

/// UUID or lab-assigned campaign code.
fn test_id() -> Value {
    json!({
        "type": "string",
        "anyOf": [
            { "format": "uuid" },
            {
                "minLength": LAB_TEST_ID_MIN_LENGTH,
                "maxLength": LAB_TEST_ID_MAX_LENGTH,
                "pattern": LAB_TEST_ID_PATTERN
            }
        ]
    })
}

/// Requires `field` to hold a string.
fn present_field(field: &str) -> Value {
    json!({
        "required": [field],
        "properties": { field: { "type": "string" } }
    })
}

/// Requires `field` to hold a string with at least one non-whitespace character.
fn non_blank_field(field: &str) -> Value {
    json!({
        "required": [field],
        "properties": { field: { "type": "string", "pattern": "\\S" } }
    })
}
