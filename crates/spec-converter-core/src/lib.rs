// crates/spec-converter-core/src/lib.rs
// ============================================================================
// Module: Spec Converter Core Library
// Description: Public API surface for the O-RAN test results report model.
// Purpose: Expose report entities, identifiers, enumerations, and validation.
// Dependencies: crate::{enums, identifiers, model, schema, timestamp, validation}
// ============================================================================

//! ## Overview
//! Spec converter core defines the typed test results report: metadata, testbed
//! components, labs, specifications, and the recursive tree of test groups and
//! test cases. Every entity is checked against a Draft 2020-12 JSON Schema
//! before it is decoded, so a rejected document reports all of its violations
//! at once with a path to each.
//!
//! The crate performs no I/O. Ingestion, mapping, and transport live in sibling
//! crates and hand their output to the entities defined here.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod validation;

pub mod enums;
pub mod identifiers;
pub mod model;
pub mod schema;
pub mod timestamp;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use enums::DeploymentRfScenario;
pub use enums::InterfaceUnderTest;
pub use enums::ResultType;
pub use enums::TestStatus;
pub use enums::TestType;
pub use enums::Units;
pub use identifiers::IdentifierError;
pub use identifiers::ItemNumber;
pub use identifiers::Tag;
pub use identifiers::TestId;
pub use model::AdditionalContext;
pub use model::Artifact;
pub use model::ConfigurationParameters;
pub use model::Contact;
pub use model::DecoratedLink;
pub use model::GeoCoordinate;
pub use model::IotProfile;
pub use model::Measurement;
pub use model::Metric;
pub use model::ResultItem;
pub use model::TestCase;
pub use model::TestGroup;
pub use model::TestLab;
pub use model::TestMetadata;
pub use model::TestNote;
pub use model::TestResultsSummary;
pub use model::TestSpecification;
pub use model::TestbedComponent;
pub use model::UeContext;
pub use schema::SCHEMA_VERSION;
pub use schema::report_schema;
pub use timestamp::Timestamp;
pub use validation::Entity;
pub use validation::ReportError;
pub use validation::SchemaValidationError;
pub use validation::Violation;
