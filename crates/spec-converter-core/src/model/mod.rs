// crates/spec-converter-core/src/model/mod.rs
// ============================================================================
// Module: Report Model
// Description: Typed entities of the O-RAN test results report.
// Purpose: Define the typed report tree read through the report schema.
// Dependencies: serde, crate::{schema, validation}
// ============================================================================

//! ## Overview
//! The report is a tree rooted at [`TestResultsSummary`]. Leaves are small
//! descriptive records ([`Contact`], [`DecoratedLink`], ...); the results
//! section is recursive, with [`TestGroup`] nodes holding further groups or
//! [`TestCase`] leaves.
//!
//! Entities serialize with their wire names and omit absent optionals. Their
//! derived `Deserialize` implementations reject unknown keys; the bounds,
//! vocabularies, and cross-field rules live in the report schema and are
//! enforced by [`crate::Entity::from_value`].
//!
//! ## Invariants
//! - Lists declared non-empty hold at least one element.
//! - Unknown keys are rejected at every level.
//! - Entities are immutable value objects once built.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod configuration;
mod descriptive;
mod report;
mod results;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use configuration::AdditionalContext;
pub use configuration::ConfigurationParameters;
pub use configuration::GeoCoordinate;
pub use configuration::UeContext;
pub use descriptive::Artifact;
pub use descriptive::Contact;
pub use descriptive::DecoratedLink;
pub use descriptive::TestNote;
pub use report::IotProfile;
pub use report::TestLab;
pub use report::TestMetadata;
pub use report::TestResultsSummary;
pub use report::TestSpecification;
pub use report::TestbedComponent;
pub use results::Measurement;
pub use results::Metric;
pub use results::ResultItem;
pub use results::TestCase;
pub use results::TestGroup;
