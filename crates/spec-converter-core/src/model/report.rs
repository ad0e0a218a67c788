// crates/spec-converter-core/src/model/report.rs
// ============================================================================
// Module: Report Root
// Description: Campaign metadata, testbed, lab, specifications, and the summary root.
// Purpose: Assemble the top of the report tree.
// Dependencies: serde, url, crate::{enums, identifiers, timestamp, validation}
// ============================================================================

//! ## Overview
//! [`TestResultsSummary`] is the document root. Reading it validates the whole
//! document against the report schema in one pass; nothing below it is
//! accepted on its own terms if the root is rejected.
//!
//! ## Invariants
//! - [`TestMetadata::result`] is never [`ResultType::Skip`].
//! - An [`IotProfile`] names an M-plane or CUS-plane profile (or both).
//! - A [`TestbedComponent`] carries at least one non-blank version string.
//! - `schemaVersion` is exactly [`crate::schema::SCHEMA_VERSION`].
//!
//! The rules above are schema keywords (`not`, `anyOf`, `const`); the types
//! here only carry the accepted values.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use url::Url;

use super::configuration::AdditionalContext;
use super::configuration::ConfigurationParameters;
use super::descriptive::Artifact;
use super::descriptive::Contact;
use super::descriptive::DecoratedLink;
use super::descriptive::TestNote;
use super::results::ResultItem;
use crate::enums::InterfaceUnderTest;
use crate::enums::ResultType;
use crate::enums::TestType;
use crate::identifiers::Tag;
use crate::identifiers::TestId;
use crate::timestamp::Timestamp;
use crate::validation::Entity;

// ============================================================================
// SECTION: IoT Profile
// ============================================================================

/// WG4 interoperability profile exercised by a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IotProfile {
    /// IoT specification version (`NN.NN`).
    pub wg4_iot_specification_version: String,
    /// M-plane profile name.
    #[serde(rename = "mPlaneIotProfileName", skip_serializing_if = "Option::is_none")]
    pub m_plane_profile_name: Option<String>,
    /// M-plane profile test configuration.
    #[serde(rename = "mPlaneIotProfileTestConfiguration", skip_serializing_if = "Option::is_none")]
    pub m_plane_test_configuration: Option<String>,
    /// CUS-plane profile name.
    #[serde(rename = "cusPlaneIotProfileName", skip_serializing_if = "Option::is_none")]
    pub cus_plane_profile_name: Option<String>,
    /// CUS-plane profile test configuration.
    #[serde(rename = "cusPlaneIotProfileTestConfiguration", skip_serializing_if = "Option::is_none")]
    pub cus_plane_test_configuration: Option<String>,
}

impl Entity for IotProfile {
    const NAME: &'static str = "WG4IotProfile";
}

// ============================================================================
// SECTION: Test Metadata
// ============================================================================

/// Campaign-level attributes of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TestMetadata {
    /// People responsible for the campaign.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacts: Option<Vec<Contact>>,
    /// Campaign start.
    pub start_date: Timestamp,
    /// Campaign end.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_date: Option<Timestamp>,
    /// Device under test.
    pub dut_name: String,
    /// Interfaces exercised.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface_under_test: Option<Vec<InterfaceUnderTest>>,
    /// Overall outcome; never `SKIP`.
    pub result: ResultType,
    /// Campaign kind.
    pub test_type: TestType,
    /// Campaign identifier.
    pub test_id: TestId,
    /// Interoperability profile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iot_profile: Option<IotProfile>,
    /// Tested configurations, one per cell scenario.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration_parameters: Option<Vec<ConfigurationParameters>>,
    /// UE scenarios.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_context: Option<Vec<AdditionalContext>>,
}

impl Entity for TestMetadata {
    const NAME: &'static str = "TestMetadata";
}

// ============================================================================
// SECTION: Testbed Component
// ============================================================================

/// Equipment or software taking part in the testbed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TestbedComponent {
    /// Role of the component.
    pub component_description: String,
    /// Manufacturer.
    pub manufacturer_name: String,
    /// Model designation.
    pub manufacturer_model: String,
    /// Serial number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    /// Lab inventory identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub testbed_inventory_id: Option<String>,
    /// Software version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub software_version: Option<String>,
    /// Hardware version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware_version: Option<String>,
    /// Firmware version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firmware_version: Option<String>,
    /// Support contacts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacts: Option<Vec<Contact>>,
    /// Configuration files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration_artifacts: Option<Vec<Artifact>>,
    /// Configuration notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration_notes: Option<Vec<TestNote>>,
    /// Component configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration_parameters: Option<ConfigurationParameters>,
}

impl Entity for TestbedComponent {
    const NAME: &'static str = "TestbedComponent";
}

// ============================================================================
// SECTION: Test Lab
// ============================================================================

/// Facility where the campaign ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestLab {
    /// Lab name.
    pub name: String,
    /// Postal address.
    pub address: String,
    /// Lab contacts.
    pub contacts: Vec<Contact>,
    /// Lab links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<DecoratedLink>>,
}

impl Entity for TestLab {
    const NAME: &'static str = "TestLab";
}

// ============================================================================
// SECTION: Test Specification
// ============================================================================

/// Specification document the campaign tested against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestSpecification {
    /// Specification name.
    pub name: String,
    /// Specification version.
    pub version: String,
    /// Specification summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Where to obtain the specification.
    pub links: Vec<DecoratedLink>,
}

impl Entity for TestSpecification {
    const NAME: &'static str = "TestSpecification";
}

// ============================================================================
// SECTION: Test Results Summary
// ============================================================================

/// Root of a test results report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TestResultsSummary {
    /// Schema URL the document declares.
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<Url>,
    /// Report format version; always [`crate::schema::SCHEMA_VERSION`].
    pub schema_version: u8,
    /// Campaign metadata.
    pub test_metadata: TestMetadata,
    /// Free-form tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    /// Testbed inventory.
    pub testbed_components: Vec<TestbedComponent>,
    /// Hosting lab.
    pub test_lab: TestLab,
    /// Specifications tested against.
    pub test_specifications: Vec<TestSpecification>,
    /// Result tree.
    pub test_results: Vec<ResultItem>,
    /// Report-level notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<TestNote>>,
}

impl TestResultsSummary {
    /// Returns the campaign identifier the document is keyed by.
    #[must_use]
    pub const fn test_id(&self) -> &TestId {
        &self.test_metadata.test_id
    }

    /// Counts the test cases in the whole result tree.
    #[must_use]
    pub fn case_count(&self) -> usize {
        self.test_results.iter().map(ResultItem::case_count).sum()
    }
}

impl Entity for TestResultsSummary {
    const NAME: &'static str = "TestResultsSummary";
}
