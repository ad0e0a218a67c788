// crates/spec-converter-core/src/model/descriptive.rs
// ============================================================================
// Module: Descriptive Records
// Description: Contacts, links, artifacts, and notes attached across the report.
// Purpose: Leaf entities shared by metadata, labs, components, and results.
// Dependencies: serde, url, crate::validation
// ============================================================================

//! ## Overview
//! Leaf records with no nested entities. Each carries bounded text and, for
//! contacts and links, an email address or absolute URL checked by the schema's
//! `format` assertions.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use url::Url;

use crate::validation::Entity;

// ============================================================================
// SECTION: Contact
// ============================================================================

/// Person responsible for a lab, component, or campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Contact {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Employer or affiliation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    /// Email address.
    pub email: String,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Entity for Contact {
    const NAME: &'static str = "Contact";
}

// ============================================================================
// SECTION: Decorated Link
// ============================================================================

/// Named hyperlink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DecoratedLink {
    /// Link label.
    pub display_name: String,
    /// Longer description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Absolute target URL.
    pub url: Url,
}

impl Entity for DecoratedLink {
    const NAME: &'static str = "DecoratedLink";
}

// ============================================================================
// SECTION: Artifact
// ============================================================================

/// File produced or consumed by a test, referenced by path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Artifact {
    /// Artifact name.
    pub name: String,
    /// Relative or absolute location.
    pub path: String,
    /// What the artifact contains.
    pub description: String,
}

impl Entity for Artifact {
    const NAME: &'static str = "Artifact";
}

// ============================================================================
// SECTION: Test Note
// ============================================================================

/// Titled free-text note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestNote {
    /// Note title.
    pub title: String,
    /// Note body.
    pub body: String,
}

impl Entity for TestNote {
    const NAME: &'static str = "TestNote";
}
