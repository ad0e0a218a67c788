// crates/spec-converter-core/src/model/results.rs
// ============================================================================
// Module: Result Tree
// Description: Measurements, metrics, test cases, and recursive test groups.
// Purpose: Model the hierarchical results section of a report.
// Dependencies: serde, serde_json, crate::{enums, identifiers, timestamp, validation}
// ============================================================================

//! ## Overview
//! Results form a tree: a [`TestGroup`] holds further groups or [`TestCase`]
//! leaves through [`ResultItem`]. The wire format carries no discriminator,
//! so an item is a group when it has `groupItems` and a case when it has
//! `metrics`. The schema routes each item to the matching definition; the
//! untagged `Deserialize` then resolves it because both entities reject keys
//! they do not declare.
//!
//! ## Invariants
//! - A result item never declares both `groupItems` and `metrics`.
//! - [`Metric::result`] is never [`ResultType::Warn`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use super::descriptive::Artifact;
use super::descriptive::Contact;
use super::descriptive::DecoratedLink;
use super::descriptive::TestNote;
use crate::enums::ResultType;
use crate::enums::TestStatus;
use crate::enums::Units;
use crate::identifiers::ItemNumber;
use crate::timestamp::Timestamp;
use crate::validation::Entity;

// ============================================================================
// SECTION: Measurement
// ============================================================================

/// Recorded values of one measured quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Measurement {
    /// Quantity name.
    pub name: String,
    /// Quantity description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Observed values; any JSON value is accepted.
    pub values: Vec<Value>,
    /// Unit of every value.
    pub units: Units,
    /// Supporting references.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<Vec<DecoratedLink>>,
}

impl Entity for Measurement {
    const NAME: &'static str = "Measurement";
}

// ============================================================================
// SECTION: Metric
// ============================================================================

/// Pass criterion evaluated from one or more measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Metric {
    /// Criterion description.
    pub description: String,
    /// Measurements the criterion is evaluated on.
    pub measurements: Vec<Measurement>,
    /// Requirement level.
    pub status: TestStatus,
    /// Outcome; never `WARN`.
    pub result: ResultType,
}

impl Entity for Metric {
    const NAME: &'static str = "Metric";
}

// ============================================================================
// SECTION: Test Case
// ============================================================================

/// Leaf of the result tree: one executed (or skipped) test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TestCase {
    /// Outline number.
    pub number: ItemNumber,
    /// Test name.
    pub name: String,
    /// Test description.
    pub description: String,
    /// Outcome.
    pub result: ResultType,
    /// Requirement level.
    pub status: TestStatus,
    /// Execution start.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Timestamp>,
    /// Execution end.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_date: Option<Timestamp>,
    /// Pass criteria.
    pub metrics: Vec<Metric>,
    /// Produced artifacts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<Vec<Artifact>>,
    /// Related links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<DecoratedLink>>,
    /// Measurements not tied to a metric.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurements: Option<Vec<Measurement>>,
    /// Free-text notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<TestNote>>,
    /// People involved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacts: Option<Vec<Contact>>,
}

impl Entity for TestCase {
    const NAME: &'static str = "TestCase";
}

// ============================================================================
// SECTION: Test Group
// ============================================================================

/// Interior node of the result tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TestGroup {
    /// Outline number.
    pub number: ItemNumber,
    /// Group name.
    pub name: String,
    /// Group description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Child groups and cases, in outline order.
    pub group_items: Vec<ResultItem>,
}

impl Entity for TestGroup {
    const NAME: &'static str = "TestGroup";
}

// ============================================================================
// SECTION: Result Item
// ============================================================================

/// Node of the result tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultItem {
    /// Group of further items.
    Group(TestGroup),
    /// Single test case.
    Case(TestCase),
}

impl ResultItem {
    /// Returns the outline number of the item.
    #[must_use]
    pub const fn number(&self) -> &ItemNumber {
        match self {
            Self::Group(group) => &group.number,
            Self::Case(case) => &case.number,
        }
    }

    /// Counts the test cases beneath this item, including itself.
    #[must_use]
    pub fn case_count(&self) -> usize {
        match self {
            Self::Group(group) => group.group_items.iter().map(Self::case_count).sum(),
            Self::Case(_) => 1,
        }
    }
}

impl Entity for ResultItem {
    const NAME: &'static str = "ResultItem";
}
