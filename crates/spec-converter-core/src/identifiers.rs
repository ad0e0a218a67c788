// crates/spec-converter-core/src/identifiers.rs
// ============================================================================
// Module: Report Identifiers
// Description: Validated identifiers used by the test results report.
// Purpose: Keep identifier syntax checks in one place with stable string forms.
// Dependencies: regex, serde, thiserror, uuid
// ============================================================================

//! ## Overview
//! Identifiers serialize as plain strings. Unlike free text fields, each one
//! is validated on construction, so holding a value is proof of its syntax.
//! The report schema reuses the pattern constants declared here.
//!
//! ## Invariants
//! - [`TestId`] is either a hyphenated UUID or a lab-assigned short code.
//! - [`ItemNumber`] is a dotted sequence of decimal components.
//! - [`Tag`] is lowercase alphanumeric with hyphens.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// SECTION: Patterns
// ============================================================================

/// Lab-assigned test identifier: a 3-4 character prefix, a 20-39 year, and four digits.
pub const LAB_TEST_ID_PATTERN: &str = r"^[A-Za-z0-9]{3,4}([23][0-9]){1}[0-9]{4}$";

/// Shortest lab-assigned test identifier.
pub const LAB_TEST_ID_MIN_LENGTH: usize = 9;

/// Longest lab-assigned test identifier.
pub const LAB_TEST_ID_MAX_LENGTH: usize = 10;

/// Dotted item number such as `1.2.10`.
pub const ITEM_NUMBER_PATTERN: &str = r"^([0-9]+)([.][0-9]+)*$";

/// Longest item number.
pub const ITEM_NUMBER_MAX_LENGTH: usize = 32;

/// Report tag alphabet.
pub const TAG_PATTERN: &str = r"^[a-z0-9-]+$";

/// Longest tag.
pub const TAG_MAX_LENGTH: usize = 255;

/// Length of a hyphenated UUID.
const UUID_TEXT_LENGTH: usize = 36;

/// Compiled [`LAB_TEST_ID_PATTERN`].
static LAB_TEST_ID_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(LAB_TEST_ID_PATTERN).ok());

/// Compiled [`ITEM_NUMBER_PATTERN`].
static ITEM_NUMBER_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(ITEM_NUMBER_PATTERN).ok());

/// Compiled [`TAG_PATTERN`].
static TAG_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(TAG_PATTERN).ok());

/// Returns true when `value` fits `max` characters and matches `regex`.
///
/// A pattern that failed to compile matches nothing.
fn conforms(value: &str, min: usize, max: usize, regex: &LazyLock<Option<Regex>>) -> bool {
    let length = value.chars().count();
    (min ..= max).contains(&length) && regex.as_ref().is_some_and(|regex| regex.is_match(value))
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Identifier text that does not satisfy its syntax.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} {value:?}: {expected}")]
pub struct IdentifierError {
    /// Identifier kind (`test id`, `item number`, `tag`).
    kind: &'static str,
    /// Rejected text.
    value: String,
    /// Description of the accepted syntax.
    expected: &'static str,
}

impl IdentifierError {
    /// Returns the identifier kind that was being parsed.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        self.kind
    }

    /// Returns the rejected text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

// ============================================================================
// SECTION: Test Identifier
// ============================================================================

/// Identifier of one test campaign.
///
/// # Invariants
/// - Parses as a hyphenated UUID, or matches the lab-assigned short code
///   pattern with a length of 9 or 10 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TestId(String);

impl TestId {
    /// Parses a test identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError`] when `value` is neither a UUID nor a lab code.
    pub fn parse(value: &str) -> Result<Self, IdentifierError> {
        let is_uuid = value.len() == UUID_TEXT_LENGTH && Uuid::parse_str(value).is_ok();
        let is_lab_code = conforms(
            value,
            LAB_TEST_ID_MIN_LENGTH,
            LAB_TEST_ID_MAX_LENGTH,
            &LAB_TEST_ID_REGEX,
        );
        if is_uuid || is_lab_code {
            Ok(Self(value.to_string()))
        } else {
            Err(IdentifierError {
                kind: "test id",
                value: value.to_string(),
                expected: "a UUID or a lab code such as ORAN250001",
            })
        }
    }

    /// Generates a fresh random UUID identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TestId {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TestId> for String {
    fn from(value: TestId) -> Self {
        value.0
    }
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Item Number
// ============================================================================

/// Outline number of a test group or test case (`1`, `2.3`, `4.1.12`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemNumber(String);

impl ItemNumber {
    /// Parses an item number.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError`] when `value` is not a dotted decimal of at
    /// most 32 characters.
    pub fn parse(value: &str) -> Result<Self, IdentifierError> {
        if conforms(value, 1, ITEM_NUMBER_MAX_LENGTH, &ITEM_NUMBER_REGEX) {
            Ok(Self(value.to_string()))
        } else {
            Err(IdentifierError {
                kind: "item number",
                value: value.to_string(),
                expected: "dotted decimal such as 4.1.12",
            })
        }
    }

    /// Returns the number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ItemNumber {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ItemNumber> for String {
    fn from(value: ItemNumber) -> Self {
        value.0
    }
}

impl fmt::Display for ItemNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Tag
// ============================================================================

/// Free-form report tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tag(String);

impl Tag {
    /// Parses a tag.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError`] when `value` is not lowercase alphanumeric
    /// with hyphens.
    pub fn parse(value: &str) -> Result<Self, IdentifierError> {
        if conforms(value, 1, TAG_MAX_LENGTH, &TAG_REGEX) {
            Ok(Self(value.to_string()))
        } else {
            Err(IdentifierError {
                kind: "tag",
                value: value.to_string(),
                expected: "lowercase letters, digits, and hyphens",
            })
        }
    }

    /// Returns the tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Tag {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Tag> for String {
    fn from(value: Tag) -> Self {
        value.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
