// crates/spec-converter-core/src/validation.rs
// ============================================================================
// Module: Report Validation
// Description: Schema-gated reading and writing of report entities.
// Purpose: Turn untrusted JSON into typed entities while collecting every violation.
// Dependencies: jsonschema, serde, serde_json, thiserror, crate::schema
// ============================================================================

//! ## Overview
//! Entities are read in two steps. The value is first checked against the
//! compiled report schema, collecting every error with the JSON pointer of the
//! offending instance. Only a value with no schema errors is then handed to the
//! derived `Deserialize` implementations, which build the typed entity.
//!
//! Security posture: report documents arrive from model output and operator
//! files; treat every field as untrusted until [`Entity::from_value`] accepts it.
//!
//! ## Invariants
//! - Every violation carries the JSON pointer of the offending instance.
//! - [`Entity::from_value`] only returns an entity when the schema accepts it.
//! - Schemas compile once per process and are shared by every caller.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use jsonschema::Draft;
use jsonschema::Validator;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::schema::ENTITY_NAMES;
use crate::schema::entity_schema;

// ============================================================================
// SECTION: Violations
// ============================================================================

/// Keyword recorded when the schema itself could not be compiled.
pub const SCHEMA_KEYWORD: &str = "$schema";

/// Keyword recorded when typed decoding fails after the schema accepted a value.
pub const DESERIALIZE_KEYWORD: &str = "deserialize";

/// Keyword recorded when a typed value cannot be rendered back to JSON.
pub const SERIALIZE_KEYWORD: &str = "serialize";

/// One validation failure located by its instance path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON pointer to the offending instance; empty for the document root.
    pub path: String,
    /// Schema keyword that failed (`required`, `maxLength`, `not`, ...).
    pub keyword: String,
    /// Human-readable description.
    pub message: String,
}

impl Violation {
    /// Builds a violation from a schema validation error.
    fn from_schema_error(error: &jsonschema::ValidationError<'_>) -> Self {
        let schema_path = error.schema_path().to_string();
        Self {
            path: error.instance_path().to_string(),
            keyword: failing_keyword(&schema_path),
            message: error.to_string(),
        }
    }

    /// Builds a violation at the document root.
    fn at_root(keyword: &str, message: String) -> Self {
        Self { path: String::new(), keyword: keyword.to_string(), message }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "/" } else { &self.path };
        write!(f, "{path}: {}", self.message)
    }
}

/// Returns the last keyword segment of a schema location.
///
/// Array indexes (`anyOf/1`, `required/0`) are skipped so the keyword itself
/// is reported.
fn failing_keyword(schema_path: &str) -> String {
    schema_path
        .rsplit('/')
        .find(|segment| !segment.is_empty() && !segment.bytes().all(|byte| byte.is_ascii_digit()))
        .unwrap_or(SCHEMA_KEYWORD)
        .to_string()
}

/// Aggregated validation failure for one entity.
///
/// # Invariants
/// - `violations` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{entity} failed validation: {}", join_violations(.violations))]
pub struct SchemaValidationError {
    /// Name of the entity that was being read.
    entity: &'static str,
    /// Every violation found.
    violations: Vec<Violation>,
}

impl SchemaValidationError {
    /// Builds an error carrying a single violation.
    fn single(entity: &'static str, violation: Violation) -> Self {
        Self { entity, violations: vec![violation] }
    }

    /// Returns the entity name.
    #[must_use]
    pub const fn entity(&self) -> &'static str {
        self.entity
    }

    /// Returns every violation found.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Returns true when `keyword` failed for the instance at `pointer`.
    #[must_use]
    pub fn has(&self, pointer: &str, keyword: &str) -> bool {
        self.violations.iter().any(|v| v.path == pointer && v.keyword == keyword)
    }

    /// Returns true when any violation points at `pointer`.
    #[must_use]
    pub fn touches(&self, pointer: &str) -> bool {
        self.violations.iter().any(|v| v.path == pointer)
    }

    /// Returns true when the object at `pointer` lacks the required `property`.
    #[must_use]
    pub fn is_missing(&self, pointer: &str, property: &str) -> bool {
        let quoted = format!("\"{property}\"");
        self.violations.iter().any(|v| {
            v.path == pointer && v.keyword == "required" && v.message.contains(&quoted)
        })
    }

    /// Returns true when the object at `pointer` carries the undeclared `property`.
    #[must_use]
    pub fn is_unexpected(&self, pointer: &str, property: &str) -> bool {
        let quoted = format!("'{property}'");
        self.violations.iter().any(|v| {
            v.path == pointer && v.keyword == "additionalProperties" && v.message.contains(&quoted)
        })
    }
}

/// Renders violations as a `; `-separated list.
fn join_violations(violations: &[Violation]) -> String {
    violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// Errors raised when reading or writing report JSON text.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Input is not syntactically valid JSON.
    #[error("report json is malformed: {0}")]
    Json(String),
    /// Input is valid JSON but violates the report model.
    #[error(transparent)]
    Validation(#[from] SchemaValidationError),
    /// Typed value could not be serialized.
    #[error("report serialization failed: {0}")]
    Serialize(String),
}

// ============================================================================
// SECTION: Compiled Schemas
// ============================================================================

/// Compiled per-entity validators, or the compile error for each entity.
static VALIDATORS: LazyLock<BTreeMap<&'static str, Result<Validator, String>>> =
    LazyLock::new(|| {
        ENTITY_NAMES.iter().map(|name| (*name, compile_schema(&entity_schema(name)))).collect()
    });

/// Compiles a Draft 2020-12 schema with format assertions enabled.
///
/// # Errors
///
/// Returns the compiler message when `schema` is not a valid schema.
pub fn compile_schema(schema: &Value) -> Result<Validator, String> {
    jsonschema::options()
        .with_draft(Draft::Draft202012)
        .should_validate_formats(true)
        .build(schema)
        .map_err(|err| format!("invalid schema: {err}"))
}

/// Checks `value` against the schema of `entity`, collecting every violation.
///
/// # Errors
///
/// Returns [`SchemaValidationError`] listing every violation found, or a
/// single root violation when no schema is registered for `entity`.
pub fn check_entity(entity: &'static str, value: &Value) -> Result<(), SchemaValidationError> {
    let validator = match VALIDATORS.get(entity) {
        Some(Ok(validator)) => validator,
        Some(Err(message)) => {
            return Err(SchemaValidationError::single(
                entity,
                Violation::at_root(SCHEMA_KEYWORD, message.clone()),
            ));
        }
        None => {
            return Err(SchemaValidationError::single(
                entity,
                Violation::at_root(SCHEMA_KEYWORD, format!("no schema registered for {entity}")),
            ));
        }
    };
    let violations: Vec<Violation> =
        validator.iter_errors(value).map(|error| Violation::from_schema_error(&error)).collect();
    if violations.is_empty() {
        Ok(())
    } else {
        Err(SchemaValidationError { entity, violations })
    }
}

// ============================================================================
// SECTION: Entity Trait
// ============================================================================

/// Typed report entity gated by its schema definition.
///
/// Derived `Deserialize` checks shape only. Use [`Entity::from_value`] or
/// [`Entity::from_json_str`] for input that must satisfy every model rule.
pub trait Entity: Sized + Serialize + DeserializeOwned {
    /// Entity name; also the key of its definition in the report schema.
    const NAME: &'static str;

    /// Builds the entity from an untrusted JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaValidationError`] listing every violation found.
    fn from_value(value: &Value) -> Result<Self, SchemaValidationError> {
        check_entity(Self::NAME, value)?;
        Self::deserialize(value).map_err(|err| {
            SchemaValidationError::single(
                Self::NAME,
                Violation::at_root(DESERIALIZE_KEYWORD, err.to_string()),
            )
        })
    }

    /// Builds the entity from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Json`] for malformed text and
    /// [`ReportError::Validation`] for model violations.
    fn from_json_str(input: &str) -> Result<Self, ReportError> {
        let value: Value =
            serde_json::from_str(input).map_err(|err| ReportError::Json(err.to_string()))?;
        Ok(Self::from_value(&value)?)
    }

    /// Serializes the entity to a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Serialize`] when a field cannot be rendered.
    fn to_json_value(&self) -> Result<Value, ReportError> {
        serde_json::to_value(self).map_err(|err| ReportError::Serialize(err.to_string()))
    }

    /// Serializes the entity to pretty-printed JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Serialize`] when a field cannot be rendered.
    fn to_json_string(&self) -> Result<String, ReportError> {
        serde_json::to_string_pretty(self).map_err(|err| ReportError::Serialize(err.to_string()))
    }

    /// Re-validates a programmatically built entity against the schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaValidationError`] listing every violation found.
    fn validate(&self) -> Result<(), SchemaValidationError> {
        let value = serde_json::to_value(self).map_err(|err| {
            SchemaValidationError::single(
                Self::NAME,
                Violation::at_root(SERIALIZE_KEYWORD, err.to_string()),
            )
        })?;
        check_entity(Self::NAME, &value)
    }
}

#[cfg(test)]
mod tests;
