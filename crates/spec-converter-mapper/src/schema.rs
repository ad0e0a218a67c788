// crates/spec-converter-mapper/src/schema.rs
// ============================================================================
// Module: Target Schema
// Description: Loads the JSON Schema that mapped records are shaped after.
// Purpose: Provide prompt text and declared property names to the mapper.
// Dependencies: jsonschema, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The target schema is an external JSON Schema document describing one
//! entity (for example `ConfigurationParameters`). It is read once per run,
//! compiled to reject documents that are not valid schemas, and never mutated.
//!
//! ## Invariants
//! - A loaded schema declares at least one top-level property.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use jsonschema::Draft;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Cap on the schema file size.
pub const MAX_SCHEMA_BYTES: u64 = 1024 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failures while loading a target schema.
#[derive(Debug, Error)]
pub enum SchemaLoadError {
    /// Schema file could not be read.
    #[error("failed to read schema {path}: {message}")]
    Io {
        /// File path.
        path: String,
        /// Underlying error.
        message: String,
    },
    /// Schema file exceeds [`MAX_SCHEMA_BYTES`].
    #[error("schema {path} exceeds size limit ({size} bytes)")]
    TooLarge {
        /// File path.
        path: String,
        /// Actual size.
        size: u64,
    },
    /// Schema file is not JSON.
    #[error("schema is not valid json: {0}")]
    Json(String),
    /// Schema document does not compile.
    #[error("schema is not a valid json schema: {0}")]
    Invalid(String),
    /// Schema declares no top-level properties.
    #[error("schema declares no properties")]
    NoProperties,
}

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Loaded target field schema.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetSchema {
    /// Schema document.
    document: Value,
    /// Top-level property names, sorted.
    properties: Vec<String>,
}

impl TargetSchema {
    /// Loads and checks a schema file.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaLoadError`] when the file is unreadable, oversized,
    /// not JSON, not a JSON Schema, or declares no properties.
    pub fn load(path: &Path) -> Result<Self, SchemaLoadError> {
        let display = path.display().to_string();
        let size = fs::metadata(path)
            .map_err(|err| SchemaLoadError::Io { path: display.clone(), message: err.to_string() })?
            .len();
        if size > MAX_SCHEMA_BYTES {
            return Err(SchemaLoadError::TooLarge { path: display, size });
        }
        let bytes = fs::read(path)
            .map_err(|err| SchemaLoadError::Io { path: display, message: err.to_string() })?;
        let document: Value =
            serde_json::from_slice(&bytes).map_err(|err| SchemaLoadError::Json(err.to_string()))?;
        Self::from_value(document)
    }

    /// Checks an in-memory schema document.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaLoadError::Invalid`] when the document does not compile
    /// and [`SchemaLoadError::NoProperties`] when it declares no properties.
    pub fn from_value(document: Value) -> Result<Self, SchemaLoadError> {
        jsonschema::options()
            .with_draft(Draft::Draft202012)
            .build(&document)
            .map_err(|err| SchemaLoadError::Invalid(err.to_string()))?;
        let properties: Vec<String> = document
            .get("properties")
            .and_then(Value::as_object)
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default();
        if properties.is_empty() {
            return Err(SchemaLoadError::NoProperties);
        }
        Ok(Self { document, properties })
    }

    /// Returns the schema document.
    #[must_use]
    pub const fn document(&self) -> &Value {
        &self.document
    }

    /// Returns the declared top-level property names.
    #[must_use]
    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    /// Returns true when `name` is a declared top-level property.
    #[must_use]
    pub fn declares(&self, name: &str) -> bool {
        self.properties.iter().any(|property| property == name)
    }

    /// Renders the schema as compact JSON for prompt embedding.
    #[must_use]
    pub fn to_prompt_text(&self) -> String {
        self.document.to_string()
    }
}
