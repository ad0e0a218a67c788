// crates/spec-converter-mapper/src/mapper.rs
// ============================================================================
// Module: Schema Mapper
// Description: One-request-per-record mapping onto a target schema.
// Purpose: Produce a well-formed field-mapped object from a normalized record.
// Dependencies: serde_json, thiserror, tracing, crate::{completion, prompt, schema}
// ============================================================================

//! ## Overview
//! [`SchemaMapper::map_record`] sends exactly one prompt, strips the code
//! fence the service usually wraps its answer in, and parses the remainder.
//! Only JSON objects are accepted. Keys the schema does not declare are kept
//! and logged; the report model rejects them later.
//!
//! ## Invariants
//! - No retries; a failed record is reported once and the caller moves on.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::completion::CompletionClient;
use crate::completion::CompletionError;
use crate::prompt::build_prompt;
use crate::schema::TargetSchema;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Longest response excerpt kept in [`MappingError::Parse`].
const EXCERPT_CHARS: usize = 200;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failures while mapping one record.
#[derive(Debug, Error)]
pub enum MappingError {
    /// Completion request failed.
    #[error(transparent)]
    Completion(#[from] CompletionError),
    /// Response is not a JSON object.
    #[error("completion response is not a json object: {message} (response: {excerpt:?})")]
    Parse {
        /// Parser message.
        message: String,
        /// Leading part of the cleaned response.
        excerpt: String,
    },
}

// ============================================================================
// SECTION: Mapper
// ============================================================================

/// Maps records onto a target schema through a completion client.
#[derive(Debug)]
pub struct SchemaMapper<C> {
    /// Completion service.
    client: C,
    /// Target schema embedded in every prompt.
    schema: TargetSchema,
}

impl<C: CompletionClient> SchemaMapper<C> {
    /// Creates a mapper.
    #[must_use]
    pub const fn new(client: C, schema: TargetSchema) -> Self {
        Self { client, schema }
    }

    /// Returns the target schema.
    #[must_use]
    pub const fn schema(&self) -> &TargetSchema {
        &self.schema
    }

    /// Maps one flat record.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::Completion`] when the request fails and
    /// [`MappingError::Parse`] when the response is not a JSON object.
    pub fn map_record(&self, record: &Value) -> Result<Map<String, Value>, MappingError> {
        let prompt = build_prompt(record, &self.schema);
        let response = self.client.complete(&prompt)?;
        let mapped = parse_response(&response)?;
        let undeclared: Vec<&str> =
            mapped.keys().map(String::as_str).filter(|key| !self.schema.declares(key)).collect();
        if !undeclared.is_empty() {
            debug!(?undeclared, "mapped record carries undeclared keys");
        }
        Ok(mapped)
    }
}

/// Removes a surrounding code fence and whitespace.
///
/// Handles a leading ` ```json ` or bare ` ``` ` marker and a trailing ` ``` `.
#[must_use]
pub fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Parses a cleaned response as a JSON object.
fn parse_response(response: &str) -> Result<Map<String, Value>, MappingError> {
    let cleaned = strip_code_fence(response);
    let parse_error = |message: String| MappingError::Parse {
        message,
        excerpt: cleaned.chars().take(EXCERPT_CHARS).collect(),
    };
    match serde_json::from_str::<Value>(cleaned) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(parse_error(format!("expected an object, found {}", kind_of(&other)))),
        Err(err) => Err(parse_error(err.to_string())),
    }
}

/// Names the JSON kind of a value.
const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
