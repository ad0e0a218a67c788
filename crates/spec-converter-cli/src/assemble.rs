// crates/spec-converter-cli/src/assemble.rs
// ============================================================================
// Module: Report Assembly
// Description: Combines a report template with assembled configuration.
// Purpose: Produce one validated TestResultsSummary ready for submission.
// Dependencies: serde_json, spec-converter-core, spec-converter-ingest, thiserror, tracing
// ============================================================================

//! ## Overview
//! The template is a complete report except for the scenario-derived parts
//! of `testMetadata`. Assembled `configurationParameters` and
//! `additionalContext` replace whatever the template holds there, and the
//! `testId` can be replaced by a freshly generated one. The combined document
//! goes through full model validation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;
use spec_converter_core::Entity;
use spec_converter_core::ReportError;
use spec_converter_core::TestId;
use spec_converter_core::TestResultsSummary;
use spec_converter_ingest::AssembledConfiguration;
use thiserror::Error;
use tracing::warn;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failures while assembling a report.
#[derive(Debug, Error)]
pub enum AssembleError {
    /// Template is not shaped like a report.
    #[error("report template {0}")]
    Template(&'static str),
    /// Combined document failed to serialize or validate.
    #[error(transparent)]
    Report(#[from] ReportError),
}

// ============================================================================
// SECTION: Assembly
// ============================================================================

/// Builds a validated report from `template` and `assembled` configuration.
///
/// Empty assembled lists leave the corresponding key absent.
///
/// # Errors
///
/// Returns [`AssembleError::Template`] when the template or its
/// `testMetadata` is not an object and [`AssembleError::Report`] when the
/// combined document is invalid.
pub fn assemble_report(
    template: &Value,
    assembled: &AssembledConfiguration,
    test_id: Option<&TestId>,
) -> Result<TestResultsSummary, AssembleError> {
    let mut document = template.clone();
    let root = document.as_object_mut().ok_or(AssembleError::Template("must be a json object"))?;
    let metadata = root
        .get_mut("testMetadata")
        .and_then(Value::as_object_mut)
        .ok_or(AssembleError::Template("must hold a testMetadata object"))?;

    replace_list(metadata, "configurationParameters", &assembled.configuration_parameters)?;
    replace_list(metadata, "additionalContext", &assembled.additional_context)?;
    if let Some(test_id) = test_id {
        metadata.insert("testId".to_string(), Value::String(test_id.to_string()));
    }
    Ok(TestResultsSummary::from_value(&document).map_err(ReportError::from)?)
}

/// Replaces `key` with the serialized entities, or removes it when empty.
fn replace_list<T: Entity>(
    metadata: &mut Map<String, Value>,
    key: &'static str,
    entities: &[T],
) -> Result<(), ReportError> {
    let previous = if entities.is_empty() {
        metadata.remove(key)
    } else {
        let values = entities.iter().map(Entity::to_json_value).collect::<Result<Vec<_>, _>>()?;
        metadata.insert(key.to_string(), Value::Array(values))
    };
    if previous.is_some() {
        warn!(key, "replacing template value with assembled configuration");
    }
    Ok(())
}
