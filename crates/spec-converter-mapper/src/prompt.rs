// crates/spec-converter-mapper/src/prompt.rs
// ============================================================================
// Module: Mapping Prompt
// Description: Instruction text sent to the completion service.
// Purpose: Embed one record and the target schema in a single prompt.
// Dependencies: serde_json, crate::schema
// ============================================================================

//! ## Overview
//! The prompt asks for a strict key mapping onto schema properties, only for
//! properties the record supplies, returned as bare JSON.

use serde_json::Value;

use crate::schema::TargetSchema;

/// Builds the mapping prompt for one record.
#[must_use]
pub fn build_prompt(record: &Value, schema: &TargetSchema) -> String {
    format!(
        "You are a helpful assistant that transforms tabular data into JSON format based on a \
         provided JSON schema.\n\
         Here is the tabular data:\n{record}\n\
         And here is the JSON schema:\n{schema}\n\
         Instructions:\n\
         1. Map the table keys strictly to the JSON schema properties.\n\
         2. Only fill parameters in the JSON schema that have context provided by the tabular data.\n\
         3. Return the result as pure JSON. Do not include any additional text or explanations.",
        schema = schema.to_prompt_text(),
    )
}
