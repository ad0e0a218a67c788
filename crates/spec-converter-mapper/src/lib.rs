// crates/spec-converter-mapper/src/lib.rs
// ============================================================================
// Module: Spec Converter Mapper
// Description: Maps normalized records onto a target field schema.
// Purpose: Turn one table row into one field-mapped object via a completion service.
// Dependencies: jsonschema, reqwest, serde_json, thiserror, tracing, url
// ============================================================================

//! ## Overview
//! [`SchemaMapper`] embeds a record and a [`TargetSchema`] in a single prompt,
//! sends it through a [`CompletionClient`], strips code fences from the reply
//! and parses it as a JSON object. The mapper checks well-formedness only;
//! conformance to the report model is enforced downstream.
//!
//! [`OpenAiCompletionClient`] is the bundled client for OpenAI-compatible
//! streaming chat endpoints.
//!
//! Security posture: completion responses are untrusted input; see
//! [`mapper`] for parsing limits.

pub mod completion;
pub mod mapper;
pub mod openai;
pub mod prompt;
pub mod schema;

pub use completion::CompletionClient;
pub use completion::CompletionError;
pub use mapper::MappingError;
pub use mapper::SchemaMapper;
pub use mapper::strip_code_fence;
pub use openai::OpenAiCompletionClient;
pub use openai::OpenAiSettings;
pub use openai::accumulate_stream;
pub use prompt::build_prompt;
pub use schema::SchemaLoadError;
pub use schema::TargetSchema;
