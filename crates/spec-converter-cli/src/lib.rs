// crates/spec-converter-cli/src/lib.rs
// ============================================================================
// Module: Spec Converter CLI Library
// Description: Batch pipeline and report assembly behind the CLI binary.
// Purpose: Keep orchestration testable apart from argument parsing and output.
// Dependencies: serde, serde_json, spec-converter-*, thiserror, tracing
// ============================================================================

//! ## Overview
//! [`pipeline`] runs sources through extraction, consolidation, mapping and
//! model validation, recording one outcome per source and per record so no
//! single failure stops the batch. [`assemble`] combines a report template
//! with assembled configuration into a validated report.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod assemble;
pub mod pipeline;

pub use assemble::AssembleError;
pub use assemble::assemble_report;
pub use pipeline::BatchPipeline;
pub use pipeline::BatchReport;
pub use pipeline::RecordOutcome;
pub use pipeline::RecordStatus;
pub use pipeline::SourceFailure;
pub use pipeline::SourceOutcome;
pub use pipeline::SourceStatus;
pub use pipeline::consolidate_source;
pub use pipeline::discover_sources;
