// crates/spec-converter-ingest/src/lib.rs
// ============================================================================
// Module: Spec Converter Ingest Library
// Description: Tabular ingestion for the test results converter.
// Purpose: Consolidate extracted table fragments and assemble configuration entities.
// Dependencies: crate::{assembler, columns, consolidate, csv_source, extract, geolocation, table}
// ============================================================================

//! ## Overview
//! Two ingestion paths feed the report model:
//!
//! - Extracted documents: a [`TableExtractor`] yields raw fragments that the
//!   consolidator merges into one normalized record set, ready for schema
//!   mapping.
//! - Scenario tables: cell and UE scenario CSV files plus per-scale geolocation
//!   side files are assembled directly into configuration entities, with no
//!   model in the loop.
//!
//! Every file location is passed in explicitly; nothing here reads the process
//! working directory.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod assembler;
pub mod columns;
pub mod consolidate;
pub mod csv_source;
pub mod extract;
pub mod geolocation;
pub mod table;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use assembler::AssembledConfiguration;
pub use assembler::AssemblyError;
pub use assembler::ConfigurationAssembler;
pub use columns::normalize_column_name;
pub use consolidate::ConsolidationError;
pub use consolidate::ConsolidationWarning;
pub use consolidate::consolidate;
pub use csv_source::ScenarioTable;
pub use csv_source::load_scenario_csv;
pub use extract::ExtractionError;
pub use extract::FragmentFileExtractor;
pub use extract::TableExtractor;
pub use geolocation::geolocation_file_name;
pub use geolocation::load_geolocation;
pub use table::ColumnName;
pub use table::ConsolidatedTable;
pub use table::NormalizedRecord;
pub use table::TableFragment;
