// crates/spec-converter-cli/src/pipeline.rs
// ============================================================================
// Module: Batch Pipeline
// Description: Per-source and per-record processing with outcome reporting.
// Purpose: Run extraction, consolidation, mapping and validation over a batch.
// Dependencies: serde, serde_json, spec-converter-*, thiserror, tracing
// ============================================================================

//! ## Overview
//! Sources are processed one at a time, records within a source one at a
//! time. Extraction failures and sources without tables are skipped with a
//! warning; mapping failures and model rejections skip only that record.
//! The batch always completes and reports every outcome.
//!
//! ## Invariants
//! - Record outcomes follow consolidated row order.
//! - One completion request per record.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;
use spec_converter_core::ConfigurationParameters;
use spec_converter_core::Entity;
use spec_converter_ingest::ConsolidatedTable;
use spec_converter_ingest::ConsolidationError;
use spec_converter_ingest::ExtractionError;
use spec_converter_ingest::TableExtractor;
use spec_converter_ingest::consolidate;
use spec_converter_mapper::CompletionClient;
use spec_converter_mapper::MappingError;
use spec_converter_mapper::SchemaMapper;
use thiserror::Error;
use tracing::info;
use tracing::warn;

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Why a source produced no records.
#[derive(Debug, Error)]
pub enum SourceFailure {
    /// Source could not be read or parsed.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    /// Source holds no usable table.
    #[error(transparent)]
    NoTables(#[from] ConsolidationError),
}

/// Result of one batch run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// One outcome per source, in input order.
    pub sources: Vec<SourceOutcome>,
}

impl BatchReport {
    /// Returns every successfully mapped configuration in batch order.
    #[must_use]
    pub fn mapped(&self) -> Vec<&ConfigurationParameters> {
        self.sources
            .iter()
            .filter_map(|source| match &source.status {
                SourceStatus::Processed { records, .. } => Some(records),
                SourceStatus::Skipped { .. } => None,
            })
            .flatten()
            .filter_map(|record| match &record.status {
                RecordStatus::Mapped { configuration } => Some(configuration),
                _ => None,
            })
            .collect()
    }

    /// Returns true when the batch had sources and every one was skipped.
    #[must_use]
    pub fn all_sources_skipped(&self) -> bool {
        !self.sources.is_empty()
            && self
                .sources
                .iter()
                .all(|source| matches!(source.status, SourceStatus::Skipped { .. }))
    }

    /// Counts records that did not map to a valid configuration.
    #[must_use]
    pub fn failed_records(&self) -> usize {
        self.sources
            .iter()
            .filter_map(|source| match &source.status {
                SourceStatus::Processed { records, .. } => Some(records),
                SourceStatus::Skipped { .. } => None,
            })
            .flatten()
            .filter(|record| !matches!(record.status, RecordStatus::Mapped { .. }))
            .count()
    }
}

/// Outcome for one source document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceOutcome {
    /// Source path.
    pub source: PathBuf,
    /// What happened to it.
    #[serde(flatten)]
    pub status: SourceStatus,
}

/// Source-level status.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SourceStatus {
    /// Source was consolidated and its records mapped.
    #[serde(rename_all = "camelCase")]
    Processed {
        /// Canonical columns.
        columns: Vec<String>,
        /// One outcome per normalized record.
        records: Vec<RecordOutcome>,
        /// Fragments routed to the fallback channel.
        fallback_tables: usize,
        /// Header mismatch warnings.
        warnings: Vec<String>,
        /// Rows discarded for missing cells.
        dropped_rows: usize,
    },
    /// Source was skipped.
    Skipped {
        /// Failure description.
        reason: String,
    },
}

/// Outcome for one normalized record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordOutcome {
    /// Zero-based record index within the source.
    pub index: usize,
    /// What happened to it.
    #[serde(flatten)]
    pub status: RecordStatus,
}

/// Record-level status.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum RecordStatus {
    /// Mapped and accepted by the model.
    Mapped {
        /// Validated configuration.
        configuration: ConfigurationParameters,
    },
    /// Completion request failed.
    CompletionFailed {
        /// Failure description.
        reason: String,
    },
    /// Response was not a JSON object.
    ParseFailed {
        /// Failure description.
        reason: String,
    },
    /// Mapped object violated the model.
    Rejected {
        /// Every violation found.
        violations: Vec<String>,
    },
}

// ============================================================================
// SECTION: Consolidation
// ============================================================================

/// Extracts and consolidates one source.
///
/// # Errors
///
/// Returns [`SourceFailure`] when extraction fails or no table is found.
pub fn consolidate_source<E: TableExtractor>(
    extractor: &E,
    source: &Path,
) -> Result<ConsolidatedTable, SourceFailure> {
    let fragments = extractor.extract(source)?;
    let name = source.file_name().map_or_else(
        || source.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    );
    Ok(consolidate(&name, &fragments)?)
}

/// Lists the sources in `dir` that `extractor` accepts, sorted by path.
///
/// # Errors
///
/// Returns an I/O error when the directory cannot be listed.
pub fn discover_sources<E: TableExtractor>(extractor: &E, dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut sources = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && extractor.accepts(&path) {
            sources.push(path);
        }
    }
    sources.sort();
    Ok(sources)
}

// ============================================================================
// SECTION: Pipeline
// ============================================================================

/// Extraction, consolidation, mapping and validation over a batch of sources.
#[derive(Debug)]
pub struct BatchPipeline<E, C> {
    /// Table extractor.
    extractor: E,
    /// Record mapper.
    mapper: SchemaMapper<C>,
}

impl<E: TableExtractor, C: CompletionClient> BatchPipeline<E, C> {
    /// Creates a pipeline.
    #[must_use]
    pub const fn new(extractor: E, mapper: SchemaMapper<C>) -> Self {
        Self { extractor, mapper }
    }

    /// Processes every source in order.
    #[must_use]
    pub fn run(&self, sources: &[PathBuf]) -> BatchReport {
        let report = BatchReport {
            sources: sources.iter().map(|source| self.process_source(source)).collect(),
        };
        info!(
            sources = report.sources.len(),
            mapped = report.mapped().len(),
            failed_records = report.failed_records(),
            "batch finished"
        );
        report
    }

    /// Processes one source.
    fn process_source(&self, source: &Path) -> SourceOutcome {
        let table = match consolidate_source(&self.extractor, source) {
            Ok(table) => table,
            Err(err) => {
                warn!(source = %source.display(), error = %err, "skipping source");
                return SourceOutcome {
                    source: source.to_path_buf(),
                    status: SourceStatus::Skipped { reason: err.to_string() },
                };
            }
        };
        let records = table
            .records()
            .iter()
            .enumerate()
            .map(|(index, record)| RecordOutcome {
                index,
                status: self.process_record(source, index, &record.to_json()),
            })
            .collect();
        SourceOutcome {
            source: source.to_path_buf(),
            status: SourceStatus::Processed {
                columns: table.columns.clone(),
                records,
                fallback_tables: table.fallback.len(),
                warnings: table.warnings.iter().map(ToString::to_string).collect(),
                dropped_rows: table.dropped_rows,
            },
        }
    }

    /// Maps and validates one record.
    fn process_record(&self, source: &Path, index: usize, record: &Value) -> RecordStatus {
        let mapped = match self.mapper.map_record(record) {
            Ok(mapped) => mapped,
            Err(MappingError::Completion(err)) => {
                warn!(source = %source.display(), index, error = %err, "completion failed");
                return RecordStatus::CompletionFailed { reason: err.to_string() };
            }
            Err(err @ MappingError::Parse { .. }) => {
                warn!(source = %source.display(), index, error = %err, "unparseable mapping");
                return RecordStatus::ParseFailed { reason: err.to_string() };
            }
        };
        match ConfigurationParameters::from_value(&Value::Object(mapped)) {
            Ok(configuration) => RecordStatus::Mapped { configuration },
            Err(err) => {
                warn!(source = %source.display(), index, error = %err, "mapped record rejected");
                RecordStatus::Rejected {
                    violations: err.violations().iter().map(ToString::to_string).collect(),
                }
            }
        }
    }
}
