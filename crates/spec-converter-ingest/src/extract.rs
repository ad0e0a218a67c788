// crates/spec-converter-ingest/src/extract.rs
// ============================================================================
// Module: Table Extraction Boundary
// Description: Interface to table extractors plus a file-backed implementation.
// Purpose: Isolate document rendering from consolidation.
// Dependencies: csv, serde_json, thiserror, crate::table
// ============================================================================

//! ## Overview
//! Rendering documents into tables is an external concern. [`TableExtractor`]
//! is the seam; [`FragmentFileExtractor`] reads tables another tool already
//! extracted:
//!
//! - `.json`: an array of fragments, each an array of rows, each an array of
//!   cells (strings, numbers, booleans, or `null` for an empty cell).
//! - `.csv`: one fragment; the header row is kept as the first row.
//!
//! Security posture: source files are untrusted; reads are size-capped and
//! malformed content is an [`ExtractionError`], never a panic.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::table::TableFragment;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default cap on a single source file.
pub const DEFAULT_MAX_SOURCE_BYTES: u64 = 16 * 1024 * 1024;

// ============================================================================
// SECTION: Interface
// ============================================================================

/// Extraction failures for one source document.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Source could not be read.
    #[error("failed to read {path}: {message}")]
    Io {
        /// Source path.
        path: String,
        /// Underlying error.
        message: String,
    },
    /// Source exceeds the size cap.
    #[error("{path} exceeds size limit ({size} > {limit} bytes)")]
    TooLarge {
        /// Source path.
        path: String,
        /// Actual size.
        size: u64,
        /// Configured cap.
        limit: u64,
    },
    /// Source content is not in the expected layout.
    #[error("failed to parse {path}: {message}")]
    Malformed {
        /// Source path.
        path: String,
        /// Parser message.
        message: String,
    },
    /// Source kind is not handled by this extractor.
    #[error("unsupported source {path}")]
    Unsupported {
        /// Source path.
        path: String,
    },
}

/// Produces raw table fragments from a source document.
pub trait TableExtractor {
    /// Extracts every table of `source` in document order.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError`] when the source cannot be read or parsed.
    fn extract(&self, source: &Path) -> Result<Vec<TableFragment>, ExtractionError>;

    /// Returns true when this extractor handles `source`.
    fn accepts(&self, source: &Path) -> bool;
}

// ============================================================================
// SECTION: File Extractor
// ============================================================================

/// Reads pre-extracted fragment dumps and CSV exports.
#[derive(Debug, Clone)]
pub struct FragmentFileExtractor {
    /// Size cap per source.
    max_bytes: u64,
}

impl Default for FragmentFileExtractor {
    fn default() -> Self {
        Self { max_bytes: DEFAULT_MAX_SOURCE_BYTES }
    }
}

impl FragmentFileExtractor {
    /// Creates an extractor with a custom size cap.
    #[must_use]
    pub const fn with_max_bytes(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    /// Reads `source` after enforcing the size cap.
    fn read(&self, source: &Path) -> Result<Vec<u8>, ExtractionError> {
        let path = source.display().to_string();
        let size = fs::metadata(source)
            .map_err(|err| ExtractionError::Io { path: path.clone(), message: err.to_string() })?
            .len();
        if size > self.max_bytes {
            return Err(ExtractionError::TooLarge { path, size, limit: self.max_bytes });
        }
        fs::read(source).map_err(|err| ExtractionError::Io { path, message: err.to_string() })
    }
}

impl TableExtractor for FragmentFileExtractor {
    fn extract(&self, source: &Path) -> Result<Vec<TableFragment>, ExtractionError> {
        let path = source.display().to_string();
        match extension(source).as_deref() {
            Some("json") => parse_fragment_dump(&path, &self.read(source)?),
            Some("csv") => parse_csv_fragment(&path, &self.read(source)?).map(|f| vec![f]),
            _ => Err(ExtractionError::Unsupported { path }),
        }
    }

    fn accepts(&self, source: &Path) -> bool {
        matches!(extension(source).as_deref(), Some("json" | "csv"))
    }
}

/// Returns the lowercase file extension.
fn extension(source: &Path) -> Option<String> {
    source.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase)
}

/// Parses a JSON fragment dump.
fn parse_fragment_dump(path: &str, bytes: &[u8]) -> Result<Vec<TableFragment>, ExtractionError> {
    let malformed = |message: String| ExtractionError::Malformed { path: path.to_string(), message };
    let value: Value = serde_json::from_slice(bytes).map_err(|err| malformed(err.to_string()))?;
    let Value::Array(fragments) = value else {
        return Err(malformed("expected an array of fragments".to_string()));
    };
    fragments
        .iter()
        .enumerate()
        .map(|(index, fragment)| {
            let Value::Array(rows) = fragment else {
                return Err(malformed(format!("fragment {index} is not an array of rows")));
            };
            rows.iter()
                .enumerate()
                .map(|(row_index, row)| {
                    let Value::Array(cells) = row else {
                        return Err(malformed(format!(
                            "fragment {index} row {row_index} is not an array of cells"
                        )));
                    };
                    cells
                        .iter()
                        .map(|cell| {
                            cell_text(cell).ok_or_else(|| {
                                malformed(format!(
                                    "fragment {index} row {row_index} holds a nested value"
                                ))
                            })
                        })
                        .collect()
                })
                .collect::<Result<Vec<Vec<String>>, _>>()
                .map(TableFragment::new)
        })
        .collect()
}

/// Renders a scalar cell as text; nested values are rejected.
fn cell_text(cell: &Value) -> Option<String> {
    match cell {
        Value::Null => Some(String::new()),
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Parses a CSV export into a single fragment.
fn parse_csv_fragment(path: &str, bytes: &[u8]) -> Result<TableFragment, ExtractionError> {
    let mut reader = csv::ReaderBuilder::new().has_headers(false).flexible(true).from_reader(bytes);
    let rows = reader
        .records()
        .map(|record| {
            record.map(|record| record.iter().map(ToString::to_string).collect::<Vec<String>>())
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| ExtractionError::Malformed { path: path.to_string(), message: err.to_string() })?;
    Ok(TableFragment::new(rows))
}
