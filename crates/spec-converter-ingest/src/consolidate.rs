// crates/spec-converter-ingest/src/consolidate.rs
// ============================================================================
// Module: Table Consolidation
// Description: Merges table fragments split across extraction boundaries.
// Purpose: Produce one normalized record set per source document.
// Dependencies: thiserror, tracing, crate::table
// ============================================================================

//! ## Overview
//! Extraction splits long tables at page boundaries and may or may not repeat
//! the header on each piece. Consolidation takes the first row of the first
//! fragment as the canonical header and then, per later fragment:
//!
//! 1. a first row equal to the header is dropped and the rest appended;
//! 2. otherwise a fragment of header width is appended whole, on the
//!    assumption that it lost its header;
//! 3. otherwise the fragment goes to the fallback channel with a
//!    [`ConsolidationWarning::HeaderMismatch`].
//!
//! Header equality is exact, cell by cell. A repeated header that differs in
//! any cell is therefore absorbed as data when its width matches.
//!
//! After merging, artifact columns (blank or single-digit names) are pruned
//! and every row with a missing cell is dropped.
//!
//! ## Invariants
//! - Output row order follows fragment order, then row order within a fragment.
//! - Header rows never appear as data when they match exactly.
//! - Fallback fragments are never merged into the normalized rows.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;
use tracing::debug;
use tracing::warn;

use crate::table::ColumnName;
use crate::table::ConsolidatedTable;
use crate::table::TableFragment;

// ============================================================================
// SECTION: Errors and Warnings
// ============================================================================

/// Consolidation failures that leave a source with no usable data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsolidationError {
    /// The source produced no non-empty fragment.
    #[error("no tables detected in {source_name}")]
    NoTablesDetected {
        /// Source document name.
        source_name: String,
    },
}

/// Non-fatal consolidation findings surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsolidationWarning {
    /// Fragment width differs from the header; routed to the fallback channel.
    #[error(
        "header mismatch in table {table} of {source_name}: expected {expected} columns, found \
         {found}"
    )]
    HeaderMismatch {
        /// Source document name.
        source_name: String,
        /// One-based fragment position within the source.
        table: usize,
        /// Header width.
        expected: usize,
        /// Fragment width.
        found: usize,
    },
}

// ============================================================================
// SECTION: Consolidation
// ============================================================================

/// Consolidates the fragments extracted from `source_name`.
///
/// Empty fragments are ignored.
///
/// # Errors
///
/// Returns [`ConsolidationError::NoTablesDetected`] when no fragment has rows.
pub fn consolidate(
    source_name: &str,
    fragments: &[TableFragment],
) -> Result<ConsolidatedTable, ConsolidationError> {
    let mut populated = fragments.iter().enumerate().filter(|(_, fragment)| !fragment.is_empty());
    let Some((_, first)) = populated.next() else {
        warn!(source = source_name, "no tables detected");
        return Err(ConsolidationError::NoTablesDetected { source_name: source_name.to_string() });
    };

    let (header, first_data) = first.rows().split_at(1);
    let header = &header[0];
    let mut merged: Vec<Vec<String>> = first_data.to_vec();
    let mut table = ConsolidatedTable::default();

    for (index, fragment) in populated {
        let rows = fragment.rows();
        if rows[0] == *header {
            merged.extend_from_slice(&rows[1..]);
        } else if fragment.column_count() == header.len() {
            merged.extend_from_slice(rows);
        } else {
            let warning = ConsolidationWarning::HeaderMismatch {
                source_name: source_name.to_string(),
                table: index + 1,
                expected: header.len(),
                found: fragment.column_count(),
            };
            warn!(source = source_name, table = index + 1, "{warning}");
            table.warnings.push(warning);
            table.fallback.push(fragment.clone());
        }
    }

    let columns: Vec<(usize, ColumnName)> = header
        .iter()
        .enumerate()
        .map(|(index, text)| (index, ColumnName::from_header(index, text)))
        .filter(|(_, name)| !name.is_artifact())
        .collect();

    for row in merged {
        if row.len() != header.len() {
            table.dropped_rows += 1;
            continue;
        }
        let cells: Option<Vec<String>> = columns
            .iter()
            .map(|(index, _)| {
                let cell = row[*index].trim();
                (!cell.is_empty()).then(|| cell.to_string())
            })
            .collect();
        match cells {
            Some(cells) => table.rows.push(cells),
            None => table.dropped_rows += 1,
        }
    }
    table.columns = columns.into_iter().map(|(_, name)| name.to_string()).collect();

    debug!(
        source = source_name,
        columns = table.columns.len(),
        rows = table.rows.len(),
        dropped = table.dropped_rows,
        fallback = table.fallback.len(),
        "consolidated tables"
    );
    Ok(table)
}
