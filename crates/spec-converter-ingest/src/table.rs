// crates/spec-converter-ingest/src/table.rs
// ============================================================================
// Module: Table Types
// Description: Raw fragments, column names, and consolidated record sets.
// Purpose: Shared data shapes between extraction, consolidation, and mapping.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! A [`TableFragment`] is one raw extracted table: rows of cell text with no
//! guarantee about width or header presence. Consolidation turns a sequence of
//! fragments into a [`ConsolidatedTable`] whose rows all share one column set.
//!
//! ## Invariants
//! - Every row of a [`ConsolidatedTable`] has exactly one cell per column.
//! - Consolidated cells are never blank.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde_json::Map;
use serde_json::Value;

use crate::consolidate::ConsolidationWarning;

// ============================================================================
// SECTION: Fragments
// ============================================================================

/// One raw extracted table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableFragment {
    /// Rows of cell text, top to bottom.
    rows: Vec<Vec<String>>,
}

impl TableFragment {
    /// Wraps extracted rows.
    #[must_use]
    pub const fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Builds a fragment from string slices.
    #[must_use]
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self::new(rows.into_iter().map(|row| row.into_iter().map(Into::into).collect()).collect())
    }

    /// Returns the rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Returns true when the fragment has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the widest row length.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

// ============================================================================
// SECTION: Column Names
// ============================================================================

/// Canonical column name taken from the header row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnName {
    /// Header cell text.
    Named(String),
    /// Blank header cell; carries the column position.
    Positional(usize),
}

impl ColumnName {
    /// Builds the name of column `index` from raw header text.
    #[must_use]
    pub fn from_header(index: usize, text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() { Self::Positional(index) } else { Self::Named(trimmed.to_string()) }
    }

    /// Returns true for extraction artifacts: positional placeholders and names
    /// made of a single digit.
    #[must_use]
    pub fn is_artifact(&self) -> bool {
        match self {
            Self::Positional(_) => true,
            Self::Named(name) => {
                let mut chars = name.chars();
                matches!((chars.next(), chars.next()), (Some(first), None) if first.is_ascii_digit())
            }
        }
    }
}

impl fmt::Display for ColumnName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Positional(index) => write!(f, "{index}"),
        }
    }
}

// ============================================================================
// SECTION: Consolidated Output
// ============================================================================

/// One consolidated row keyed by column name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    /// Column name and cell pairs in column order.
    fields: Vec<(String, String)>,
}

impl NormalizedRecord {
    /// Builds a record from column and cell pairs.
    #[must_use]
    pub fn new<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self { fields: fields.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }

    /// Returns the cell under `column`.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.iter().find(|(name, _)| name == column).map(|(_, value)| value.as_str())
    }

    /// Returns column and cell pairs in column order.
    #[must_use]
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Renders the record as a flat JSON object of strings.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .fields
            .iter()
            .map(|(name, value)| (name.clone(), Value::String(value.clone())))
            .collect();
        Value::Object(map)
    }
}

/// Result of consolidating one source's fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsolidatedTable {
    /// Column names after artifact pruning.
    pub columns: Vec<String>,
    /// Complete rows, one cell per column, in source order.
    pub rows: Vec<Vec<String>>,
    /// Fragments whose width did not match the header, kept verbatim.
    pub fallback: Vec<TableFragment>,
    /// Non-fatal problems found while merging.
    pub warnings: Vec<ConsolidationWarning>,
    /// Rows discarded for missing cells.
    pub dropped_rows: usize,
}

impl ConsolidatedTable {
    /// Returns the rows as keyed records.
    #[must_use]
    pub fn records(&self) -> Vec<NormalizedRecord> {
        self.rows
            .iter()
            .map(|row| NormalizedRecord::new(self.columns.iter().cloned().zip(row.iter().cloned())))
            .collect()
    }
}
