// crates/spec-converter-ingest/src/csv_source.rs
// ============================================================================
// Module: Scenario Tables
// Description: Loads cell and UE scenario CSV files with normalized headers.
// Purpose: Feed the configuration assembler with complete, keyed rows.
// Dependencies: csv, tracing, crate::{assembler, columns, table}
// ============================================================================

//! ## Overview
//! Scenario files are small CSV exports with human-written headers. Headers
//! are normalized with [`normalize_column_name`] and any row with a blank
//! cell is dropped, matching the completeness policy of consolidation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;

use tracing::debug;

use crate::assembler::AssemblyError;
use crate::columns::normalize_column_name;
use crate::table::NormalizedRecord;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Complete rows of one scenario file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioTable {
    /// Normalized column names.
    pub columns: Vec<String>,
    /// Rows with every cell present.
    pub rows: Vec<NormalizedRecord>,
}

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Loads a scenario CSV file.
///
/// # Errors
///
/// Returns [`AssemblyError::Io`] when the file cannot be opened and
/// [`AssemblyError::Csv`] when it is not valid CSV.
pub fn load_scenario_csv(path: &Path) -> Result<ScenarioTable, AssemblyError> {
    let path_text = path.display().to_string();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|err| AssemblyError::Io { path: path_text.clone(), message: err.to_string() })?;
    let csv_error =
        |err: csv::Error| AssemblyError::Csv { path: path_text.clone(), message: err.to_string() };

    let columns: Vec<String> =
        reader.headers().map_err(csv_error)?.iter().map(normalize_column_name).collect();
    let mut table = ScenarioTable { columns, rows: Vec::new() };
    let mut dropped = 0_usize;
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let complete = record.len() == table.columns.len()
            && record.iter().all(|cell| !cell.trim().is_empty());
        if !complete {
            dropped += 1;
            continue;
        }
        let cells =
            table.columns.iter().zip(record.iter()).map(|(column, cell)| (column.clone(), cell.trim()));
        table.rows.push(NormalizedRecord::new(cells));
    }
    debug!(path = %path_text, rows = table.rows.len(), dropped, "loaded scenario table");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn headers_are_normalized_and_incomplete_rows_dropped() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile()?;
        writeln!(file, "deployment Scale,antenna Azimuth,Band 5G")?;
        writeln!(file, "macro,120,n78")?;
        writeln!(file, "micro,,n41")?;
        writeln!(file, "pico,90")?;
        let table = load_scenario_csv(file.path())?;
        assert_eq!(table.columns, vec!["deploymentScale", "antennaAzimuth", "band5G"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].get("band5G"), Some("n78"));
        assert_eq!(
            table.rows[0],
            NormalizedRecord::new([
                ("deploymentScale", "macro"),
                ("antennaAzimuth", "120"),
                ("band5G", "n78"),
            ])
        );
        Ok(())
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_scenario_csv(Path::new("/nonexistent/cell-scenario.csv")).err();
        assert!(matches!(err, Some(AssemblyError::Io { .. })));
    }
}
