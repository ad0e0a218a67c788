// crates/spec-converter-ingest/src/geolocation.rs
// ============================================================================
// Module: Geolocation Side Files
// Description: Loads per-scale cell coordinate files.
// Purpose: Supply ordered cell sites to assembled configurations.
// Dependencies: serde_json, tracing, spec-converter-core
// ============================================================================

//! ## Overview
//! A side file holds `{"cellsCoordinate": [{"x": .., "y": ..}, ...]}` where
//! `x` is longitude and `y` latitude. Pairs missing either coordinate are
//! skipped and only logged at debug level; callers see a shorter list.
//!
//! ## Invariants
//! - Output order equals file order.
//! - A file without `cellsCoordinate` yields an empty list.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use serde_json::Value;
use spec_converter_core::GeoCoordinate;
use tracing::debug;

use crate::assembler::AssemblyError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Key holding the coordinate list.
const COORDINATES_KEY: &str = "cellsCoordinate";

/// Cap on a geolocation file.
const MAX_GEOLOCATION_BYTES: u64 = 4 * 1024 * 1024;

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Returns the side file name for a deployment scale.
#[must_use]
pub fn geolocation_file_name(deployment_scale: &str) -> String {
    format!("{deployment_scale}_cell_coordinates.json")
}

/// Loads the coordinates of `path`.
///
/// # Errors
///
/// Returns [`AssemblyError::Geolocation`] when the file is unreadable, too
/// large, not JSON, or not a JSON object.
pub fn load_geolocation(path: &Path) -> Result<Vec<GeoCoordinate>, AssemblyError> {
    let path_text = path.display().to_string();
    let failure = |message: String| AssemblyError::Geolocation { path: path_text.clone(), message };

    let size = fs::metadata(path).map_err(|err| failure(err.to_string()))?.len();
    if size > MAX_GEOLOCATION_BYTES {
        return Err(failure(format!("file exceeds size limit ({size} bytes)")));
    }
    let bytes = fs::read(path).map_err(|err| failure(err.to_string()))?;
    let document: Value = serde_json::from_slice(&bytes).map_err(|err| failure(err.to_string()))?;
    let Value::Object(document) = document else {
        return Err(failure("expected a JSON object".to_string()));
    };
    let Some(entries) = document.get(COORDINATES_KEY) else {
        return Ok(Vec::new());
    };
    let Value::Array(entries) = entries else {
        return Err(failure(format!("{COORDINATES_KEY} must be an array")));
    };

    let mut coordinates = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let longitude = entry.get("x").and_then(Value::as_f64);
        let latitude = entry.get("y").and_then(Value::as_f64);
        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => {
                coordinates.push(GeoCoordinate { latitude, longitude });
            }
            _ => debug!(path = %path_text, index, "skipping incomplete coordinate"),
        }
    }
    Ok(coordinates)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn file_name_follows_scale() {
        assert_eq!(geolocation_file_name("macro"), "macro_cell_coordinates.json");
    }

    #[test]
    fn incomplete_pairs_are_skipped_in_order() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("macro_cell_coordinates.json");
        fs::write(
            &path,
            r#"{"cellsCoordinate": [{"x": 121.5, "y": 25.0}, {"x": 121.6}, {"x": 121.7, "y": 25.2}]}"#,
        )?;
        let coordinates = load_geolocation(&path)?;
        assert_eq!(coordinates, vec![
            GeoCoordinate { latitude: 25.0, longitude: 121.5 },
            GeoCoordinate { latitude: 25.2, longitude: 121.7 },
        ]);
        Ok(())
    }

    #[test]
    fn missing_key_yields_no_coordinates() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("micro_cell_coordinates.json");
        fs::write(&path, "{}")?;
        assert!(load_geolocation(&path)?.is_empty());
        Ok(())
    }

    #[test]
    fn non_object_documents_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("pico_cell_coordinates.json");
        fs::write(&path, "[1, 2]")?;
        assert!(matches!(load_geolocation(&path), Err(AssemblyError::Geolocation { .. })));
        Ok(())
    }
}
