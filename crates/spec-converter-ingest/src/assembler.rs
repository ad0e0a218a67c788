// crates/spec-converter-ingest/src/assembler.rs
// ============================================================================
// Module: Configuration Assembler
// Description: Builds configuration entities from scenario rows and side files.
// Purpose: Produce validated ConfigurationParameters and AdditionalContext without a model.
// Dependencies: thiserror, tracing, spec-converter-core, crate::{csv_source, geolocation}
// ============================================================================

//! ## Overview
//! Each cell-scenario row becomes one [`ConfigurationParameters`] whose
//! `geoLocGrp` is loaded from `<docs_dir>/<deploymentScale>_cell_coordinates.json`.
//! Each UE-scenario row becomes one [`AdditionalContext`].
//!
//! Numeric cells accept integers and integral decimals (`"25"`, `"25.0"`);
//! anything else is an [`AssemblyError::InvalidNumber`]. Assembled entities
//! are validated before they are returned.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;

use spec_converter_core::AdditionalContext;
use spec_converter_core::ConfigurationParameters;
use spec_converter_core::Entity;
use spec_converter_core::SchemaValidationError;
use spec_converter_core::UeContext;
use thiserror::Error;
use tracing::info;

use crate::csv_source::ScenarioTable;
use crate::geolocation::geolocation_file_name;
use crate::geolocation::load_geolocation;
use crate::table::NormalizedRecord;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Cell-scenario column names.
mod cell {
    /// Deployment scale; also selects the geolocation file.
    pub const DEPLOYMENT_SCALE: &str = "deploymentScale";
    /// Antenna azimuth.
    pub const AZIMUTH: &str = "antennaAzimuth";
    /// Antenna tilt.
    pub const TILT: &str = "antennaTilt";
    /// Antenna height.
    pub const HEIGHT: &str = "antennaHeight";
    /// Number of cells.
    pub const NUMBER_OF_CELLS: &str = "numberOfCells";
    /// 5G band.
    pub const BAND_5G: &str = "band5G";
    /// TDD ratio.
    pub const TDD_RATIO: &str = "tddDlUlRatio";
    /// Transmit power.
    pub const TRANSMIT_POWER: &str = "totalTransmitPowerIntoAntenna";
}

/// UE-scenario column names.
mod ue {
    /// UE count.
    pub const NUMBER_OF_UE: &str = "numberOfUE";
    /// UE placement.
    pub const LOCATION: &str = "location";
    /// Target throughput.
    pub const TARGET_THROUGHPUT: &str = "targetThroughput";
    /// Slice.
    pub const SLICE: &str = "slice";
    /// QoS identifier.
    pub const QOS_ID: &str = "qosId";
    /// Mobility model.
    pub const MOBILITY_MODEL: &str = "mobilityModel";
    /// Mobility speed.
    pub const MOBILITY_SPEED: &str = "mobilitySpeed";
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failures while loading scenario inputs or assembling entities.
#[derive(Debug, Error)]
pub enum AssemblyError {
    /// Scenario file could not be opened.
    #[error("failed to read scenario file {path}: {message}")]
    Io {
        /// File path.
        path: String,
        /// Underlying error.
        message: String,
    },
    /// Scenario file is not valid CSV.
    #[error("failed to parse scenario file {path}: {message}")]
    Csv {
        /// File path.
        path: String,
        /// Parser message.
        message: String,
    },
    /// A required column is absent from a row.
    #[error("{table} scenario row is missing column {column}")]
    MissingColumn {
        /// Scenario kind (`cell` or `ue`).
        table: &'static str,
        /// Column name.
        column: &'static str,
    },
    /// A numeric cell does not hold a usable number.
    #[error("column {column} value {value:?} is not {expected}")]
    InvalidNumber {
        /// Column name.
        column: &'static str,
        /// Cell text.
        value: String,
        /// Expected number kind.
        expected: &'static str,
    },
    /// Geolocation side file could not be loaded.
    #[error("failed to load geolocation file {path}: {message}")]
    Geolocation {
        /// File path.
        path: String,
        /// Underlying error.
        message: String,
    },
    /// Assembled entity failed model validation.
    #[error(transparent)]
    Invalid(#[from] SchemaValidationError),
}

// ============================================================================
// SECTION: Assembler
// ============================================================================

/// Configuration entities assembled from a pair of scenario tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssembledConfiguration {
    /// One entry per cell-scenario row.
    pub configuration_parameters: Vec<ConfigurationParameters>,
    /// One entry per UE-scenario row.
    pub additional_context: Vec<AdditionalContext>,
}

/// Builds configuration entities from scenario rows.
///
/// # Invariants
/// - Geolocation files are resolved only beneath `docs_dir`.
#[derive(Debug, Clone)]
pub struct ConfigurationAssembler {
    /// Directory holding geolocation side files.
    docs_dir: PathBuf,
}

impl ConfigurationAssembler {
    /// Creates an assembler reading side files from `docs_dir`.
    #[must_use]
    pub fn new(docs_dir: impl Into<PathBuf>) -> Self {
        Self { docs_dir: docs_dir.into() }
    }

    /// Returns the side file directory.
    #[must_use]
    pub fn docs_dir(&self) -> &Path {
        &self.docs_dir
    }

    /// Assembles one cell row and one UE row.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError`] when either row cannot be assembled.
    pub fn assemble(
        &self,
        cell_row: &NormalizedRecord,
        ue_row: &NormalizedRecord,
    ) -> Result<(ConfigurationParameters, AdditionalContext), AssemblyError> {
        Ok((self.assemble_cell(cell_row)?, self.assemble_ue(ue_row)?))
    }

    /// Assembles every row of both tables.
    ///
    /// # Errors
    ///
    /// Returns the first [`AssemblyError`] encountered.
    pub fn assemble_tables(
        &self,
        cells: &ScenarioTable,
        ues: &ScenarioTable,
    ) -> Result<AssembledConfiguration, AssemblyError> {
        let configuration_parameters =
            cells.rows.iter().map(|row| self.assemble_cell(row)).collect::<Result<Vec<_>, _>>()?;
        let additional_context =
            ues.rows.iter().map(|row| self.assemble_ue(row)).collect::<Result<Vec<_>, _>>()?;
        info!(
            cells = configuration_parameters.len(),
            ues = additional_context.len(),
            "assembled configuration"
        );
        Ok(AssembledConfiguration { configuration_parameters, additional_context })
    }

    /// Assembles one cell-scenario row.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError`] for missing columns, bad numbers, unreadable
    /// side files, or values the model rejects.
    pub fn assemble_cell(
        &self,
        row: &NormalizedRecord,
    ) -> Result<ConfigurationParameters, AssemblyError> {
        let column = |name: &'static str| {
            row.get(name).ok_or(AssemblyError::MissingColumn { table: "cell", column: name })
        };
        let deployment_scale = column(cell::DEPLOYMENT_SCALE)?;
        let geo_path = self.side_file(deployment_scale)?;
        let coordinates = load_geolocation(&geo_path)?;

        let parameters = ConfigurationParameters {
            deployment_scale: Some(deployment_scale.to_string()),
            azimuth: Some(parse_integer(cell::AZIMUTH, column(cell::AZIMUTH)?)?),
            tilt: Some(parse_integer(cell::TILT, column(cell::TILT)?)?),
            height: Some(parse_integer(cell::HEIGHT, column(cell::HEIGHT)?)?),
            number_of_cells: Some(parse_count(
                cell::NUMBER_OF_CELLS,
                column(cell::NUMBER_OF_CELLS)?,
            )?),
            band_5g: Some(vec![column(cell::BAND_5G)?.to_string()]),
            tdd_dl_ul_ratio: Some(column(cell::TDD_RATIO)?.to_string()),
            total_transmit_power_into_antenna: Some(parse_decimal(
                cell::TRANSMIT_POWER,
                column(cell::TRANSMIT_POWER)?,
            )?),
            geo_loc_grp: (!coordinates.is_empty()).then_some(coordinates),
            ..ConfigurationParameters::default()
        };
        parameters.validate()?;
        Ok(parameters)
    }

    /// Assembles one UE-scenario row.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError`] for missing columns, bad numbers, or values
    /// the model rejects.
    pub fn assemble_ue(&self, row: &NormalizedRecord) -> Result<AdditionalContext, AssemblyError> {
        let column = |name: &'static str| {
            row.get(name)
                .map(ToString::to_string)
                .ok_or(AssemblyError::MissingColumn { table: "ue", column: name })
        };
        let context = AdditionalContext {
            ue_context: Some(UeContext {
                number_of_ue: Some(parse_count(ue::NUMBER_OF_UE, &column(ue::NUMBER_OF_UE)?)?),
                location: Some(column(ue::LOCATION)?),
                target_throughput: Some(column(ue::TARGET_THROUGHPUT)?),
                slice: Some(column(ue::SLICE)?),
                qos_id: Some(column(ue::QOS_ID)?),
                mobility_model: Some(column(ue::MOBILITY_MODEL)?),
                mobility_speed: Some(column(ue::MOBILITY_SPEED)?),
            }),
        };
        context.validate()?;
        Ok(context)
    }

    /// Resolves the geolocation side file for a deployment scale.
    fn side_file(&self, deployment_scale: &str) -> Result<PathBuf, AssemblyError> {
        let name = geolocation_file_name(deployment_scale);
        if deployment_scale.contains(['/', '\\']) || deployment_scale.contains("..") {
            return Err(AssemblyError::Geolocation {
                path: name,
                message: "deployment scale must not contain path separators".to_string(),
            });
        }
        Ok(self.docs_dir.join(name))
    }
}

// ============================================================================
// SECTION: Number Parsing
// ============================================================================

/// Largest magnitude at which every integer is exactly representable as `f64`.
const MAX_EXACT_F64: f64 = 9_007_199_254_740_992.0;

/// Parses a signed integer, accepting integral decimals.
fn parse_integer(column: &'static str, text: &str) -> Result<i64, AssemblyError> {
    let text = text.trim();
    if let Ok(value) = text.parse::<i64>() {
        return Ok(value);
    }
    let invalid =
        || AssemblyError::InvalidNumber { column, value: text.to_string(), expected: "an integer" };
    let value = text.parse::<f64>().map_err(|_| invalid())?;
    if value.fract() != 0.0 || !value.is_finite() || value.abs() > MAX_EXACT_F64 {
        return Err(invalid());
    }
    #[allow(clippy::cast_possible_truncation, reason = "Integral and within exact f64 range.")]
    let integer = value as i64;
    Ok(integer)
}

/// Parses a non-negative count.
fn parse_count(column: &'static str, text: &str) -> Result<u32, AssemblyError> {
    let value = parse_integer(column, text)?;
    u32::try_from(value).map_err(|_| AssemblyError::InvalidNumber {
        column,
        value: text.trim().to_string(),
        expected: "a non-negative count",
    })
}

/// Parses a finite decimal.
fn parse_decimal(column: &'static str, text: &str) -> Result<f64, AssemblyError> {
    let text = text.trim();
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(AssemblyError::InvalidNumber {
            column,
            value: text.to_string(),
            expected: "a finite number",
        }),
    }
}
