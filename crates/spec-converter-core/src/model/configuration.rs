// crates/spec-converter-core/src/model/configuration.rs
// ============================================================================
// Module: Configuration Entities
// Description: Deployment configuration, geolocation, and UE context records.
// Purpose: Carry the structured output of mapping and assembly into the report.
// Dependencies: serde, crate::{enums, schema, validation}
// ============================================================================

//! ## Overview
//! [`ConfigurationParameters`] declares every deployment attribute up front and
//! leaves all of them optional, because both the schema mapper and the table
//! assembler fill in only the subset their source provides.
//!
//! ## Invariants
//! - `geoLocGrp` order is significant; element `i` sites cell `i`.
//! - Lists present on the wire are non-empty.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::enums::DeploymentRfScenario;
use crate::schema::CONFIGURATION_FIELDS;
use crate::validation::Entity;

// ============================================================================
// SECTION: Geo Coordinate
// ============================================================================

/// Position of one cell site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeoCoordinate {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl Entity for GeoCoordinate {
    const NAME: &'static str = "GeoCoordinate";
}

// ============================================================================
// SECTION: Configuration Parameters
// ============================================================================

/// Deployment, antenna, and traffic attributes of a tested configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigurationParameters {
    /// Deployment architecture (indoor, outdoor, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_architecture: Option<String>,
    /// Deployment scale (macro, micro, ...); also names the geolocation file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_scale: Option<String>,
    /// Radio environment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_rf_scenario: Option<DeploymentRfScenario>,
    /// 5G frequency ranges.
    #[serde(rename = "frequencyRange5G", skip_serializing_if = "Option::is_none")]
    pub frequency_range_5g: Option<Vec<String>>,
    /// 5G bands.
    #[serde(rename = "band5G", skip_serializing_if = "Option::is_none")]
    pub band_5g: Option<Vec<String>>,
    /// Subcarrier spacing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_carrier_spacing: Option<String>,
    /// Total resource blocks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_resource_blocks: Option<u32>,
    /// Duplex mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplex_mode: Option<String>,
    /// Transmit antenna count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_tx_antenna: Option<u32>,
    /// Receive antenna count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_rx_antenna: Option<u32>,
    /// Transmit power into the antenna.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_transmit_power_into_antenna: Option<f64>,
    /// Antenna azimuth in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azimuth: Option<i64>,
    /// Antenna tilt in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tilt: Option<i64>,
    /// Antenna height in meters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
    /// Number of cells.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_cells: Option<u32>,
    /// Downlink to uplink TDD ratio.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tdd_dl_ul_ratio: Option<String>,
    /// Cell site positions in cell order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo_loc_grp: Option<Vec<GeoCoordinate>>,
}

impl ConfigurationParameters {
    /// Wire names of every declared field, in declaration order.
    #[must_use]
    pub fn field_names() -> impl Iterator<Item = &'static str> {
        CONFIGURATION_FIELDS.iter().copied()
    }
}

impl Entity for ConfigurationParameters {
    const NAME: &'static str = "ConfigurationParameters";
}

// ============================================================================
// SECTION: UE Context
// ============================================================================

/// User-equipment traffic scenario attached to a test campaign.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UeContext {
    /// Number of simulated user equipments.
    #[serde(rename = "numberOfUE", skip_serializing_if = "Option::is_none")]
    pub number_of_ue: Option<u32>,
    /// Placement of the user equipments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Target throughput.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_throughput: Option<String>,
    /// Network slice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slice: Option<String>,
    /// QoS identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qos_id: Option<String>,
    /// Mobility model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobility_model: Option<String>,
    /// Mobility speed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobility_speed: Option<String>,
}

impl Entity for UeContext {
    const NAME: &'static str = "UEContext";
}

/// Extra campaign context beyond the deployment configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AdditionalContext {
    /// User-equipment scenario.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ue_context: Option<UeContext>,
}

impl Entity for AdditionalContext {
    const NAME: &'static str = "AdditionalContext";
}
