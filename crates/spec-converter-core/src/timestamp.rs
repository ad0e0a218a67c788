// crates/spec-converter-core/src/timestamp.rs
// ============================================================================
// Module: Report Timestamps
// Description: Start and stop instants of campaigns and test cases.
// Purpose: Accept offset-aware and offset-less ISO 8601 timestamps alike.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Reports written by tooling with timezone-aware clocks carry RFC 3339
//! timestamps (`2024-01-15T09:00:00Z`); tooling with naive clocks omits the
//! offset (`2025-05-01T08:00:00.123456`). Both are accepted and each is
//! written back in its own form, so a naive timestamp never acquires an offset
//! it did not have.
//!
//! ## Invariants
//! - [`Timestamp::Offset`] renders as RFC 3339.
//! - [`Timestamp::Local`] renders as ISO 8601 without an offset.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;
use time::PrimitiveDateTime;
use time::format_description::well_known::Iso8601;
use time::format_description::well_known::Rfc3339;
use time::format_description::well_known::iso8601;

// ============================================================================
// SECTION: Formats
// ============================================================================

/// ISO 8601 date and time with a four digit year and no offset.
const LOCAL_CONFIG: iso8601::EncodedConfig = iso8601::Config::DEFAULT
    .set_formatted_components(iso8601::FormattedComponents::DateTime)
    .set_year_is_six_digits(false)
    .encode();

/// Format of offset-less timestamps.
const LOCAL_FORMAT: Iso8601<LOCAL_CONFIG> = Iso8601::<LOCAL_CONFIG>;

time::serde::format_description!(local_iso8601, PrimitiveDateTime, LOCAL_FORMAT);

/// Pattern the report schema applies to offset-less timestamps.
pub const LOCAL_TIMESTAMP_PATTERN: &str =
    r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}([.][0-9]{1,9})?$";

// ============================================================================
// SECTION: Timestamp
// ============================================================================

/// Instant recorded in a report, with or without a UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// RFC 3339 timestamp carrying its UTC offset.
    Offset(#[serde(with = "time::serde::rfc3339")] OffsetDateTime),
    /// Wall-clock timestamp recorded without an offset.
    Local(#[serde(with = "local_iso8601")] PrimitiveDateTime),
}

impl Timestamp {
    /// Returns the current instant in UTC.
    #[must_use]
    pub fn now_utc() -> Self {
        Self::Offset(OffsetDateTime::now_utc())
    }

    /// Returns the offset-aware instant, if the timestamp carries an offset.
    #[must_use]
    pub const fn offset_date_time(&self) -> Option<OffsetDateTime> {
        match self {
            Self::Offset(value) => Some(*value),
            Self::Local(_) => None,
        }
    }

    /// Returns the wall-clock date and time, ignoring any offset.
    #[must_use]
    pub const fn date_time(&self) -> PrimitiveDateTime {
        match self {
            Self::Offset(value) => PrimitiveDateTime::new(value.date(), value.time()),
            Self::Local(value) => *value,
        }
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(value: OffsetDateTime) -> Self {
        Self::Offset(value)
    }
}

impl From<PrimitiveDateTime> for Timestamp {
    fn from(value: PrimitiveDateTime) -> Self {
        Self::Local(value)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = match self {
            Self::Offset(value) => value.format(&Rfc3339),
            Self::Local(value) => value.format(&LOCAL_FORMAT),
        };
        rendered.map_or(Err(fmt::Error), |text| f.write_str(&text))
    }
}
