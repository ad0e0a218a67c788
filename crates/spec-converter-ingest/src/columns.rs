// crates/spec-converter-ingest/src/columns.rs
// ============================================================================
// Module: Column Normalization
// Description: Converts human-written table headers to camelCase field names.
// Purpose: Align scenario table headers with report field names.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Headers such as `antenna Azimuth` or `Band 5G` become `antennaAzimuth` and
//! `band5G`. Only the first character of each word changes case; the rest of
//! the word is kept as written, so unit suffixes like `5G` survive.

// ============================================================================
// SECTION: Normalization
// ============================================================================

/// Normalizes one raw header.
///
/// The header is trimmed and split on whitespace. The first word gets a
/// lowercase first character, later words an uppercase first character, and
/// the words are joined with no separator. A blank header yields an empty name.
#[must_use]
pub fn normalize_column_name(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());
    for (position, word) in raw.split_whitespace().enumerate() {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            if position == 0 {
                normalized.extend(first.to_lowercase());
            } else {
                normalized.extend(first.to_uppercase());
            }
            normalized.push_str(chars.as_str());
        }
    }
    normalized
}
