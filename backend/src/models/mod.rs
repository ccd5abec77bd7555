//! Domain models for the ZIP to provider lookup.
//!
//! - [`ZipCode`] - 5-digit zero-padded ZIP key
//! - [`CountyFips`] - 5-digit zero-padded county join key
//! - [`ProviderId`] - integer provider identifier
//! - [`LoadSource`] - which load path produced the ZIP index
//!
//! Identifiers are kept as strings wherever leading zeros matter; they are
//! never parsed as numbers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer provider identifier.
pub type ProviderId = i64;

/// Placeholder name for IDs missing from the provider directory.
pub const UNKNOWN_PROVIDER: &str = "Unknown provider";

const KEY_WIDTH: usize = 5;

/// Drop a `.0` suffix left behind by spreadsheet float exports.
fn strip_float_suffix(raw: &str) -> &str {
    raw.strip_suffix(".0").unwrap_or(raw)
}

fn zero_pad(digits: &str) -> String {
    format!("{:0>width$}", digits, width = KEY_WIDTH)
}

// =============================================================================
// ZIP Code
// =============================================================================

/// US ZIP code, always 5 ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZipCode(String);

impl ZipCode {
    /// Normalize a raw ZIP value.
    ///
    /// Whitespace is trimmed and a ZIP+4 suffix (`-1234`) is dropped. The rest
    /// must be digits: shorter values are left-padded with zeros, longer
    /// ones keep their first five digits. Returns `None` for anything else.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = strip_float_suffix(raw.trim());
        let base = match trimmed.split_once('-') {
            Some((head, tail)) if tail.chars().all(|c| c.is_ascii_digit()) => head,
            Some(_) => return None,
            None => trimmed,
        };
        if base.is_empty() || !base.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let digits = if base.len() > KEY_WIDTH { &base[..KEY_WIDTH] } else { base };
        Some(Self(zero_pad(digits)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// County FIPS
// =============================================================================

/// County FIPS code used as the join key between providers and the crosswalk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CountyFips(String);

impl CountyFips {
    /// Zero-pad a digit string to width 5. Longer codes are kept as-is
    /// and will simply not join.
    pub fn parse(raw: &str) -> Option<Self> {
        let digits = strip_float_suffix(raw.trim());
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        Some(Self(zero_pad(digits)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// Provider ID
// =============================================================================

/// Coerce a cell to a provider ID.
///
/// Accepts integers and floats with no fractional part (`"5"`, `" 5 "`,
/// `"5.0"`). Everything else yields `None` and the row is dropped.
pub fn parse_provider_id(raw: &str) -> Option<ProviderId> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(id) = s.parse::<ProviderId>() {
        return Some(id);
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            Some(f as ProviderId)
        }
        _ => None,
    }
}

// =============================================================================
// Load Source
// =============================================================================

/// Which load path produced the ZIP index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadSource {
    /// Pre-joined ZIP to provider file.
    Direct,
    /// Providers-by-county joined with the county/ZIP crosswalk.
    CountyJoin,
    /// Neither path produced data.
    None,
}

impl LoadSource {
    pub fn label(&self) -> &'static str {
        match self {
            LoadSource::Direct => "direct",
            LoadSource::CountyJoin => "county_join",
            LoadSource::None => "none",
        }
    }
}

impl fmt::Display for LoadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
