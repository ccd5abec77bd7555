//! Header normalization and candidate-based column resolution.
//!
//! Source files disagree on header spelling (`Provider ID`, `provider_id`,
//! ` PROVIDER_ID `), so every header is reduced to a canonical key and
//! columns are looked up by an ordered list of candidate keys.

use crate::error::ColumnNotFound;

/// Canonical form of a single header label.
///
/// Drops every character outside printable ASCII (32..=126), trims,
/// lowercases and turns spaces into underscores. Never fails; an empty
/// string is a valid result.
pub fn normalize_column(raw: &str) -> String {
    let ascii: String = raw.chars().filter(|c| (' '..='~').contains(c)).collect();
    ascii.trim().to_lowercase().replace(' ', "_")
}

/// Normalize a whole header row.
pub fn normalize_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter().map(|h| normalize_column(h.as_ref())).collect()
}

/// A resolved column: its position and the candidate that matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMatch<'c> {
    pub index: usize,
    pub name: &'c str,
}

/// Return the first candidate present in `headers`.
///
/// Candidates are tried in order, so earlier names win even when a later
/// one appears first in the file.
pub fn resolve_column<'c>(
    headers: &[String],
    candidates: &[&'c str],
) -> Result<ColumnMatch<'c>, ColumnNotFound> {
    candidates
        .iter()
        .find_map(|&name| {
            headers
                .iter()
                .position(|h| h == name)
                .map(|index| ColumnMatch { index, name })
        })
        .ok_or_else(|| ColumnNotFound {
            candidates: candidates.iter().map(|c| c.to_string()).collect(),
            columns: headers.to_vec(),
        })
}
