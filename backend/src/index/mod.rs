//! In-memory lookup structures built from the reference tables.
//!
//! ```text
//! provider list ──────────────────────────────▶ ProviderDirectory
//! zip_to_providers ──▶ direct ──┐
//!                               ├──▶ loader ──▶ ZipIndex
//! providers_by_county ─┐        │
//! county_zip ──────────┴─▶ county_join
//! ```

pub mod county_join;
pub mod direct;
pub mod directory;
pub mod loader;

use std::collections::{BTreeSet, HashMap};

use crate::models::{ProviderId, ZipCode};

pub use directory::ProviderDirectory;
pub use loader::{load_snapshot, DataSnapshot};

/// ZIP code to ascending, distinct provider IDs.
pub type ZipProviderIndex = HashMap<ZipCode, Vec<ProviderId>>;

/// ZIP code to sorted, distinct county names.
pub type ZipCountyIndex = HashMap<ZipCode, Vec<String>>;

/// County name column aliases shared by the ZIP sources.
pub const COUNTY_NAME_COLUMNS: &[&str] = &["county_name", "geography_desc", "county", "county_names"];

/// Both ZIP mappings, as produced by one load path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZipIndex {
    pub providers: ZipProviderIndex,
    pub counties: ZipCountyIndex,
}

impl ZipIndex {
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn providers_for(&self, zip: &ZipCode) -> &[ProviderId] {
        self.providers.get(zip).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn counties_for(&self, zip: &ZipCode) -> &[String] {
        self.counties.get(zip).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Accumulates per-ZIP sets while a source is scanned.
///
/// Sets keep IDs ascending and names sorted, so the finished index needs
/// no extra sort pass.
#[derive(Debug, Default)]
pub(crate) struct ZipIndexBuilder {
    providers: HashMap<ZipCode, BTreeSet<ProviderId>>,
    counties: HashMap<ZipCode, BTreeSet<String>>,
}

impl ZipIndexBuilder {
    pub fn add_providers<I>(&mut self, zip: &ZipCode, ids: I)
    where
        I: IntoIterator<Item = ProviderId>,
    {
        let set = self.providers.entry(zip.clone()).or_default();
        set.extend(ids);
    }

    pub fn add_counties<I, S>(&mut self, zip: &ZipCode, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names = names.into_iter().map(|name| -> String { name.into() }).peekable();
        if names.peek().is_none() {
            return;
        }
        self.counties.entry(zip.clone()).or_default().extend(names);
    }

    pub fn build(self) -> ZipIndex {
        ZipIndex {
            providers: self
                .providers
                .into_iter()
                .filter(|(_, ids)| !ids.is_empty())
                .map(|(zip, ids)| (zip, ids.into_iter().collect()))
                .collect(),
            counties: self
                .counties
                .into_iter()
                .map(|(zip, names)| (zip, names.into_iter().collect()))
                .collect(),
        }
    }
}

/// Split a county cell into names.
///
/// Semicolons always separate. Commas separate only when the value does
/// not end in `" County"`, so `"Cook, Lake"` splits while a single label
/// like `"Bristol, Bristol County"` stays whole. Blank pieces are dropped.
pub fn split_county_names(cell: &str) -> Vec<String> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Vec::new();
    }
    let parts: Vec<&str> = if cell.contains(';') {
        cell.split(';').collect()
    } else if cell.contains(',') && !cell.ends_with(" County") {
        cell.split(',').collect()
    } else {
        vec![cell]
    };
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zip(s: &str) -> ZipCode {
        ZipCode::parse(s).unwrap()
    }

    #[test]
    fn test_split_county_names() {
        assert_eq!(split_county_names("Cook; Lake"), vec!["Cook", "Lake"]);
        assert_eq!(split_county_names("Cook, Lake"), vec!["Cook", "Lake"]);
        assert_eq!(
            split_county_names("Bristol, Bristol County"),
            vec!["Bristol, Bristol County"]
        );
        assert_eq!(split_county_names("Los Angeles County"), vec!["Los Angeles County"]);
        assert_eq!(split_county_names("A;; B ;"), vec!["A", "B"]);
        assert!(split_county_names("   ").is_empty());
    }

    #[test]
    fn test_builder_sorts_and_dedups() {
        let mut builder = ZipIndexBuilder::default();
        let z = zip("90001");
        builder.add_providers(&z, [7, 3, 7]);
        builder.add_providers(&z, [1]);
        builder.add_counties(&z, ["Orange", "Los Angeles", "Orange"]);
        let index = builder.build();

        assert_eq!(index.providers_for(&z), &[1, 3, 7]);
        assert_eq!(index.counties_for(&z), &["Los Angeles".to_string(), "Orange".to_string()]);
    }

    #[test]
    fn test_builder_skips_empty_sets() {
        let mut builder = ZipIndexBuilder::default();
        let z = zip("10001");
        builder.add_providers(&z, std::iter::empty::<ProviderId>());
        builder.add_counties(&z, Vec::<String>::new());
        let index = builder.build();

        assert!(index.is_empty());
        assert!(index.counties.is_empty());
    }

    #[test]
    fn test_absent_zip_is_empty() {
        let index = ZipIndex::default();
        assert!(index.providers_for(&zip("99999")).is_empty());
        assert!(index.counties_for(&zip("99999")).is_empty());
    }
}
