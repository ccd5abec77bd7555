//! Point lookups against a loaded [`DataSnapshot`].
//!
//! Unknown ZIP codes and unknown provider IDs are not errors: the first
//! yields empty lists, the second the [`UNKNOWN_PROVIDER`](crate::models::UNKNOWN_PROVIDER)
//! placeholder.

use std::collections::BTreeSet;

use crate::error::{LookupError, LookupResult};
use crate::index::DataSnapshot;
use crate::models::{LoadSource, ProviderId, ZipCode};

/// Accepted length of the raw `zip` query value, in characters.
pub const ZIP_QUERY_LEN: std::ops::RangeInclusive<usize> = 3..=10;

/// A provider with its resolved display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProvider {
    pub id: ProviderId,
    pub name: String,
}

/// Everything known about one ZIP code.
#[derive(Debug, Clone, PartialEq)]
pub struct ZipLookup {
    pub zip: ZipCode,
    pub counties: Vec<String>,
    /// Ascending by ID, no duplicates
    pub providers: Vec<ResolvedProvider>,
    /// Whether the ZIP is a key of the provider index at all
    pub zip_known: bool,
    pub source: LoadSource,
}

/// Validate a raw `zip` query value and normalize it.
pub fn parse_zip_query(raw: Option<&str>) -> LookupResult<ZipCode> {
    let raw = raw.ok_or(LookupError::MissingZip)?;
    if !ZIP_QUERY_LEN.contains(&raw.chars().count()) {
        return Err(LookupError::InvalidZip(raw.to_string()));
    }
    ZipCode::parse(raw).ok_or_else(|| LookupError::InvalidZip(raw.to_string()))
}

/// Look up providers and counties for an already-normalized ZIP.
pub fn lookup(snapshot: &DataSnapshot, zip: &ZipCode) -> ZipLookup {
    let ids: BTreeSet<ProviderId> = snapshot.index.providers_for(zip).iter().copied().collect();

    let providers = ids
        .into_iter()
        .map(|id| ResolvedProvider {
            id,
            name: snapshot.directory.name_or_unknown(id).to_string(),
        })
        .collect();

    ZipLookup {
        zip: zip.clone(),
        counties: snapshot.index.counties_for(zip).to_vec(),
        providers,
        zip_known: snapshot.index.providers.contains_key(zip),
        source: snapshot.source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{ProviderDirectory, ZipIndex};
    use crate::models::UNKNOWN_PROVIDER;

    fn zip(s: &str) -> ZipCode {
        ZipCode::parse(s).unwrap()
    }

    fn snapshot() -> DataSnapshot {
        let mut index = ZipIndex::default();
        index.providers.insert(zip("90001"), vec![12, 5]);
        index.providers.insert(zip("00501"), vec![3]);
        index.counties.insert(zip("90001"), vec!["Los Angeles".into()]);

        let directory: ProviderDirectory = [(5, "Acme".to_string()), (3, "Globex".to_string())]
            .into_iter()
            .collect();

        DataSnapshot::new(directory, index, LoadSource::Direct)
    }

    #[test]
    fn test_parse_zip_query() {
        assert_eq!(parse_zip_query(Some("501")).unwrap().as_str(), "00501");
        assert_eq!(parse_zip_query(Some("90001-1234")).unwrap().as_str(), "90001");
        assert_eq!(parse_zip_query(None), Err(LookupError::MissingZip));
        assert!(matches!(parse_zip_query(Some("12")), Err(LookupError::InvalidZip(_))));
        assert!(matches!(parse_zip_query(Some("12345678901")), Err(LookupError::InvalidZip(_))));
        assert!(matches!(parse_zip_query(Some("9000 1")), Err(LookupError::InvalidZip(_))));
    }

    #[test]
    fn test_lookup_resolves_and_sorts() {
        let snap = snapshot();
        let result = lookup(&snap, &zip("90001"));

        assert_eq!(result.zip.as_str(), "90001");
        assert_eq!(result.counties, vec!["Los Angeles"]);
        assert!(result.zip_known);
        assert_eq!(result.source, LoadSource::Direct);
        assert_eq!(
            result.providers,
            vec![
                ResolvedProvider { id: 5, name: "Acme".into() },
                ResolvedProvider { id: 12, name: UNKNOWN_PROVIDER.into() },
            ]
        );
    }

    #[test]
    fn test_padded_lookup() {
        let snap = snapshot();
        let zip = parse_zip_query(Some("501")).unwrap();
        let result = lookup(&snap, &zip);

        assert_eq!(result.providers.len(), 1);
        assert_eq!(result.providers[0].name, "Globex");
        assert!(result.counties.is_empty());
    }

    #[test]
    fn test_unknown_zip_is_empty() {
        let snap = snapshot();
        let result = lookup(&snap, &zip("99999"));

        assert!(result.providers.is_empty());
        assert!(result.counties.is_empty());
        assert!(!result.zip_known);
    }
}
