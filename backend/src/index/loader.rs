//! One-shot loader: provider directory plus a ZIP index from the first
//! load path that yields data.
//!
//! Nothing here aborts startup. Each failure is logged, recorded in
//! [`DataSnapshot::warnings`] and replaced by an empty structure.

use chrono::{DateTime, Utc};

use super::county_join::load_county_join;
use super::direct::load_direct;
use super::directory::{load_directory, ProviderDirectory};
use super::ZipIndex;
use crate::config::DataPaths;
use crate::error::LoadError;
use crate::models::LoadSource;

/// Immutable view of all reference data, built once at startup.
#[derive(Debug, Clone)]
pub struct DataSnapshot {
    pub directory: ProviderDirectory,
    pub index: ZipIndex,
    pub source: LoadSource,
    /// Degrade events seen while loading
    pub warnings: Vec<String>,
    pub loaded_at: DateTime<Utc>,
}

impl DataSnapshot {
    /// Assemble a snapshot from already-built parts.
    pub fn new(directory: ProviderDirectory, index: ZipIndex, source: LoadSource) -> Self {
        Self {
            directory,
            index,
            source,
            warnings: Vec::new(),
            loaded_at: Utc::now(),
        }
    }

    /// A snapshot with no data at all.
    pub fn empty() -> Self {
        Self::new(ProviderDirectory::default(), ZipIndex::default(), LoadSource::None)
    }
}

struct Warnings(Vec<String>);

impl Warnings {
    fn record(&mut self, what: &str, err: &LoadError) {
        tracing::warn!(error = %err, "{what} unavailable");
        self.0.push(format!("{what}: {err}"));
    }
}

/// Load everything named in `paths`.
///
/// The direct source is tried first; the county join runs only when the
/// direct source is missing, broken or has no providers.
pub fn load_snapshot(paths: &DataPaths) -> DataSnapshot {
    let mut warnings = Warnings(Vec::new());

    let directory = match load_directory(&paths.provider_list) {
        Ok((directory, name_col)) => {
            tracing::info!(
                providers = directory.len(),
                name_column = name_col,
                path = %paths.provider_list.display(),
                "loaded provider names"
            );
            directory
        }
        Err(e) => {
            warnings.record("provider list", &e);
            ProviderDirectory::default()
        }
    };

    let (index, source) = load_zip_index(paths, &mut warnings);

    DataSnapshot {
        warnings: warnings.0,
        ..DataSnapshot::new(directory, index, source)
    }
}

fn load_zip_index(paths: &DataPaths, warnings: &mut Warnings) -> (ZipIndex, LoadSource) {
    match load_direct(&paths.zip_to_providers) {
        Ok(index) if !index.is_empty() => {
            tracing::info!(
                zips = index.providers.len(),
                path = %paths.zip_to_providers.display(),
                "loaded ZIP providers from direct source"
            );
            return (index, LoadSource::Direct);
        }
        Ok(_) => {
            tracing::info!(
                path = %paths.zip_to_providers.display(),
                "direct source has no providers, trying county join"
            );
        }
        Err(LoadError::MissingFile(path)) => {
            tracing::info!(path = %path.display(), "direct source not found, trying county join");
        }
        Err(e) => warnings.record("direct ZIP source", &e),
    }

    match load_county_join(&paths.providers_by_county, &paths.county_zip) {
        Ok(index) if !index.is_empty() => {
            tracing::info!(zips = index.providers.len(), "built ZIP providers from county join");
            (index, LoadSource::CountyJoin)
        }
        Ok(_) => {
            warnings.0.push("county join matched no ZIP codes".to_string());
            tracing::warn!("no ZIP to provider data available");
            (ZipIndex::default(), LoadSource::None)
        }
        Err(e) => {
            warnings.record("county join", &e);
            tracing::warn!("no ZIP to provider data available");
            (ZipIndex::default(), LoadSource::None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ZipCode;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn paths_in(dir: &Path) -> DataPaths {
        DataPaths {
            provider_list: dir.join("providers.csv"),
            zip_to_providers: dir.join("zip_to_providers_unique.csv"),
            providers_by_county: dir.join("providers_by_county.csv"),
            county_zip: dir.join("county_zip.csv"),
        }
    }

    fn zip(s: &str) -> ZipCode {
        ZipCode::parse(s).unwrap()
    }

    #[test]
    fn test_direct_source_preferred() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(dir.path());
        fs::write(&paths.provider_list, "provider_id,provider_name\n5,Acme\n").unwrap();
        fs::write(&paths.zip_to_providers, "zip,provider_id\n90001,5\n").unwrap();
        fs::write(&paths.providers_by_county, "county_fips,provider_id\n06037,9\n").unwrap();
        fs::write(&paths.county_zip, "county,zip\n06037,90001\n").unwrap();

        let snapshot = load_snapshot(&paths);

        assert_eq!(snapshot.source, LoadSource::Direct);
        assert_eq!(snapshot.index.providers_for(&zip("90001")), &[5]);
        assert_eq!(snapshot.directory.len(), 1);
        assert!(snapshot.warnings.is_empty());
    }

    #[test]
    fn test_falls_back_to_county_join() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(dir.path());
        fs::write(&paths.providers_by_county, "county_fips,provider_id\n06037,5\n").unwrap();
        fs::write(&paths.county_zip, "county,zip\n06037,90001\n").unwrap();

        let snapshot = load_snapshot(&paths);

        assert_eq!(snapshot.source, LoadSource::CountyJoin);
        assert_eq!(snapshot.index.providers_for(&zip("90001")), &[5]);
        // Only the provider list is reported; a missing direct file is expected
        assert_eq!(snapshot.warnings.len(), 1);
        assert!(snapshot.warnings[0].starts_with("provider list"));
    }

    #[test]
    fn test_empty_direct_source_falls_through() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(dir.path());
        fs::write(&paths.zip_to_providers, "zip,provider_id\n90001,abc\n").unwrap();
        fs::write(&paths.providers_by_county, "fips,pid\n6037,8\n").unwrap();
        fs::write(&paths.county_zip, "county,zip\n6037,90001\n").unwrap();

        let snapshot = load_snapshot(&paths);

        assert_eq!(snapshot.source, LoadSource::CountyJoin);
        assert_eq!(snapshot.index.providers_for(&zip("90001")), &[8]);
    }

    #[test]
    fn test_broken_direct_source_is_recorded() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(dir.path());
        fs::write(&paths.zip_to_providers, "postal,provider_id\n90001,1\n").unwrap();
        fs::write(&paths.providers_by_county, "county_fips,provider_id\n06037,5\n").unwrap();
        fs::write(&paths.county_zip, "county,zip\n06037,90001\n").unwrap();

        let snapshot = load_snapshot(&paths);

        assert_eq!(snapshot.source, LoadSource::CountyJoin);
        assert!(snapshot.warnings.iter().any(|w| w.starts_with("direct ZIP source")));
    }

    #[test]
    fn test_nothing_available_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        let snapshot = load_snapshot(&paths_in(dir.path()));

        assert_eq!(snapshot.source, LoadSource::None);
        assert!(snapshot.index.is_empty());
        assert!(snapshot.directory.is_empty());
        assert_eq!(snapshot.warnings.len(), 2);
    }
}
