//! ZIP index from providers-by-county joined with a county/ZIP crosswalk.
//!
//! ```text
//! providers_by_county              county_zip
//! county_fips,provider_id,name     county,zip
//! 06037,5,Los Angeles        ⋈     06037,90001
//!                                  06037,90002
//! ```
//!
//! Inner join on the padded county FIPS, then aggregation by ZIP.

use std::collections::HashMap;
use std::path::Path;

use super::{ZipIndex, ZipIndexBuilder};
use crate::error::{ColumnNotFound, LoadError, LoadResult};
use crate::models::{parse_provider_id, CountyFips, ProviderId, ZipCode};
use crate::parser::{parse_csv_file_auto, Table};

/// County identifier aliases in the providers table.
pub const COUNTY_ID_COLUMNS: &[&str] = &["county_fips", "geography_id", "fips", "county_code"];

/// Provider identifier aliases in the providers table.
pub const PROVIDER_ID_COLUMNS: &[&str] = &["provider_id", "providerid", "pid", "provider"];

/// County name aliases in the providers table.
pub const COUNTY_LABEL_COLUMNS: &[&str] = &["county_name", "geography_desc", "county", "name"];

const CROSSWALK_COUNTY_COLUMN: &str = "county";
const CROSSWALK_ZIP_COLUMN: &str = "zip";

/// Providers serving one county, with the county's display names.
#[derive(Debug, Default)]
struct CountyProviders {
    providers: Vec<ProviderId>,
    names: Vec<String>,
}

/// Build the index by joining the two files. Either file missing is an error.
pub fn load_county_join(providers_path: &Path, crosswalk_path: &Path) -> LoadResult<ZipIndex> {
    for path in [providers_path, crosswalk_path] {
        if !path.exists() {
            return Err(LoadError::MissingFile(path.to_path_buf()));
        }
    }

    let providers = parse_csv_file_auto(providers_path)?;
    let by_county =
        providers_by_county(&providers).map_err(|e| LoadError::missing_column(providers_path, e))?;

    let crosswalk = parse_csv_file_auto(crosswalk_path)?;
    join_crosswalk(&crosswalk, &by_county).map_err(|e| LoadError::missing_column(crosswalk_path, e))
}

/// Build the index from two parsed tables.
pub fn county_join_from_tables(
    providers: &Table,
    crosswalk: &Table,
) -> Result<ZipIndex, ColumnNotFound> {
    let by_county = providers_by_county(providers)?;
    join_crosswalk(crosswalk, &by_county)
}

/// Group the providers table by padded county FIPS.
///
/// Rows with a non-numeric county or provider identifier are dropped.
fn providers_by_county(table: &Table) -> Result<HashMap<CountyFips, CountyProviders>, ColumnNotFound> {
    let county_col = table.resolve(COUNTY_ID_COLUMNS)?;
    let provider_col = table.resolve(PROVIDER_ID_COLUMNS)?;
    let name_col = table.resolve(COUNTY_LABEL_COLUMNS).ok();

    tracing::debug!(
        county = county_col.name,
        provider = provider_col.name,
        name = ?name_col.map(|c| c.name),
        "resolved providers-by-county columns"
    );

    let mut by_county: HashMap<CountyFips, CountyProviders> = HashMap::new();

    for row in &table.rows {
        let Some(fips) = CountyFips::parse(row.get(county_col.index).unwrap_or("")) else {
            continue;
        };
        let Some(id) = parse_provider_id(row.get(provider_col.index).unwrap_or("")) else {
            continue;
        };

        let entry = by_county.entry(fips).or_default();
        entry.providers.push(id);
        if let Some(col) = name_col {
            let name = row.get(col.index).unwrap_or("").trim();
            if !name.is_empty() {
                entry.names.push(name.to_string());
            }
        }
    }

    Ok(by_county)
}

/// Inner join the crosswalk against the grouped providers and aggregate by ZIP.
fn join_crosswalk(
    crosswalk: &Table,
    by_county: &HashMap<CountyFips, CountyProviders>,
) -> Result<ZipIndex, ColumnNotFound> {
    let county_col = crosswalk.resolve(&[CROSSWALK_COUNTY_COLUMN])?;
    let zip_col = crosswalk.resolve(&[CROSSWALK_ZIP_COLUMN])?;

    let mut builder = ZipIndexBuilder::default();

    for row in &crosswalk.rows {
        let Some(fips) = CountyFips::parse(row.get(county_col.index).unwrap_or("")) else {
            continue;
        };
        let Some(county) = by_county.get(&fips) else {
            continue;
        };
        let Some(zip) = ZipCode::parse(row.get(zip_col.index).unwrap_or("")) else {
            continue;
        };

        builder.add_providers(&zip, county.providers.iter().copied());
        builder.add_counties(&zip, county.names.iter().cloned());
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_bytes_auto;
    use std::fs;
    use tempfile::TempDir;

    fn table(csv: &str) -> Table {
        parse_bytes_auto(csv.as_bytes()).unwrap()
    }

    fn zip(s: &str) -> ZipCode {
        ZipCode::parse(s).unwrap()
    }

    #[test]
    fn test_single_county_join() {
        let providers = table("county_fips,provider_id\n06037,5\n");
        let crosswalk = table("county,zip\n06037,90001\n");
        let index = county_join_from_tables(&providers, &crosswalk).unwrap();

        assert_eq!(index.providers_for(&zip("90001")), &[5]);
        assert!(index.counties_for(&zip("90001")).is_empty());
    }

    #[test]
    fn test_fips_padding_on_both_sides() {
        let providers = table("FIPS,Provider\n6037,5\n6037.0,7\n");
        let crosswalk = table("County,ZIP\n06037,90001\n6037,501\n");
        let index = county_join_from_tables(&providers, &crosswalk).unwrap();

        assert_eq!(index.providers_for(&zip("90001")), &[5, 7]);
        assert_eq!(index.providers_for(&zip("00501")), &[5, 7]);
    }

    #[test]
    fn test_zip_spanning_counties() {
        let providers = table(
            "geography_id,pid,geography_desc\n\
             06037,5,Los Angeles\n\
             06059,9,Orange\n\
             06059,5,Orange\n\
             06071,11,San Bernardino\n",
        );
        let crosswalk = table("county,zip\n06037,90620\n06059,90620\n06071,92301\n");
        let index = county_join_from_tables(&providers, &crosswalk).unwrap();

        assert_eq!(index.providers_for(&zip("90620")), &[5, 9]);
        assert_eq!(
            index.counties_for(&zip("90620")),
            &["Los Angeles".to_string(), "Orange".to_string()]
        );
        assert_eq!(index.providers_for(&zip("92301")), &[11]);
    }

    #[test]
    fn test_inner_join_drops_unmatched() {
        let providers = table("county_fips,provider_id\n06037,5\n17031,x\n");
        let crosswalk = table("county,zip\n17031,60601\n36061,10001\n");
        let index = county_join_from_tables(&providers, &crosswalk).unwrap();

        assert!(index.is_empty());
    }

    #[test]
    fn test_candidate_priority() {
        // county_fips outranks county_code regardless of position
        let providers = table("county_code,county_fips,provider_id\n99999,06037,5\n");
        let crosswalk = table("county,zip\n06037,90001\n");
        let index = county_join_from_tables(&providers, &crosswalk).unwrap();

        assert_eq!(index.providers_for(&zip("90001")), &[5]);
    }

    #[test]
    fn test_missing_identifier_columns() {
        let crosswalk = table("county,zip\n06037,90001\n");

        let err = county_join_from_tables(&table("state,provider_id\nCA,5\n"), &crosswalk).unwrap_err();
        assert_eq!(err.candidates.len(), COUNTY_ID_COLUMNS.len());

        let err = county_join_from_tables(&table("fips,brand\n06037,Acme\n"), &crosswalk).unwrap_err();
        assert_eq!(err.candidates.len(), PROVIDER_ID_COLUMNS.len());
    }

    #[test]
    fn test_crosswalk_requires_county_and_zip() {
        let providers = table("fips,provider_id\n06037,5\n");

        let err = county_join_from_tables(&providers, &table("county_fips,zip\n06037,90001\n")).unwrap_err();
        assert_eq!(err.candidates, vec!["county"]);

        let err = county_join_from_tables(&providers, &table("county,postcode\n06037,90001\n")).unwrap_err();
        assert_eq!(err.candidates, vec!["zip"]);
    }

    #[test]
    fn test_load_county_join_files() {
        let dir = TempDir::new().unwrap();
        let providers = dir.path().join("providers_by_county.csv");
        let crosswalk = dir.path().join("county_zip.csv");
        fs::write(&providers, "county_fips,provider_id,county_name\n06037,5,Los Angeles\n").unwrap();

        let err = load_county_join(&providers, &crosswalk).unwrap_err();
        assert!(matches!(err, LoadError::MissingFile(p) if p == crosswalk));

        fs::write(&crosswalk, "county,zip\n06037,90001\n").unwrap();
        let index = load_county_join(&providers, &crosswalk).unwrap();
        assert_eq!(index.providers_for(&zip("90001")), &[5]);
        assert_eq!(index.counties_for(&zip("90001")), &["Los Angeles".to_string()]);
    }
}
