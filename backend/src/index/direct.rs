//! ZIP index from a pre-joined ZIP to provider file.
//!
//! Two shapes are accepted:
//!
//! ```text
//! long                       wide
//! zip,provider_id            zip,provider_ids,county_name
//! 90001,5                    90001,"[5, 12]","Los Angeles"
//! 90001,12
//! ```
//!
//! When a file carries both `provider_id` and `provider_ids`, the long
//! form wins.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use super::{split_county_names, ZipIndex, ZipIndexBuilder, COUNTY_NAME_COLUMNS};
use crate::error::{ColumnNotFound, LoadError, LoadResult};
use crate::models::{parse_provider_id, ProviderId, ZipCode};
use crate::parser::{parse_csv_file_auto, Table};

const ZIP_COLUMN: &str = "zip";
const LONG_ID_COLUMN: &str = "provider_id";
const WIDE_ID_COLUMN: &str = "provider_ids";

/// Brackets, quotes and whitespace around list tokens.
static LIST_NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[\[\]\s'"]"#).unwrap());

/// Parse a bracketed, comma separated ID list such as `"[5, 12, x]"`.
///
/// Brackets, quotes and whitespace are stripped; tokens that are not all
/// digits are skipped. The result is ascending and distinct.
pub fn parse_id_list(cell: &str) -> Vec<ProviderId> {
    let cleaned = LIST_NOISE.replace_all(cell, "");
    let mut ids: Vec<ProviderId> = cleaned
        .split(',')
        .filter(|tok| !tok.is_empty() && tok.chars().all(|c| c.is_ascii_digit()))
        .filter_map(|tok| tok.parse().ok())
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Build the index from the direct source file.
pub fn load_direct(path: &Path) -> LoadResult<ZipIndex> {
    if !path.exists() {
        return Err(LoadError::MissingFile(path.to_path_buf()));
    }
    let table = parse_csv_file_auto(path)?;
    direct_from_table(&table).map_err(|e| LoadError::missing_column(path, e))
}

/// Build the index from a parsed direct-source table.
///
/// Only `zip` is required. A table with neither ID column yields an index
/// with no providers, which the loader treats like a missing file.
pub fn direct_from_table(table: &Table) -> Result<ZipIndex, ColumnNotFound> {
    let zip_col = table.resolve(&[ZIP_COLUMN])?;
    let id_col = table.resolve(&[LONG_ID_COLUMN, WIDE_ID_COLUMN]).ok();
    let county_col = table.resolve(COUNTY_NAME_COLUMNS).ok();

    if id_col.is_none() {
        tracing::warn!(columns = ?table.headers, "direct source has no provider id column");
    }

    let mut builder = ZipIndexBuilder::default();

    for row in &table.rows {
        let Some(zip) = ZipCode::parse(row.get(zip_col.index).unwrap_or("")) else {
            continue;
        };

        if let Some(col) = id_col {
            let cell = row.get(col.index).unwrap_or("");
            match col.name {
                LONG_ID_COLUMN => builder.add_providers(&zip, parse_provider_id(cell)),
                _ => builder.add_providers(&zip, parse_id_list(cell)),
            }
        }

        if let Some(col) = county_col {
            builder.add_counties(&zip, split_county_names(row.get(col.index).unwrap_or("")));
        }
    }

    Ok(builder.build())
}
