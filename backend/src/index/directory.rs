//! Provider directory: provider ID to display name.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::{ColumnNotFound, LoadError, LoadResult};
use crate::models::{parse_provider_id, ProviderId, UNKNOWN_PROVIDER};
use crate::parser::{parse_csv_file_auto, Table};

const ID_COLUMN: &str = "provider_id";

/// Name column aliases, in priority order.
pub const NAME_COLUMNS: &[&str] = &[
    "holding_company",
    "provider_name",
    "brand_name",
    "doing_business_as",
    "holding_company_name",
];

/// Provider ID to name mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderDirectory {
    names: HashMap<ProviderId, String>,
}

impl ProviderDirectory {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, id: ProviderId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Name for `id`, or the unknown-provider placeholder.
    pub fn name_or_unknown(&self, id: ProviderId) -> &str {
        self.get(id).unwrap_or(UNKNOWN_PROVIDER)
    }
}

impl FromIterator<(ProviderId, String)> for ProviderDirectory {
    fn from_iter<T: IntoIterator<Item = (ProviderId, String)>>(iter: T) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

/// Load the directory from a provider list file.
///
/// Returns the directory and the name column that was used.
pub fn load_directory(path: &Path) -> LoadResult<(ProviderDirectory, &'static str)> {
    if !path.exists() {
        return Err(LoadError::MissingFile(path.to_path_buf()));
    }
    let table = parse_csv_file_auto(path)?;
    directory_from_table(&table).map_err(|e| LoadError::missing_column(path, e))
}

/// Build the directory from a parsed table.
///
/// Rows with a blank ID or name, or an ID that is not an integer, are
/// dropped. Later rows overwrite earlier ones for the same ID. Cells are
/// already trimmed by the reader, so rows that differ only in padding
/// count as exact duplicates.
pub fn directory_from_table(
    table: &Table,
) -> Result<(ProviderDirectory, &'static str), ColumnNotFound> {
    let id_col = table.resolve(&[ID_COLUMN])?;
    let name_col = table.resolve(NAME_COLUMNS)?;

    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut names = HashMap::new();

    for row in &table.rows {
        let raw_id = row.get(id_col.index).unwrap_or("").trim();
        let name = row.get(name_col.index).unwrap_or("").trim();
        if raw_id.is_empty() || name.is_empty() || !seen.insert((raw_id, name)) {
            continue;
        }
        if let Some(id) = parse_provider_id(raw_id) {
            names.insert(id, name.to_string());
        }
    }

    Ok((ProviderDirectory { names }, name_col.name))
}
