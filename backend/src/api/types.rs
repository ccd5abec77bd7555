//! REST API response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::index::DataSnapshot;
use crate::lookup::ZipLookup;
use crate::models::{LoadSource, ProviderId, ZipCode};

/// `GET /health` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    /// Whether the provider directory has any entries
    pub providers_loaded: bool,
    /// Provider directory size
    pub providers_count: usize,
    /// ZIP codes with at least one provider
    pub zips_loaded: usize,
    /// ZIP codes with at least one county name
    pub counties_loaded: usize,
    /// Load path that produced the ZIP index
    pub source: LoadSource,
    pub loaded_at: DateTime<Utc>,
    /// Degrade events recorded during load
    pub warnings: Vec<String>,
}

impl From<&DataSnapshot> for HealthResponse {
    fn from(snapshot: &DataSnapshot) -> Self {
        HealthResponse {
            ok: true,
            providers_loaded: !snapshot.directory.is_empty(),
            providers_count: snapshot.directory.len(),
            zips_loaded: snapshot.index.providers.len(),
            counties_loaded: snapshot.index.counties.len(),
            source: snapshot.source,
            loaded_at: snapshot.loaded_at,
            warnings: snapshot.warnings.clone(),
        }
    }
}

/// One provider in a by-zip response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEntry {
    pub provider_id: ProviderId,
    pub provider_name: String,
}

/// `GET /api/providers/by-zip` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersByZipResponse {
    /// Zero-padded 5-digit ZIP
    pub zip: ZipCode,
    pub counties: Vec<String>,
    pub providers: Vec<ProviderEntry>,
    pub providers_count: usize,
    /// False when the ZIP is absent from the loaded data, as opposed to
    /// present with no providers
    pub zip_known: bool,
    pub source: LoadSource,
}

impl From<ZipLookup> for ProvidersByZipResponse {
    fn from(lookup: ZipLookup) -> Self {
        let providers: Vec<ProviderEntry> = lookup
            .providers
            .into_iter()
            .map(|p| ProviderEntry {
                provider_id: p.id,
                provider_name: p.name,
            })
            .collect();

        ProvidersByZipResponse {
            zip: lookup.zip,
            counties: lookup.counties,
            providers_count: providers.len(),
            providers,
            zip_known: lookup.zip_known,
            source: lookup.source,
        }
    }
}

/// Create an error response
pub fn error_response(detail: &str) -> Value {
    json!({ "detail": detail })
}
