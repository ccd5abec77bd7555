//! # Zipfinder - which service providers operate in a ZIP code
//!
//! Zipfinder loads a provider directory and ZIP/county reference tables once
//! at startup, reconciles them into in-memory indices, and answers point
//! lookups over HTTP.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │  CSV tables  │────▶│   Parser    │────▶│    Index     │────▶│  HTTP API   │
//! │ (any enc.)   │     │ (headers)   │     │ (direct/join)│     │ (by-zip)    │
//! └──────────────┘     └─────────────┘     └──────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use zipfinder::{load_snapshot, lookup, DataPaths, ZipCode};
//!
//! let snapshot = load_snapshot(&DataPaths::default());
//! let zip = ZipCode::parse("90001").unwrap();
//! println!("{} providers", lookup(&snapshot, &zip).providers.len());
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types per layer
//! - [`config`] - Data paths and listen address
//! - [`models`] - ZIP, FIPS and provider identifiers
//! - [`parser`] - CSV reading and header normalization
//! - [`index`] - Provider directory and ZIP index builders
//! - [`lookup`] - Point lookups against a loaded snapshot
//! - [`api`] - HTTP API server

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Index building
pub mod index;

// Lookup
pub mod lookup;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ColumnNotFound,
    CsvError,
    LoadError,
    LookupError,
    ServerError,
};

// =============================================================================
// Re-exports - Config & Models
// =============================================================================

pub use config::{DataPaths, ServerConfig};

pub use models::{
    parse_provider_id,
    CountyFips,
    LoadSource,
    ProviderId,
    ZipCode,
    UNKNOWN_PROVIDER,
};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    normalize_column,
    normalize_headers,
    parse_bytes_auto,
    parse_csv_file_auto,
    resolve_column,
    Table,
};

// =============================================================================
// Re-exports - Index
// =============================================================================

pub use index::{
    load_snapshot,
    DataSnapshot,
    ProviderDirectory,
    ZipIndex,
};

// =============================================================================
// Re-exports - Lookup
// =============================================================================

pub use lookup::{lookup, parse_zip_query, ZipLookup};

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::types::{
    error_response,
    HealthResponse,
    ProviderEntry,
    ProvidersByZipResponse,
};

// Server
pub mod server {
    pub use crate::api::server::{build_router, start_server};
}
