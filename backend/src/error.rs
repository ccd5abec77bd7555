//! Error types for the zipfinder loader and lookup service.
//!
//! This module defines one error type per layer:
//!
//! - [`CsvError`] - Reading and decoding CSV files
//! - [`ColumnNotFound`] - Header resolution against candidate names
//! - [`LoadError`] - Building the provider directory and ZIP indices
//! - [`LookupError`] - Validating a ZIP query
//! - [`ServerError`] - HTTP boundary errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::{Path, PathBuf};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use crate::api::types::error_response;

// =============================================================================
// CSV Parsing Errors
// =============================================================================

/// Errors during CSV parsing.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid CSV format.
    #[error("Invalid CSV format: {0}")]
    ParseError(#[from] csv::Error),

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// No headers found.
    #[error("No headers found in CSV")]
    NoHeaders,
}

// =============================================================================
// Column Resolution
// =============================================================================

/// None of the candidate column names is present in a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("none of {candidates:?} found in columns {columns:?}")]
pub struct ColumnNotFound {
    /// Candidate names, in the order they were tried.
    pub candidates: Vec<String>,
    /// Normalized columns actually present.
    pub columns: Vec<String>,
}

// =============================================================================
// Load Errors
// =============================================================================

/// Errors while building the provider directory or a ZIP index.
///
/// None of these abort startup: the loader logs them and keeps an
/// empty structure in place of the failed one.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Source file does not exist.
    #[error("file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// A required column is absent.
    #[error("'{}': {}", .path.display(), .source)]
    MissingColumn {
        path: PathBuf,
        #[source]
        source: ColumnNotFound,
    },

    /// The file exists but could not be parsed.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),
}

impl LoadError {
    pub fn missing_column(path: &Path, source: ColumnNotFound) -> Self {
        Self::MissingColumn {
            path: path.to_path_buf(),
            source,
        }
    }
}

// =============================================================================
// Lookup Errors
// =============================================================================

/// Errors validating a ZIP query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The `zip` query parameter was not supplied.
    #[error("query parameter 'zip' is required")]
    MissingZip,

    /// The value is outside 3-10 characters or is not a ZIP code.
    #[error("invalid zip '{0}'")]
    InvalidZip(String),

    /// The query string itself could not be decoded.
    #[error("malformed query string: {0}")]
    MalformedQuery(String),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Query validation failed.
    #[error("{0}")]
    Lookup(#[from] LookupError),

    /// Unexpected failure while answering a request.
    #[error("Lookup failed: {0}")]
    Internal(String),

    /// Binding or serving failed.
    #[error("Server IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Lookup(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::Internal(_) | ServerError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(error_response(&self.to_string()))).into_response()
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for load operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type for lookup validation.
pub type LookupResult<T> = Result<T, LookupError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
