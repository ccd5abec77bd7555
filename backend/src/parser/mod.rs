//! CSV table reader with encoding and delimiter auto-detection.
//!
//! Every cell is kept as a string so identifiers keep their leading zeros.
//! Headers are normalized at read time (see [`columns`]).

pub mod columns;

use csv::{ReaderBuilder, StringRecord, Trim};
use encoding_rs::Encoding;
use std::path::Path;

use crate::error::{ColumnNotFound, CsvError, CsvResult};
pub use columns::{normalize_column, normalize_headers, resolve_column, ColumnMatch};

/// Bytes handed to chardet; large exports are decided on their head.
const ENCODING_SAMPLE_BYTES: usize = 64 * 1024;

/// A parsed CSV file.
#[derive(Debug, Clone)]
pub struct Table {
    /// Normalized column keys
    pub headers: Vec<String>,
    /// Header labels as they appear in the file
    pub raw_headers: Vec<String>,
    /// Data rows
    pub rows: Vec<StringRecord>,
    /// Detected encoding
    pub encoding: String,
    /// Detected delimiter
    pub delimiter: char,
}

impl Table {
    /// Resolve the first present column among `candidates`.
    pub fn resolve<'c>(&self, candidates: &[&'c str]) -> Result<ColumnMatch<'c>, ColumnNotFound> {
        resolve_column(&self.headers, candidates)
    }

    /// Cell values of one column, `""` where a short row lacks it.
    pub fn cells(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(move |row| row.get(index).unwrap_or(""))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let sample = &bytes[..bytes.len().min(ENCODING_SAMPLE_BYTES)];
    let charset = chardet::detect(sample).0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to a string using the given encoding.
///
/// Valid UTF-8 is always taken as-is. Otherwise the detected label is
/// looked up in encoding_rs; a `utf-8` verdict on invalid input means
/// the sample was ASCII and the stray bytes came later, so those files
/// and unrecognized labels are read as Windows-1252.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }
    let decoder = match encoding {
        "utf-8" => encoding_rs::WINDOWS_1252,
        other => Encoding::for_label(other.as_bytes()).unwrap_or(encoding_rs::WINDOWS_1252),
    };
    tracing::debug!(detected = encoding, used = decoder.name(), "decoding non-UTF-8 input");
    decoder.decode(bytes).0.into_owned()
}

/// Detect the delimiter by counting occurrences in the header line.
/// Ties and header-less input fall back to a comma.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse CSV text with an explicit delimiter.
pub fn parse_str(content: &str, delimiter: char, encoding: String) -> CsvResult<Table> {
    if content.trim().is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let raw_headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if raw_headers.iter().all(|h| h.trim().is_empty()) {
        return Err(CsvError::NoHeaders);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        rows.push(record);
    }

    Ok(Table {
        headers: normalize_headers(&raw_headers),
        raw_headers,
        rows,
        encoding,
        delimiter,
    })
}

/// Parse CSV bytes with auto-detection of encoding and delimiter.
pub fn parse_bytes_auto(bytes: &[u8]) -> CsvResult<Table> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    let delimiter = detect_delimiter(&content);
    parse_str(&content, delimiter, encoding)
}

/// Read and parse a CSV file with auto-detection of encoding and delimiter.
pub fn parse_csv_file_auto<P: AsRef<Path>>(path: P) -> CsvResult<Table> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes_auto(&bytes)
}
