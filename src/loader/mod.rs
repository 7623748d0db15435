//! # Table Loader Module
//!
//! Parses delimited text (CSV by default) into a [`Table`] with every cell read
//! as text.
//!
//! ## Degrade, don't fail
//!
//! A structural fault (a record with more fields than the header, or a record
//! that is not valid UTF-8) aborts the strict first pass. The loader then
//! retries once in lenient mode, skipping offending records, and reports how
//! many were dropped. Only a fault that survives the lenient pass, such as a
//! missing header, reaches the caller.
//!
//! Short records are padded with nulls and blank lines are skipped. Cells that
//! match one of [`LoadOptions::null_values`] become null.
//!
//! ## Example
//!
//! ```rust
//! use pepvar::loader::{load_bytes, LoadOptions};
//!
//! let data = b"NP,GI\nNP_001,GI_100\nNP_002,\n";
//! let loaded = load_bytes("tabela_np_gi", data, &LoadOptions::default())?;
//!
//! assert_eq!(loaded.report.rows, 2);
//! assert_eq!(loaded.table.value(1, "GI")?, None);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;


pub use error::LoadError;

use std::collections::HashSet;
use std::path::Path;

use log::{debug, info, warn};
use serde::Serialize;

use crate::table::{Row, Table};

/// Tokens read as null, mirroring the default NA set of pandas `read_csv`
pub const DEFAULT_NULL_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Options controlling how a delimited source is parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Field delimiter byte
    pub delimiter: u8,
    /// Cell values that are read as null
    pub null_values: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            null_values: DEFAULT_NULL_VALUES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl LoadOptions {
    /// Use a different field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Replace the set of null tokens
    pub fn with_null_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.null_values = values.into_iter().map(Into::into).collect();
        self
    }
}

/// How structural faults are handled during a parse pass
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseMode {
    /// Any malformed record is an error
    Strict,
    /// Malformed records are skipped and counted
    Lenient,
}

/// Diagnostics describing one load
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Source name (usually the file path)
    pub source: String,
    /// Rows kept
    pub rows: usize,
    /// Column names after header normalization
    pub columns: Vec<String>,
    /// Records dropped by the lenient pass
    pub skipped_rows: usize,
    /// Whether the lenient pass was needed
    pub lenient: bool,
}

/// A parsed table together with its load diagnostics
#[derive(Debug, Clone)]
pub struct LoadedTable {
    /// The parsed table
    pub table: Table,
    /// Diagnostics for the load
    pub report: LoadReport,
}

/// Load a delimited file, retrying leniently on a structural fault
pub fn load<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<LoadedTable, LoadError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    load_bytes(path.display().to_string(), &bytes, options)
}

/// Load an in-memory delimited source, retrying leniently on a structural fault
pub fn load_bytes(
    name: impl Into<String>,
    bytes: &[u8],
    options: &LoadOptions,
) -> Result<LoadedTable, LoadError> {
    let name = name.into();
    let loaded = match parse(&name, bytes, options, ParseMode::Strict) {
        Ok(loaded) => loaded,
        Err(err) if err.is_parse_fault() => {
            warn!("Error reading '{}': {}", name, err);
            let loaded = parse(&name, bytes, options, ParseMode::Lenient)?;
            info!(
                "'{}' read after skipping {} malformed rows",
                name, loaded.report.skipped_rows
            );
            loaded
        }
        Err(err) => return Err(err),
    };

    info!("File '{}' read successfully. Rows: {}", name, loaded.report.rows);
    info!("Columns in '{}': {:?}", name, loaded.report.columns);

    Ok(loaded)
}

/// Run a single parse pass in the given mode
pub fn parse(
    name: &str,
    bytes: &[u8],
    options: &LoadOptions,
    mode: ParseMode,
) -> Result<LoadedTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let raw_headers = reader.byte_headers()?.clone();
    if raw_headers.is_empty() {
        return Err(LoadError::Empty(name.to_string()));
    }

    let mut headers = Vec::with_capacity(raw_headers.len());
    for field in raw_headers.iter() {
        let field = std::str::from_utf8(field).map_err(|_| LoadError::Parse {
            source_name: name.to_string(),
            line: 1,
            message: "header is not valid UTF-8".to_string(),
        })?;
        headers.push(field.trim_start_matches('\u{feff}').to_string());
    }
    let columns = normalize_headers(headers);
    let width = columns.len();

    let nulls: HashSet<&str> = options.null_values.iter().map(String::as_str).collect();
    let mut table = Table::new(name, columns.clone())?;
    let mut skipped_rows = 0;
    let mut record = csv::ByteRecord::new();

    loop {
        let line = reader.position().line();
        match reader.read_byte_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) if err.is_io_error() || mode == ParseMode::Strict => {
                return Err(LoadError::Parse {
                    source_name: name.to_string(),
                    line,
                    message: err.to_string(),
                });
            }
            Err(err) => {
                debug!("Skipping record near line {} of '{}': {}", line, name, err);
                skipped_rows += 1;
                continue;
            }
        }

        let line = record.position().map(|p| p.line()).unwrap_or(line);
        if width > 1 && record.len() == 1 && record[0].is_empty() {
            continue;
        }

        match decode_record(&record, width, &nulls) {
            Ok(row) => table.push_row(row)?,
            Err(message) if mode == ParseMode::Strict => {
                return Err(LoadError::Parse {
                    source_name: name.to_string(),
                    line,
                    message,
                });
            }
            Err(message) => {
                debug!("Skipping line {} of '{}': {}", line, name, message);
                skipped_rows += 1;
            }
        }
    }

    let report = LoadReport {
        source: name.to_string(),
        rows: table.len(),
        columns,
        skipped_rows,
        lenient: mode == ParseMode::Lenient,
    };

    Ok(LoadedTable { table, report })
}

/// Convert one record into a row of exactly `width` cells
fn decode_record(
    record: &csv::ByteRecord,
    width: usize,
    nulls: &HashSet<&str>,
) -> Result<Row, String> {
    if record.len() > width {
        return Err(format!("expected {} fields, saw {}", width, record.len()));
    }

    let mut row = Row::with_capacity(width);
    for field in record.iter() {
        let value = std::str::from_utf8(field).map_err(|_| "field is not valid UTF-8".to_string())?;
        if nulls.contains(value) {
            row.push(None);
        } else {
            row.push(Some(value.to_string()));
        }
    }
    row.resize(width, None);

    Ok(row)
}

/// Name blank headers `Unnamed: {i}` and suffix repeats with `.1`, `.2`, ...
fn normalize_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(headers.len());
    let mut columns = Vec::with_capacity(headers.len());

    for (i, header) in headers.into_iter().enumerate() {
        let base = if header.trim().is_empty() {
            format!("Unnamed: {}", i)
        } else {
            header
        };

        let mut candidate = base.clone();
        let mut n = 0;
        while seen.contains(&candidate) {
            n += 1;
            candidate = format!("{}.{}", base, n);
        }

        seen.insert(candidate.clone());
        columns.push(candidate);
    }

    columns
}
