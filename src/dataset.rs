//! Surgical vitals dataset loading.
//!
//! The input is a long-format CSV with one observation per row. Columns are
//! matched by header name, so their order does not matter and extra columns
//! are ignored. Every column has a declared type up front: a numeric cell
//! that fails to parse is reported with its line number instead of silently
//! turning into text.

use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Columns that must be present in the header row
pub const REQUIRED_COLUMNS: &[&str] = &["signal", "norm_time", "value", "optype", "emop"];

/// Errors produced while loading a dataset
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),
    #[error("malformed CSV{}: {source}", describe_line(*.line))]
    Csv {
        line: Option<u64>,
        #[source]
        source: csv::Error,
    },
    #[error("dataset contains no observations")]
    Empty,
}

fn describe_line(line: Option<u64>) -> String {
    line.map(|l| format!(" at line {}", l)).unwrap_or_default()
}

impl From<csv::Error> for LoadError {
    fn from(source: csv::Error) -> Self {
        let line = source.position().map(|p| p.line());
        LoadError::Csv { line, source }
    }
}

/// Raw record as declared in the file; cleaned up into a [`VitalRow`]
#[derive(Debug, Deserialize)]
struct RawRecord {
    signal: String,
    norm_time: Option<f64>,
    value: Option<f64>,
    optype: String,
    emop: String,
}

/// One observation of one vital sign during one surgery
#[derive(Clone, Debug, PartialEq)]
pub struct VitalRow {
    /// Vital-sign name, lowercased
    pub signal: String,
    /// Surgery progress in [0, 1]
    pub norm_time: Option<f64>,
    /// Measured value
    pub value: Option<f64>,
    /// Surgery type, canonicalized (see [`canonical_key`])
    pub optype: String,
    /// Emergency status, canonicalized (see [`canonical_key`])
    pub emop: String,
}

impl From<RawRecord> for VitalRow {
    fn from(raw: RawRecord) -> Self {
        Self {
            signal: raw.signal.to_lowercase(),
            norm_time: raw.norm_time,
            value: raw.value,
            optype: canonical_key(&raw.optype),
            emop: canonical_key(&raw.emop),
        }
    }
}

/// Canonical text form of a categorical cell.
///
/// Numbers are printed in their shortest form (`"0.0"`, `"00"` and `"-0"`
/// become `"0"`), switching to exponent notation (`"1e+21"`, `"1e-7"`)
/// outside `[1e-6, 1e21)`. Booleans are lowercased and empty cells become
/// `"null"`.
pub fn canonical_key(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "null".to_string();
    }
    if trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("false") {
        return trimmed.to_ascii_lowercase();
    }
    match trimmed.parse::<f64>() {
        Ok(number) if number.is_finite() => format_number(number),
        _ => trimmed.to_string(),
    }
}

fn format_number(number: f64) -> String {
    // Negative zero shares the key of zero
    if number == 0.0 {
        return "0".to_string();
    }
    if (1e-6..1e21).contains(&number.abs()) {
        return number.to_string();
    }
    let text = format!("{:e}", number);
    if text.contains("e-") {
        text
    } else {
        text.replacen('e', "e+", 1)
    }
}

/// The full set of observations, read-only after load
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    pub rows: Vec<VitalRow>,
}

impl Dataset {
    /// Build a dataset from already-cleaned rows
    pub fn from_rows(rows: Vec<VitalRow>) -> Self {
        Self { rows }
    }

    /// Load a dataset from a CSV file on disk
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_reader(file)?;
        tracing::info!(
            "Loaded {} observations from {}",
            dataset.rows.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Parse a dataset from any CSV source
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == *column) {
                return Err(LoadError::MissingColumn(column));
            }
        }

        let mut rows = Vec::new();
        for record in reader.deserialize::<RawRecord>() {
            rows.push(VitalRow::from(record?));
        }

        if rows.is_empty() {
            return Err(LoadError::Empty);
        }

        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
