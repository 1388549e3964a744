use std::fmt;
use std::path::PathBuf;

/// Why a series could not be loaded. Every variant aborts the whole load.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// The file could not be opened or read
    Io { path: PathBuf, reason: String },
    /// Malformed delimited data (ragged rows, bad UTF-8, ...)
    Csv { reason: String },
    /// No usable timestamp column, or required value columns are missing
    Schema(String),
    /// A timestamp value could not be parsed (1-based data row)
    Parse { row: usize, value: String },
    /// A price or volume value is not a number (1-based data row)
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },
    /// Header present but no data rows
    NoRows,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, reason } => {
                write!(f, "Cannot read {}: {}", path.display(), reason)
            }
            LoadError::Csv { reason } => write!(f, "Malformed CSV: {}", reason),
            LoadError::Schema(msg) => write!(f, "Schema error: {}", msg),
            LoadError::Parse { row, value } => {
                write!(f, "Parse error: row {} has an invalid timestamp '{}'", row, value)
            }
            LoadError::InvalidNumber { row, column, value } => write!(
                f,
                "Parse error: row {} has a non-numeric {} value '{}'",
                row, column, value
            ),
            LoadError::NoRows => write!(f, "The file contains no data rows"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::Csv {
            reason: err.to_string(),
        }
    }
}
