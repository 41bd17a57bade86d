use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while normalizing one record.
#[derive(Debug, Error)]
pub enum RecordError {
    /// A numeric field is absent from the record.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// A numeric field holds text that is not a base-10 integer.
    #[error("Invalid integer for field '{field}': {value:?}")]
    InvalidInteger {
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// A field expected to hold raw CSV text holds some other JSON value.
    #[error("Field '{0}' is not a text value")]
    NotText(&'static str),
}

/// Top-level conversion errors.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Failed to open input file: {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create output file: {}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV or invalid UTF-8 in the input.
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Input ended inside a quoted field.
    #[error("Unterminated quoted field starting on line {line}")]
    UnterminatedQuote { line: u64 },

    #[error("Line {line}: {source}")]
    Record {
        line: u64,
        #[source]
        source: RecordError,
    },

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Write(#[source] std::io::Error),
}

pub type RecordResult<T> = Result<T, RecordError>;

pub type ConvertResult<T> = Result<T, ConvertError>;
