//! Error types for the data pipeline.
//!
//! Loading is the only fallible stage: filtering, aggregation, normalization
//! and chart construction are total over whatever the loader produced.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading the source table.
#[derive(Error, Debug)]
pub enum DataError {
    /// The data file could not be opened or read.
    #[error("Failed to read data file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed delimited input (ragged rows, bad UTF-8, ...).
    #[error("Malformed CSV input: {0}")]
    Csv(#[from] csv::Error),

    /// A column the aggregation needs is absent from the header.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// An indicator cell that is neither null nor a finite number.
    #[error("Invalid number {value:?} in column '{column}' at row {row}")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },
}

/// Result type alias for data pipeline operations.
pub type Result<T> = std::result::Result<T, DataError>;
