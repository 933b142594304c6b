use std::path::PathBuf;
use thiserror::Error;

use crate::models::Dialect;

/// All errors produced by the Liftlog ingestion pipeline.
#[derive(Error, Debug)]
pub enum LiftError {
    /// A workout export could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not well-formed delimited text under `dialect`.
    ///
    /// For the comma dialect this triggers the semicolon fallback; for the
    /// semicolon dialect it is fatal to the file.
    #[error("Malformed {dialect}-delimited text: {source}")]
    CsvParse {
        dialect: Dialect,
        #[source]
        source: csv::Error,
    },

    /// A row's timestamp field did not match `YYYY-MM-DD HH:MM:SS`.
    /// Fatal to the whole file.
    #[error("Parsing timestamp failed at row {row}: {value:?}")]
    TimestampParse { row: usize, value: String },

    /// A row is too short to contain a required column. Fatal to the file.
    #[error("Row {row} has no column {column}")]
    MissingColumn { row: usize, column: usize },

    /// The configured storage directory does not exist.
    #[error("Storage directory not found: {0}")]
    StorageDirNotFound(PathBuf),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the Liftlog crates.
pub type Result<T> = std::result::Result<T, LiftError>;
