//! Error types for mapping CSV import.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while importing a mapping configuration.
#[derive(Debug, Error)]
pub enum ImportError {
    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the import size limit.
    #[error("file {path} is too large ({size} bytes, limit {max_size})")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    // === CSV Parsing Errors ===
    /// Malformed CSV content.
    #[error("could not read CSV: {source}")]
    CsvParse {
        #[from]
        source: csv::Error,
    },

    /// No header row.
    #[error("CSV file is empty")]
    EmptyCsv,

    /// Required column not found in the header row.
    #[error("required column '{column}' not found")]
    MissingColumn { column: &'static str },
}

/// Result type for import operations.
pub type Result<T> = std::result::Result<T, ImportError>;
