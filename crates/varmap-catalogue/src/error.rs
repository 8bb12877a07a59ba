//! Error types for catalogue loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building a catalogue.
#[derive(Debug, Error)]
pub enum CatalogueError {
    /// Failed to open or read the catalogue file.
    #[error("failed to read catalogue {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Malformed CSV content.
    #[error("failed to parse catalogue CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Required column missing from the header row.
    #[error("required column '{column}' not found in catalogue")]
    MissingColumn { column: &'static str },

    /// A record has a blank required field.
    #[error("catalogue line {line}: '{field}' must not be blank")]
    BlankField { line: u64, field: &'static str },

    /// Two records share an id.
    #[error("duplicate catalogue id '{id}'")]
    DuplicateId { id: String },
}

/// Result type for catalogue operations.
pub type Result<T> = std::result::Result<T, CatalogueError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CatalogueError::BlankField {
            line: 3,
            field: "name",
        };
        assert_eq!(err.to_string(), "catalogue line 3: 'name' must not be blank");
    }
}
