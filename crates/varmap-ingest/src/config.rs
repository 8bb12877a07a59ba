//! Reading a previously exported mapping back in.
//!
//! Any CSV with a `Variable` column is accepted. The whole table is kept for
//! display; only the `Variable` column is used to pre-select catalogue
//! entries.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, info};

use crate::error::{ImportError, Result};

/// Column holding the variable names.
pub const VARIABLE_COLUMN: &str = "Variable";

/// Maximum file size accepted for import (10 MB).
pub const MAX_IMPORT_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Number of rows shown when previewing an imported table.
pub const PREVIEW_ROWS: usize = 5;

/// A previously exported mapping table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedConfig {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    variable_idx: usize,
    source_name: Option<String>,
}

impl ImportedConfig {
    /// Build a table from headers and rows; fails without a `Variable` column.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let variable_idx = find_variable_column(&headers)?;
        Ok(Self {
            headers,
            rows,
            variable_idx,
            source_name: None,
        })
    }

    /// Table with only a `Variable` column.
    pub fn from_variable_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: vec![VARIABLE_COLUMN.to_string()],
            rows: names.into_iter().map(|n| vec![n.into()]).collect(),
            variable_idx: 0,
            source_name: None,
        }
    }

    #[must_use]
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    /// File name the table was loaded from, if known.
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of the `Variable` column, as written.
    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(|row| row.get(self.variable_idx).map_or("", String::as_str))
    }

    /// First [`PREVIEW_ROWS`] rows.
    pub fn preview(&self) -> &[Vec<String>] {
        &self.rows[..self.rows.len().min(PREVIEW_ROWS)]
    }
}

/// Parse a mapping CSV from any reader.
pub fn read_config<R: Read>(reader: R) -> Result<ImportedConfig> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(normalize_header).collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(ImportError::EmptyCsv);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(normalize_cell).collect());
    }
    debug!(columns = headers.len(), rows = rows.len(), "Parsed mapping CSV");
    ImportedConfig::new(headers, rows)
}

/// Load a mapping CSV from disk.
pub fn read_config_path(path: &Path) -> Result<ImportedConfig> {
    check_file_size(path, MAX_IMPORT_FILE_SIZE)?;
    let file = File::open(path).map_err(|e| io_error(path, e))?;
    let config = read_config(file)?;
    let config = match path.file_name() {
        Some(name) => config.with_source_name(name.to_string_lossy()),
        None => config,
    };
    info!(
        path = %path.display(),
        rows = config.len(),
        "Loaded mapping configuration"
    );
    Ok(config)
}

/// Check file size against a limit before loading.
pub fn check_file_size(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| io_error(path, e))?;
    if metadata.len() > max_size {
        return Err(ImportError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

fn io_error(path: &Path, error: std::io::Error) -> ImportError {
    if error.kind() == std::io::ErrorKind::NotFound {
        ImportError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        ImportError::FileRead {
            path: path.to_path_buf(),
            source: error,
        }
    }
}

fn find_variable_column(headers: &[String]) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(VARIABLE_COLUMN))
        .ok_or(ImportError::MissingColumn {
            column: VARIABLE_COLUMN,
        })
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_exported_mapping() {
        let data = "Variable,Source,ID,Unit,Organ_System,Group,Status\n\
                    Heart Rate,Both,E-HR-001 / P-HR-001,bpm,Cardiology,Heart,Published\n\
                    SpO2,Both,E-SPO2-001 / P-SPO2-001,%,Respiratory,Lungs,Published\n";
        let config = read_config(data.as_bytes()).unwrap();
        assert_eq!(config.len(), 2);
        assert_eq!(config.headers().len(), 7);
        let names: Vec<&str> = config.variable_names().collect();
        assert_eq!(names, vec!["Heart Rate", "SpO2"]);
    }

    #[test]
    fn variable_column_matched_case_insensitively() {
        let data = "\u{feff} variable ,Notes\nheart rate,keep\n";
        let config = read_config(data.as_bytes()).unwrap();
        assert_eq!(config.variable_names().collect::<Vec<_>>(), vec!["heart rate"]);
    }

    #[test]
    fn missing_variable_column_is_an_error() {
        let data = "Name,Source\nHeart Rate,EPIC\n";
        let err = read_config(data.as_bytes()).unwrap_err();
        assert!(matches!(err, ImportError::MissingColumn { column: "Variable" }));
    }

    #[test]
    fn ragged_rows_are_malformed() {
        let data = "Variable,Source\nHeart Rate,EPIC,extra\n";
        let err = read_config(data.as_bytes()).unwrap_err();
        assert!(matches!(err, ImportError::CsvParse { .. }));
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = read_config("".as_bytes()).unwrap_err();
        assert!(matches!(err, ImportError::EmptyCsv));
    }

    #[test]
    fn header_only_file_has_no_rows() {
        let config = read_config("Variable\n".as_bytes()).unwrap();
        assert!(config.is_empty());
        assert!(config.preview().is_empty());
    }

    #[test]
    fn preview_is_capped() {
        let names: Vec<String> = (0..8).map(|i| format!("Var {i}")).collect();
        let config = ImportedConfig::from_variable_names(names);
        assert_eq!(config.preview().len(), PREVIEW_ROWS);
        assert_eq!(config.len(), 8);
    }
}
