//! Export of the mapping table as CSV.
//!
//! The file layout is fixed: a header row with
//! `Variable,Source,ID,Unit,Organ_System,Group,Status` followed by one line per
//! export row, in table order. Files are named
//! `variable-mapping-<YYYY-MM-DD>.csv`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use csv::{Terminator, WriterBuilder};
use thiserror::Error;
use tracing::info;

use varmap_model::{EXPORT_COLUMNS, ExportRow};

/// MIME type of the exported file.
pub const EXPORT_MIME: &str = "text/csv";

const FILENAME_PREFIX: &str = "variable-mapping";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush CSV output: {0}")]
    Flush(#[source] std::io::Error),
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ExportError>;

/// A rendered export, ready to be saved or offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl CsvExport {
    /// Render `rows` with a filename for `date`.
    pub fn render(rows: &[ExportRow], date: NaiveDate) -> Result<Self> {
        Ok(Self {
            filename: export_filename(date),
            mime: EXPORT_MIME,
            bytes: export_csv_bytes(rows)?,
        })
    }

    /// Write the export into `dir` under its filename, creating `dir` if
    /// needed.
    pub fn save_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.filename);
        fs::create_dir_all(dir).map_err(|source| ExportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        fs::write(&path, &self.bytes).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), bytes = self.bytes.len(), "Wrote mapping export");
        Ok(path)
    }
}

/// `variable-mapping-<YYYY-MM-DD>.csv`
pub fn export_filename(date: NaiveDate) -> String {
    format!("{FILENAME_PREFIX}-{}.csv", date.format("%Y-%m-%d"))
}

/// Today's date in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Write the header and one record per row.
///
/// The header is written even when `rows` is empty.
pub fn write_export_csv<W: Write>(writer: W, rows: &[ExportRow]) -> Result<W> {
    let mut csv_writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);
    csv_writer.write_record(EXPORT_COLUMNS)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.into_error()))
}

pub fn export_csv_bytes(rows: &[ExportRow]) -> Result<Vec<u8>> {
    write_export_csv(Vec::new(), rows)
}
