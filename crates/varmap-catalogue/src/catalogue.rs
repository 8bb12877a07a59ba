//! The in-memory variable catalogue.
//!
//! A catalogue is an ordered, id-unique list of [`VariableRecord`]s. The
//! built-in seed covers nine bedside monitoring variables; a site can swap in
//! its own list from a CSV file with the columns
//! `id,name,organ_system,group,epic_id,pdms_id,unit`.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, info};

use varmap_model::VariableRecord;

use crate::error::{CatalogueError, Result};
use crate::seed::seed_records;

const REQUIRED_COLUMNS: [&str; 4] = ["id", "name", "organ_system", "group"];

/// Ordered collection of catalogue records with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalogue {
    records: Vec<VariableRecord>,
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::seed()
    }
}

impl Catalogue {
    /// The built-in nine-record catalogue.
    pub fn seed() -> Self {
        Self {
            records: seed_records(),
        }
    }

    /// Load a catalogue CSV from disk.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(|source| CatalogueError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let catalogue = Self::from_csv_reader(reader)?;
        info!(
            path = %path.display(),
            records = catalogue.len(),
            "Loaded catalogue"
        );
        Ok(catalogue)
    }

    /// Load a catalogue CSV from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_csv_reader(ReaderBuilder::new().has_headers(true).from_reader(reader))
    }

    fn from_csv_reader<R: Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(normalize_header)
            .collect();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(CatalogueError::MissingColumn { column });
            }
        }

        let mut records = Vec::new();
        let mut seen = BTreeSet::new();
        for row in reader.records() {
            let row = row?;
            let line = row.position().map_or(0, csv::Position::line);
            let fields: BTreeMap<&str, &str> = headers
                .iter()
                .map(String::as_str)
                .zip(row.iter().map(str::trim))
                .collect();
            let get = |key: &str| fields.get(key).copied().unwrap_or("").to_string();

            let record = VariableRecord {
                id: get("id"),
                name: get("name"),
                organ_system: get("organ_system"),
                group: get("group"),
                epic_id: get("epic_id"),
                pdms_id: get("pdms_id"),
                unit: get("unit"),
            };
            if record.id.is_empty() {
                return Err(CatalogueError::BlankField { line, field: "id" });
            }
            if record.name.is_empty() {
                return Err(CatalogueError::BlankField {
                    line,
                    field: "name",
                });
            }
            if !seen.insert(record.id.clone()) {
                return Err(CatalogueError::DuplicateId { id: record.id });
            }
            records.push(record);
        }
        debug!(records = records.len(), "Parsed catalogue rows");
        Ok(Self { records })
    }

    pub fn records(&self) -> &[VariableRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VariableRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&VariableRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Distinct organ systems in first-seen order.
    pub fn organ_systems(&self) -> Vec<&str> {
        let mut systems: Vec<&str> = Vec::new();
        for record in &self.records {
            if !systems.contains(&record.organ_system.as_str()) {
                systems.push(&record.organ_system);
            }
        }
        systems
    }

    /// Ids of records whose name matches any of `names`, ignoring case and
    /// surrounding whitespace. Returned in catalogue order.
    pub fn match_names<I, S>(&self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let wanted: BTreeSet<String> = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_lowercase())
            .filter(|n| !n.is_empty())
            .collect();
        self.records
            .iter()
            .filter(|r| wanted.contains(&r.name.trim().to_lowercase()))
            .map(|r| r.id.clone())
            .collect()
    }
}

impl<'a> IntoIterator for &'a Catalogue {
    type Item = &'a VariableRecord;
    type IntoIter = std::slice::Iter<'a, VariableRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}
