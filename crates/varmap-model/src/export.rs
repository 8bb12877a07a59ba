//! Export table rows and the manual-entry form.

use serde::{Deserialize, Serialize};

use crate::enums::{RowStatus, SourceCoverage};
use crate::error::ValidationError;
use crate::record::VariableRecord;

/// Column headers of an exported mapping, in file order.
pub const EXPORT_COLUMNS: [&str; 7] = [
    "Variable",
    "Source",
    "ID",
    "Unit",
    "Organ_System",
    "Group",
    "Status",
];

/// Units offered when a variable is added by hand.
pub const UNIT_CHOICES: [&str; 9] = [
    "bpm",
    "mmHg",
    "L/min",
    "%",
    "breaths/min",
    "score",
    "mg/dL",
    "°C",
    "custom",
];

/// One row of the editable export table.
///
/// Field names serialize to the exported CSV headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    #[serde(rename = "Variable")]
    pub variable: String,
    #[serde(rename = "Source")]
    pub source: SourceCoverage,
    #[serde(rename = "ID")]
    pub id_code: String,
    #[serde(rename = "Unit")]
    pub unit: String,
    #[serde(rename = "Organ_System")]
    pub organ_system: String,
    #[serde(rename = "Group")]
    pub group: String,
    #[serde(rename = "Status")]
    pub status: RowStatus,
}

impl ExportRow {
    /// Rebuild a catalogue-shaped record from this row.
    ///
    /// The identifier code is split back into EPIC/PDMS parts according to
    /// `source`.
    pub fn to_record(&self, id: impl Into<String>) -> VariableRecord {
        let (epic_id, pdms_id) = match self.source {
            SourceCoverage::Both => match self.id_code.split_once(" / ") {
                Some((epic, pdms)) => (epic.to_string(), pdms.to_string()),
                None => (self.id_code.clone(), self.id_code.clone()),
            },
            SourceCoverage::Epic => (self.id_code.clone(), String::new()),
            SourceCoverage::Pdms => (String::new(), self.id_code.clone()),
            SourceCoverage::Unavailable => (String::new(), String::new()),
        };
        VariableRecord {
            id: id.into(),
            name: self.variable.clone(),
            organ_system: self.organ_system.clone(),
            group: self.group.clone(),
            epic_id,
            pdms_id,
            unit: self.unit.clone(),
        }
    }
}

/// Fields of the "Add variable" form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualRowInput {
    pub name: String,
    pub source: SourceCoverage,
    pub id_code: String,
    pub unit: String,
    pub organ_system: String,
    pub group: String,
}

impl Default for ManualRowInput {
    fn default() -> Self {
        Self {
            name: String::new(),
            source: SourceCoverage::Epic,
            id_code: String::new(),
            unit: UNIT_CHOICES[0].to_string(),
            organ_system: String::new(),
            group: String::new(),
        }
    }
}

impl ManualRowInput {
    pub fn new(name: impl Into<String>, source: SourceCoverage, id_code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source,
            id_code: id_code.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    #[must_use]
    pub fn with_organ_system(mut self, organ_system: impl Into<String>) -> Self {
        self.organ_system = organ_system.into();
        self
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Check the required fields; name first, then ID code.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.id_code.trim().is_empty() {
            return Err(ValidationError::MissingIdCode);
        }
        Ok(())
    }

    /// Parse the pipe-separated form `name|source|id|unit|organ|group`.
    ///
    /// Only name, source and id are required; missing trailing fields keep
    /// their defaults.
    pub fn parse_pipe(value: &str) -> Result<Self, ValidationError> {
        let parts: Vec<&str> = value.split('|').map(str::trim).collect();
        let field = |idx: usize| parts.get(idx).copied().unwrap_or("");
        let source = field(1)
            .parse::<SourceCoverage>()
            .map_err(ValidationError::InvalidSource)?;
        let mut input = Self::new(field(0), source, field(2));
        if !field(3).is_empty() {
            input.unit = field(3).to_string();
        }
        input.organ_system = field(4).to_string();
        input.group = field(5).to_string();
        input.validate()?;
        Ok(input)
    }
}
