//! Catalogue record definitions.

use serde::{Deserialize, Serialize};

use crate::enums::{DataSource, SourceCoverage};

/// A monitoring variable known to the catalogue.
///
/// Identifier fields hold opaque strings; an empty string means the variable
/// is not available in that system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableRecord {
    /// Unique catalogue key (e.g. "hr-001").
    pub id: String,
    /// Display name (e.g. "Heart Rate").
    pub name: String,
    /// Organ system (e.g. "Cardiology").
    pub organ_system: String,
    /// Sub-category within the organ system (e.g. "ECG").
    pub group: String,
    /// EPIC identifier, empty when unavailable.
    #[serde(default)]
    pub epic_id: String,
    /// PDMS identifier, empty when unavailable.
    #[serde(default)]
    pub pdms_id: String,
    /// Display unit.
    #[serde(default)]
    pub unit: String,
}

impl VariableRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        organ_system: impl Into<String>,
        group: impl Into<String>,
        epic_id: impl Into<String>,
        pdms_id: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            organ_system: organ_system.into(),
            group: group.into(),
            epic_id: epic_id.into(),
            pdms_id: pdms_id.into(),
            unit: unit.into(),
        }
    }

    pub fn has_epic(&self) -> bool {
        !self.epic_id.is_empty()
    }

    pub fn has_pdms(&self) -> bool {
        !self.pdms_id.is_empty()
    }

    /// Identifier for a given source, if the variable exists there.
    pub fn identifier(&self, source: DataSource) -> Option<&str> {
        let id = match source {
            DataSource::Epic => &self.epic_id,
            DataSource::Pdms => &self.pdms_id,
        };
        (!id.is_empty()).then_some(id.as_str())
    }

    pub fn coverage(&self) -> SourceCoverage {
        SourceCoverage::from_presence(self.has_epic(), self.has_pdms())
    }

    /// Combined identifier code: `"{epic} / {pdms}"` when both exist, the
    /// single identifier otherwise, `"-"` when neither does.
    pub fn id_code(&self) -> String {
        match self.coverage() {
            SourceCoverage::Both => format!("{} / {}", self.epic_id, self.pdms_id),
            SourceCoverage::Epic => self.epic_id.clone(),
            SourceCoverage::Pdms => self.pdms_id.clone(),
            SourceCoverage::Unavailable => "-".to_string(),
        }
    }
}
