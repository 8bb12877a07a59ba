//! Type-safe enumerations for the variable mapping workflow.
//!
//! Source systems, identifier coverage, row status and project type are
//! plain strings in exported CSV files; these enums give them a fixed shape
//! while keeping the exact on-disk spellings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An external clinical data system with its own identifier namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DataSource {
    /// EPIC electronic health record.
    #[serde(rename = "EPIC")]
    Epic,
    /// Patient data management system.
    #[serde(rename = "PDMS")]
    Pdms,
}

impl DataSource {
    /// All sources in display order (EPIC before PDMS).
    pub const ALL: [DataSource; 2] = [DataSource::Epic, DataSource::Pdms];

    /// Returns the canonical upper-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Epic => "EPIC",
            DataSource::Pdms => "PDMS",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DataSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "EPIC" => Ok(DataSource::Epic),
            "PDMS" => Ok(DataSource::Pdms),
            _ => Err(format!("Unknown data source: {s}")),
        }
    }
}

/// Which data sources the user chose to include.
///
/// Both flags false is a valid filter state ("show everything") but does not
/// satisfy the source-selection step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceSelection {
    pub epic: bool,
    pub pdms: bool,
}

impl SourceSelection {
    /// Nothing selected.
    pub const fn none() -> Self {
        Self {
            epic: false,
            pdms: false,
        }
    }

    pub const fn epic_only() -> Self {
        Self {
            epic: true,
            pdms: false,
        }
    }

    pub const fn pdms_only() -> Self {
        Self {
            epic: false,
            pdms: true,
        }
    }

    pub const fn both() -> Self {
        Self {
            epic: true,
            pdms: true,
        }
    }

    /// Build a selection from a list of sources; duplicates are harmless.
    pub fn from_sources<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = DataSource>,
    {
        let mut selection = Self::none();
        for source in sources {
            selection.set(source, true);
        }
        selection
    }

    /// True when at least one source is selected.
    pub fn any(&self) -> bool {
        self.epic || self.pdms
    }

    pub fn contains(&self, source: DataSource) -> bool {
        match source {
            DataSource::Epic => self.epic,
            DataSource::Pdms => self.pdms,
        }
    }

    pub fn set(&mut self, source: DataSource, enabled: bool) {
        match source {
            DataSource::Epic => self.epic = enabled,
            DataSource::Pdms => self.pdms = enabled,
        }
    }

    /// Selected sources in display order.
    pub fn sources(&self) -> Vec<DataSource> {
        DataSource::ALL
            .into_iter()
            .filter(|source| self.contains(*source))
            .collect()
    }
}

impl fmt::Display for SourceSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.sources().iter().map(DataSource::as_str).collect();
        if names.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", names.join(" + "))
        }
    }
}

/// Which identifier namespaces a variable is available in.
///
/// The same value renders two ways: the export `Source` column
/// (`EPIC`, `PDMS`, `Both`, `-`) and the short tag used in catalogue labels
/// (`EPIC`, `PDMS`, `EPIC/PDMS`, `–`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceCoverage {
    #[serde(rename = "EPIC")]
    Epic,
    #[serde(rename = "PDMS")]
    Pdms,
    #[serde(rename = "Both", alias = "EPIC/PDMS")]
    Both,
    #[serde(rename = "-", alias = "–", alias = "")]
    Unavailable,
}

impl SourceCoverage {
    /// Choices offered when a variable is added by hand.
    pub const MANUAL_CHOICES: [SourceCoverage; 3] = [
        SourceCoverage::Epic,
        SourceCoverage::Pdms,
        SourceCoverage::Both,
    ];

    /// Coverage implied by which identifiers are present.
    pub fn from_presence(has_epic: bool, has_pdms: bool) -> Self {
        match (has_epic, has_pdms) {
            (true, true) => SourceCoverage::Both,
            (true, false) => SourceCoverage::Epic,
            (false, true) => SourceCoverage::Pdms,
            (false, false) => SourceCoverage::Unavailable,
        }
    }

    /// Value written to the export `Source` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceCoverage::Epic => "EPIC",
            SourceCoverage::Pdms => "PDMS",
            SourceCoverage::Both => "Both",
            SourceCoverage::Unavailable => "-",
        }
    }

    /// Tag shown in brackets at the end of a catalogue label.
    pub fn label_tag(&self) -> &'static str {
        match self {
            SourceCoverage::Epic => "EPIC",
            SourceCoverage::Pdms => "PDMS",
            SourceCoverage::Both => "EPIC/PDMS",
            SourceCoverage::Unavailable => "–",
        }
    }
}

impl fmt::Display for SourceCoverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SourceCoverage {
    type Err = String;

    /// Accepts both the export spelling and the label tag (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "EPIC" => Ok(SourceCoverage::Epic),
            "PDMS" => Ok(SourceCoverage::Pdms),
            "BOTH" | "EPIC/PDMS" => Ok(SourceCoverage::Both),
            "-" | "–" | "" => Ok(SourceCoverage::Unavailable),
            _ => Err(format!("Unknown source: {s}")),
        }
    }
}

/// Provenance of an export row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowStatus {
    /// Derived from the catalogue.
    Published,
    /// Added by hand on the review screen.
    New,
}

impl RowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowStatus::Published => "Published",
            RowStatus::New => "New",
        }
    }
}

impl fmt::Display for RowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a mapping session starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectType {
    /// Start from an empty selection.
    #[default]
    NewProject,
    /// Pre-seed the selection from a previously exported CSV.
    LoadExisting,
}

impl ProjectType {
    pub const ALL: [ProjectType; 2] = [ProjectType::NewProject, ProjectType::LoadExisting];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::NewProject => "New project",
            ProjectType::LoadExisting => "Load existing configuration",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coverage_from_presence() {
        assert_eq!(SourceCoverage::from_presence(true, true), SourceCoverage::Both);
        assert_eq!(SourceCoverage::from_presence(true, false), SourceCoverage::Epic);
        assert_eq!(SourceCoverage::from_presence(false, true), SourceCoverage::Pdms);
        assert_eq!(
            SourceCoverage::from_presence(false, false),
            SourceCoverage::Unavailable
        );
    }

    #[test]
    fn coverage_parses_both_spellings() {
        assert_eq!("both".parse::<SourceCoverage>(), Ok(SourceCoverage::Both));
        assert_eq!("EPIC/PDMS".parse::<SourceCoverage>(), Ok(SourceCoverage::Both));
        assert_eq!("–".parse::<SourceCoverage>(), Ok(SourceCoverage::Unavailable));
        assert_eq!(" pdms ".parse::<SourceCoverage>(), Ok(SourceCoverage::Pdms));
        assert!("lab".parse::<SourceCoverage>().is_err());
    }

    #[test]
    fn selection_display_and_sources() {
        assert_eq!(SourceSelection::none().to_string(), "none");
        assert_eq!(SourceSelection::both().to_string(), "EPIC + PDMS");
        assert_eq!(SourceSelection::pdms_only().sources(), vec![DataSource::Pdms]);
        assert!(!SourceSelection::default().any());
    }

    #[test]
    fn selection_from_sources_ignores_duplicates() {
        let selection = SourceSelection::from_sources([DataSource::Epic, DataSource::Epic]);
        assert_eq!(selection, SourceSelection::epic_only());
    }

    #[test]
    fn data_source_parse_is_case_insensitive() {
        assert_eq!("epic".parse::<DataSource>(), Ok(DataSource::Epic));
        assert_eq!("Pdms".parse::<DataSource>(), Ok(DataSource::Pdms));
        assert!("lims".parse::<DataSource>().is_err());
    }
}
