//! Wizard session state and command handlers.
//!
//! A [`WizardSession`] holds everything one user has chosen so far. The
//! presentation layer calls the command methods on user action and renders
//! [`WizardSession::view`] afterwards; every command completes synchronously.
//!
//! Forward navigation is gated per step:
//!
//! | Step | Gate | On leaving |
//! |---|---|---|
//! | Setup | new project, or a loaded configuration | pre-select by imported names |
//! | Source selection | EPIC or PDMS selected | - |
//! | Variable selection | a checked variable the sources offer | drop hidden ids, rebuild the export table |
//! | Review & export | terminal | - |

use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use varmap_catalogue::{
    ALL_SYSTEMS, Catalogue, add_manual_row, delete_rows, filter_by_sources, to_export_row,
};
use varmap_ingest::{ImportedConfig, read_config, read_config_path};
use varmap_model::{
    DataSource, ExportRow, ManualRowInput, ProjectType, RowStatus, SourceSelection,
};
use varmap_output::{CsvExport, today};

use crate::error::{Result, WizardError};
use crate::step::WizardStep;

/// One user's progress through the wizard.
#[derive(Debug, Clone)]
pub struct WizardSession {
    catalogue: Catalogue,
    step: WizardStep,
    project_type: ProjectType,
    imported_config: Option<ImportedConfig>,
    selected_sources: SourceSelection,
    selected_variable_ids: BTreeSet<String>,
    organ_system_filter: String,
    search_query: String,
    export_table: Vec<ExportRow>,
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new(Catalogue::seed())
    }
}

impl WizardSession {
    /// Fresh session on step 1 with nothing chosen.
    pub fn new(catalogue: Catalogue) -> Self {
        Self {
            catalogue,
            step: WizardStep::Setup,
            project_type: ProjectType::NewProject,
            imported_config: None,
            selected_sources: SourceSelection::none(),
            selected_variable_ids: BTreeSet::new(),
            organ_system_filter: ALL_SYSTEMS.to_string(),
            search_query: String::new(),
            export_table: Vec::new(),
        }
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn project_type(&self) -> ProjectType {
        self.project_type
    }

    pub fn imported_config(&self) -> Option<&ImportedConfig> {
        self.imported_config.as_ref()
    }

    pub fn selected_sources(&self) -> SourceSelection {
        self.selected_sources
    }

    pub fn selected_variable_ids(&self) -> &BTreeSet<String> {
        &self.selected_variable_ids
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_variable_ids.contains(id)
    }

    pub fn organ_system_filter(&self) -> &str {
        &self.organ_system_filter
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn export_table(&self) -> &[ExportRow] {
        &self.export_table
    }

    // ---------------------------------------------------------------------
    // Step 1: setup
    // ---------------------------------------------------------------------

    pub fn set_project_type(&mut self, project_type: ProjectType) {
        debug!(project_type = %project_type, "Set project type");
        self.project_type = project_type;
    }

    pub fn set_imported_config(&mut self, config: ImportedConfig) {
        self.store_import(config);
    }

    fn store_import(&mut self, config: ImportedConfig) -> &ImportedConfig {
        info!(rows = config.len(), "Imported mapping configuration");
        self.imported_config.insert(config)
    }

    pub fn clear_imported_config(&mut self) {
        self.imported_config = None;
    }

    /// Parse and keep an uploaded configuration.
    ///
    /// On failure the session is unchanged and the error is returned for
    /// display.
    pub fn import_config_csv<R: Read>(&mut self, reader: R) -> Result<&ImportedConfig> {
        let config = read_config(reader).inspect_err(|error| {
            warn!(%error, "Could not read configuration CSV");
        })?;
        Ok(self.store_import(config))
    }

    /// Same as [`Self::import_config_csv`] for a file on disk.
    pub fn import_config_path(&mut self, path: &Path) -> Result<&ImportedConfig> {
        let config = read_config_path(path).inspect_err(|error| {
            warn!(%error, path = %path.display(), "Could not read configuration CSV");
        })?;
        Ok(self.store_import(config))
    }

    // ---------------------------------------------------------------------
    // Step 2: sources
    // ---------------------------------------------------------------------

    pub fn set_sources(&mut self, sources: SourceSelection) {
        debug!(sources = %sources, "Set data sources");
        self.selected_sources = sources;
    }

    pub fn set_source(&mut self, source: DataSource, enabled: bool) {
        self.selected_sources.set(source, enabled);
        debug!(sources = %self.selected_sources, "Set data sources");
    }

    // ---------------------------------------------------------------------
    // Step 3: variables
    // ---------------------------------------------------------------------

    /// Flip one variable's checked state and return the new state.
    pub fn toggle_variable(&mut self, id: &str) -> Result<bool> {
        self.ensure_known(id)?;
        let checked = if self.selected_variable_ids.remove(id) {
            false
        } else {
            self.selected_variable_ids.insert(id.to_string());
            true
        };
        debug!(id, checked, "Toggled variable");
        Ok(checked)
    }

    /// Set one variable's checked state; returns whether anything changed.
    pub fn set_variable_checked(&mut self, id: &str, checked: bool) -> Result<bool> {
        self.ensure_known(id)?;
        let changed = if checked {
            self.selected_variable_ids.insert(id.to_string())
        } else {
            self.selected_variable_ids.remove(id)
        };
        if changed {
            debug!(id, checked, "Toggled variable");
        }
        Ok(changed)
    }

    /// Restrict the variable list to one organ system, or
    /// [`ALL_SYSTEMS`](varmap_catalogue::ALL_SYSTEMS).
    pub fn set_organ_system_filter(&mut self, organ_system: &str) -> Result<()> {
        if organ_system != ALL_SYSTEMS
            && !self.catalogue.organ_systems().contains(&organ_system)
        {
            return Err(WizardError::UnknownOrganSystem {
                name: organ_system.to_string(),
            });
        }
        self.organ_system_filter = organ_system.to_string();
        Ok(())
    }

    pub fn set_search(&mut self, query: &str) {
        self.search_query = query.to_string();
    }

    fn ensure_known(&self, id: &str) -> Result<()> {
        if self.catalogue.contains(id) {
            Ok(())
        } else {
            warn!(id, "Ignored unknown variable id");
            Err(WizardError::UnknownVariable { id: id.to_string() })
        }
    }

    // ---------------------------------------------------------------------
    // Step 4: export table
    // ---------------------------------------------------------------------

    /// Append a hand-entered variable (status New).
    pub fn add_manual_row(&mut self, input: &ManualRowInput) -> Result<ExportRow> {
        let row = add_manual_row(&mut self.export_table, input)?;
        info!(variable = %row.variable, "Added variable");
        Ok(row)
    }

    /// Remove rows by variable name; returns the number removed.
    pub fn delete_rows<I, S>(&mut self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let removed = delete_rows(&mut self.export_table, names);
        if removed > 0 {
            info!(removed, "Deleted variables");
        }
        removed
    }

    /// Render the export table as CSV with today's filename.
    pub fn export_csv(&self) -> Result<CsvExport> {
        self.export_csv_on(today())
    }

    /// Render the export table as CSV with the filename for `date`.
    pub fn export_csv_on(&self, date: NaiveDate) -> Result<CsvExport> {
        if self.export_table.is_empty() {
            return Err(WizardError::NothingToExport);
        }
        let export = CsvExport::render(&self.export_table, date)?;
        info!(
            filename = %export.filename,
            rows = self.export_table.len(),
            "Rendered mapping export"
        );
        Ok(export)
    }

    // ---------------------------------------------------------------------
    // Navigation
    // ---------------------------------------------------------------------

    /// Whether the current step's gate is satisfied.
    pub fn can_advance(&self) -> bool {
        match self.step {
            WizardStep::Setup => match self.project_type {
                ProjectType::NewProject => true,
                ProjectType::LoadExisting => self.imported_config.is_some(),
            },
            WizardStep::SourceSelection => self.selected_sources.any(),
            WizardStep::VariableSelection => {
                let available = self.source_filtered_ids();
                self.selected_variable_ids
                    .iter()
                    .any(|id| available.contains(id.as_str()))
            }
            WizardStep::ReviewExport => false,
        }
    }

    pub fn can_retreat(&self) -> bool {
        !self.step.is_first()
    }

    /// Move to the next step if the gate allows it, running the transition's
    /// side effect. Returns whether the step changed.
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            debug!(step = self.step.number(), "Advance blocked");
            return false;
        }
        match self.step {
            WizardStep::Setup => self.preselect_from_import(),
            WizardStep::SourceSelection => self.prune_selection_to_sources(),
            WizardStep::VariableSelection => {
                // sources may have changed or hidden ids been checked since step 2
                self.prune_selection_to_sources();
                self.rebuild_export_table();
            }
            WizardStep::ReviewExport => {}
        }
        let from = self.step;
        self.step = self.step.next();
        info!(from = from.number(), to = self.step.number(), "Advanced wizard");
        true
    }

    /// Move to the previous step. Nothing chosen so far is discarded.
    pub fn retreat(&mut self) -> bool {
        if !self.can_retreat() {
            return false;
        }
        let from = self.step;
        self.step = self.step.previous();
        info!(from = from.number(), to = self.step.number(), "Went back");
        true
    }

    fn preselect_from_import(&mut self) {
        let Some(config) = &self.imported_config else {
            return;
        };
        let ids = self.catalogue.match_names(config.variable_names());
        debug!(matched = ids.len(), imported = config.len(), "Pre-selected from import");
        self.selected_variable_ids = ids.into_iter().collect();
    }

    fn source_filtered_ids(&self) -> BTreeSet<&str> {
        filter_by_sources(self.catalogue.records(), self.selected_sources)
            .into_iter()
            .map(|r| r.id.as_str())
            .collect()
    }

    fn prune_selection_to_sources(&mut self) {
        let available: BTreeSet<String> = self
            .source_filtered_ids()
            .into_iter()
            .map(str::to_string)
            .collect();
        let before = self.selected_variable_ids.len();
        self.selected_variable_ids.retain(|id| available.contains(id));
        let dropped = before - self.selected_variable_ids.len();
        if dropped > 0 {
            debug!(dropped, "Dropped selections outside chosen sources");
        }
    }

    fn rebuild_export_table(&mut self) {
        self.export_table = self
            .catalogue
            .iter()
            .filter(|record| self.selected_variable_ids.contains(&record.id))
            .map(to_export_row)
            .collect();
        debug!(rows = self.export_table.len(), "Rebuilt export table");
    }

    // ---------------------------------------------------------------------
    // Summary
    // ---------------------------------------------------------------------

    pub fn summary(&self) -> SessionSummary {
        let published = self
            .export_table
            .iter()
            .filter(|r| r.status == RowStatus::Published)
            .count();
        SessionSummary {
            step: self.step,
            sources: self.selected_sources,
            selected: self.selected_variable_ids.len(),
            export_rows: self.export_table.len(),
            published,
            new: self.export_table.len() - published,
        }
    }
}

/// Counts describing a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub step: WizardStep,
    pub sources: SourceSelection,
    /// Checked catalogue variables.
    pub selected: usize,
    /// Rows in the export table.
    pub export_rows: usize,
    /// Export rows derived from the catalogue.
    pub published: usize,
    /// Export rows added by hand.
    pub new: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use varmap_model::SourceCoverage;

    fn at_variable_step(sources: SourceSelection) -> WizardSession {
        let mut session = WizardSession::default();
        assert!(session.advance());
        session.set_sources(sources);
        assert!(session.advance());
        session
    }

    #[test]
    fn new_session_defaults() {
        let session = WizardSession::default();
        assert_eq!(session.step(), WizardStep::Setup);
        assert_eq!(session.project_type(), ProjectType::NewProject);
        assert!(session.imported_config().is_none());
        assert!(!session.selected_sources().any());
        assert!(session.selected_variable_ids().is_empty());
        assert!(session.export_table().is_empty());
        assert_eq!(session.organ_system_filter(), ALL_SYSTEMS);
    }

    #[test]
    fn toggle_flips_and_rejects_unknown_ids() {
        let mut session = at_variable_step(SourceSelection::both());
        assert!(session.toggle_variable("hr-001").unwrap());
        assert!(!session.toggle_variable("hr-001").unwrap());
        let err = session.toggle_variable("nope").unwrap_err();
        assert!(matches!(err, WizardError::UnknownVariable { .. }));
        assert!(session.selected_variable_ids().is_empty());
    }

    #[test]
    fn set_variable_checked_is_idempotent() {
        let mut session = at_variable_step(SourceSelection::both());
        assert!(session.set_variable_checked("rr-001", true).unwrap());
        assert!(!session.set_variable_checked("rr-001", true).unwrap());
        assert!(session.is_selected("rr-001"));
    }

    #[test]
    fn unknown_organ_system_is_rejected() {
        let mut session = at_variable_step(SourceSelection::both());
        assert!(session.set_organ_system_filter("Neurology").is_ok());
        assert!(session.set_organ_system_filter("Oncology").is_err());
        assert_eq!(session.organ_system_filter(), "Neurology");
    }

    #[test]
    fn export_table_follows_catalogue_order() {
        let mut session = at_variable_step(SourceSelection::both());
        for id in ["gcs-001", "hr-001", "spo2-001"] {
            session.toggle_variable(id).unwrap();
        }
        assert!(session.advance());
        let names: Vec<&str> = session
            .export_table()
            .iter()
            .map(|r| r.variable.as_str())
            .collect();
        assert_eq!(names, vec!["Heart Rate", "SpO2", "Glasgow Coma Scale"]);
    }

    #[test]
    fn summary_counts_row_status() {
        let mut session = at_variable_step(SourceSelection::both());
        session.toggle_variable("hr-001").unwrap();
        session.advance();
        session
            .add_manual_row(&ManualRowInput::new("Lactate", SourceCoverage::Pdms, "P-LAC"))
            .unwrap();
        let summary = session.summary();
        assert_eq!(summary.step, WizardStep::ReviewExport);
        assert_eq!(summary.export_rows, 2);
        assert_eq!(summary.published, 1);
        assert_eq!(summary.new, 1);
    }

    #[test]
    fn summary_serializes_for_reporting() {
        let mut session = at_variable_step(SourceSelection::epic_only());
        session.toggle_variable("qt-001").unwrap();
        let json = serde_json::to_value(session.summary()).unwrap();
        assert_eq!(json["step"], "VariableSelection");
        assert_eq!(json["sources"]["epic"], true);
        assert_eq!(json["selected"], 1);
        assert_eq!(json["export_rows"], 0);
    }

    #[test]
    fn hidden_ids_checked_on_step_three_are_not_exported() {
        let mut session = at_variable_step(SourceSelection::epic_only());
        session.toggle_variable("mf-pdms-001").unwrap();
        assert!(!session.can_advance());
        assert!(!session.advance());

        session.toggle_variable("qt-001").unwrap();
        assert!(session.advance());
        let names: Vec<&str> = session
            .export_table()
            .iter()
            .map(|r| r.variable.as_str())
            .collect();
        assert_eq!(names, vec!["QT Interval"]);
        assert!(!session.is_selected("mf-pdms-001"));
    }

    #[test]
    fn export_refuses_empty_table() {
        let session = WizardSession::default();
        assert!(matches!(
            session.export_csv(),
            Err(WizardError::NothingToExport)
        ));
    }
}
