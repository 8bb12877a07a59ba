//! Read models handed to the presentation layer after each command.

use tracing::debug;

use varmap_catalogue::{
    ALL_SYSTEMS, OrganSystemNode, apply_organ_system_filter, apply_search, build_tree,
    filter_by_sources, label_for,
};
use varmap_ingest::ImportedConfig;
use varmap_model::{ExportRow, ProjectType, SourceSelection, VariableRecord};

use crate::session::{SessionSummary, WizardSession};
use crate::step::WizardStep;

/// Everything needed to draw the current screen.
#[derive(Debug, Clone)]
pub struct SessionView<'a> {
    pub step: WizardStep,
    pub title: &'static str,
    pub can_advance: bool,
    pub can_retreat: bool,
    pub body: StepView<'a>,
}

#[derive(Debug, Clone)]
pub enum StepView<'a> {
    Setup(SetupView<'a>),
    SourceSelection(SourceSelectionView),
    VariableSelection(VariableSelectionView<'a>),
    ReviewExport(ReviewExportView<'a>),
}

#[derive(Debug, Clone)]
pub struct SetupView<'a> {
    pub project_type: ProjectType,
    pub imported: Option<&'a ImportedConfig>,
}

impl SetupView<'_> {
    /// True when the user must still upload a file before continuing.
    pub fn awaiting_upload(&self) -> bool {
        self.project_type == ProjectType::LoadExisting && self.imported.is_none()
    }

    /// First rows of the imported table, empty when nothing is loaded.
    pub fn preview(&self) -> &[Vec<String>] {
        match self.imported {
            Some(config) => config.preview(),
            None => &[],
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SourceSelectionView {
    pub sources: SourceSelection,
}

/// A selectable catalogue row.
#[derive(Debug, Clone)]
pub struct VariableOption<'a> {
    pub record: &'a VariableRecord,
    pub label: String,
    pub checked: bool,
}

#[derive(Debug, Clone)]
pub struct VariableSelectionView<'a> {
    /// "All systems" followed by the catalogue's organ systems.
    pub organ_system_options: Vec<&'a str>,
    pub organ_system_filter: &'a str,
    pub search_query: &'a str,
    /// Rows passing the source, organ system and search filters.
    pub options: Vec<VariableOption<'a>>,
    /// Source-filtered catalogue grouped for tree browsing.
    pub tree: Vec<OrganSystemNode<'a>>,
    /// Every checked variable, regardless of the display filters.
    pub selected: Vec<&'a VariableRecord>,
}

#[derive(Debug, Clone)]
pub struct ReviewExportView<'a> {
    pub rows: &'a [ExportRow],
    pub summary: SessionSummary,
}

impl WizardSession {
    /// Read model for the current step.
    pub fn view(&self) -> SessionView<'_> {
        let body = match self.step() {
            WizardStep::Setup => StepView::Setup(SetupView {
                project_type: self.project_type(),
                imported: self.imported_config(),
            }),
            WizardStep::SourceSelection => StepView::SourceSelection(SourceSelectionView {
                sources: self.selected_sources(),
            }),
            WizardStep::VariableSelection => {
                StepView::VariableSelection(self.variable_selection_view())
            }
            WizardStep::ReviewExport => StepView::ReviewExport(ReviewExportView {
                rows: self.export_table(),
                summary: self.summary(),
            }),
        };
        SessionView {
            step: self.step(),
            title: self.step().title(),
            can_advance: self.can_advance(),
            can_retreat: self.can_retreat(),
            body,
        }
    }

    /// Variable-selection read model, usable from any step.
    pub fn variable_selection_view(&self) -> VariableSelectionView<'_> {
        let catalogue = self.catalogue();
        let by_source = filter_by_sources(catalogue.records(), self.selected_sources());
        let tree = build_tree(&by_source);

        let visible = apply_search(
            apply_organ_system_filter(by_source, self.organ_system_filter()),
            self.search_query(),
        );
        let options: Vec<VariableOption<'_>> = visible
            .into_iter()
            .map(|record| VariableOption {
                record,
                label: label_for(record),
                checked: self.is_selected(&record.id),
            })
            .collect();
        debug!(visible = options.len(), "Recomputed variable list");

        let selected = catalogue
            .iter()
            .filter(|record| self.is_selected(&record.id))
            .collect();

        let mut organ_system_options = vec![ALL_SYSTEMS];
        organ_system_options.extend(catalogue.organ_systems());

        VariableSelectionView {
            organ_system_options,
            organ_system_filter: self.organ_system_filter(),
            search_query: self.search_query(),
            options,
            tree,
            selected,
        }
    }
}
