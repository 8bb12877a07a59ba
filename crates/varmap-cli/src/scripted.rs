//! Non-interactive run through the wizard steps.
//!
//! A [`MapPlan`] carries the answers a user would give on each screen. The
//! plan is replayed through the same session commands the interactive
//! wizard uses, so gates and side effects behave identically.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use varmap_model::{DataSource, ManualRowInput, ProjectType, SourceSelection};
use varmap_wizard::{WizardSession, WizardStep};

/// Answers for every wizard step.
#[derive(Debug, Clone, Default)]
pub struct MapPlan {
    /// Step 1: previously exported mapping to pre-select from.
    pub import: Option<PathBuf>,
    /// Step 2.
    pub sources: Vec<DataSource>,
    /// Step 3: ids checked on top of any pre-selection.
    pub select: Vec<String>,
    /// Step 4: rows added by hand, then names removed.
    pub add: Vec<ManualRowInput>,
    pub delete: Vec<String>,
}

/// Replay `plan` on `session`, leaving it on the review step.
pub fn run_plan(session: &mut WizardSession, plan: &MapPlan) -> Result<()> {
    let span = info_span!("map", sources = plan.sources.len(), select = plan.select.len());
    let _guard = span.enter();

    if let Some(path) = &plan.import {
        session.set_project_type(ProjectType::LoadExisting);
        session
            .import_config_path(path)
            .with_context(|| format!("import {}", path.display()))?;
    }
    advance(session)?;

    session.set_sources(SourceSelection::from_sources(plan.sources.iter().copied()));
    advance(session)?;

    for id in &plan.select {
        session
            .set_variable_checked(id, true)
            .with_context(|| format!("select {id}"))?;
    }
    advance(session)?;

    for input in &plan.add {
        session
            .add_manual_row(input)
            .with_context(|| format!("add {}", input.name.trim()))?;
    }
    let removed = session.delete_rows(&plan.delete);
    if removed < plan.delete.len() {
        info!(
            requested = plan.delete.len(),
            removed, "Some names to delete were not in the export"
        );
    }
    Ok(())
}

fn advance(session: &mut WizardSession) -> Result<()> {
    if session.advance() {
        return Ok(());
    }
    match session.step() {
        WizardStep::Setup => bail!("no configuration loaded to start from"),
        WizardStep::SourceSelection => bail!("select at least one data source (--source)"),
        WizardStep::VariableSelection if session.selected_variable_ids().is_empty() => {
            bail!("no variables selected (use --select or --import)")
        }
        WizardStep::VariableSelection => bail!(
            "none of the selected variables is available from {}",
            session.selected_sources()
        ),
        WizardStep::ReviewExport => bail!("already on the last step"),
    }
}
