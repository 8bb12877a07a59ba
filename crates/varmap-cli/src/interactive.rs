//! Terminal prompts for the four wizard steps.

use std::path::{Path, PathBuf};

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Select};
use tracing::debug;

use varmap_model::{DataSource, ManualRowInput, ProjectType, SourceCoverage, UNIT_CHOICES};
use varmap_wizard::{StepView, WizardSession, WizardStep};

use crate::summary::{print_catalogue, print_export_table, print_import_preview};

const CUSTOM_UNIT: &str = "custom";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Nav {
    Next,
    Back,
    Stay,
    Quit,
}

/// Drive `session` from prompts until the user quits.
///
/// Returns the path of the last CSV written, if any.
pub fn run_interactive(session: &mut WizardSession, output_dir: &Path) -> Result<Option<PathBuf>> {
    let theme = ColorfulTheme::default();
    let mut saved = None;
    let mut shown = None;
    loop {
        let step = session.step();
        if shown != Some(step) {
            println!("\n== {step} ==");
            shown = Some(step);
        }
        let nav = match step {
            WizardStep::Setup => setup_step(session, &theme)?,
            WizardStep::SourceSelection => source_step(session, &theme)?,
            WizardStep::VariableSelection => variable_step(session, &theme)?,
            WizardStep::ReviewExport => {
                let (nav, path) = review_step(session, &theme, output_dir)?;
                if path.is_some() {
                    saved = path;
                }
                nav
            }
        };
        match nav {
            Nav::Next => {
                if !session.advance() {
                    println!("{}", gate_hint(session.step()));
                }
            }
            Nav::Back => {
                session.retreat();
            }
            Nav::Stay => {}
            Nav::Quit => return Ok(saved),
        }
    }
}

fn gate_hint(step: WizardStep) -> &'static str {
    match step {
        WizardStep::Setup => "Upload a configuration CSV to continue.",
        WizardStep::SourceSelection => "Select at least one data source to continue.",
        WizardStep::VariableSelection => {
            "Select at least one variable available from the chosen sources to continue."
        }
        WizardStep::ReviewExport => "This is the last step.",
    }
}

fn prompt_nav(theme: &ColorfulTheme, session: &WizardSession) -> Result<Nav> {
    let mut choices = Vec::new();
    if !session.step().is_last() {
        choices.push(("Continue", Nav::Next));
    }
    if session.can_retreat() {
        choices.push(("Back", Nav::Back));
    }
    choices.push(("Quit", Nav::Quit));
    let labels: Vec<&str> = choices.iter().map(|(label, _)| *label).collect();
    let index = Select::with_theme(theme)
        .with_prompt("Next")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(choices[index].1)
}

// -------------------------------------------------------------------------
// Step 1
// -------------------------------------------------------------------------

fn setup_step(session: &mut WizardSession, theme: &ColorfulTheme) -> Result<Nav> {
    let labels: Vec<&str> = ProjectType::ALL.iter().map(ProjectType::as_str).collect();
    let current = ProjectType::ALL
        .iter()
        .position(|ty| *ty == session.project_type())
        .unwrap_or(0);
    let index = Select::with_theme(theme)
        .with_prompt("Project type")
        .items(&labels)
        .default(current)
        .interact()?;
    session.set_project_type(ProjectType::ALL[index]);

    if session.project_type() == ProjectType::LoadExisting {
        if let Some(config) = session.imported_config() {
            print_import_preview(config);
            let keep = Confirm::with_theme(theme)
                .with_prompt("Use this configuration?")
                .default(true)
                .interact()?;
            if !keep {
                session.clear_imported_config();
            }
        }
        if awaiting_upload(session) {
            let path: String = Input::with_theme(theme)
                .with_prompt("Configuration CSV")
                .interact_text()?;
            match session.import_config_path(Path::new(path.trim())) {
                Ok(config) => print_import_preview(config),
                Err(error) => {
                    eprintln!("error: {error}");
                    return Ok(Nav::Stay);
                }
            }
        }
    }
    prompt_nav(theme, session)
}

fn awaiting_upload(session: &WizardSession) -> bool {
    matches!(session.view().body, StepView::Setup(setup) if setup.awaiting_upload())
}

// -------------------------------------------------------------------------
// Step 2
// -------------------------------------------------------------------------

fn source_step(session: &mut WizardSession, theme: &ColorfulTheme) -> Result<Nav> {
    let current = session.selected_sources();
    let labels: Vec<&str> = DataSource::ALL.iter().map(DataSource::as_str).collect();
    let defaults: Vec<bool> = DataSource::ALL
        .iter()
        .map(|source| current.contains(*source))
        .collect();
    let chosen = MultiSelect::with_theme(theme)
        .with_prompt("Data sources (space to toggle)")
        .items(&labels)
        .defaults(&defaults)
        .interact()?;
    for (index, source) in DataSource::ALL.into_iter().enumerate() {
        session.set_source(source, chosen.contains(&index));
    }
    prompt_nav(theme, session)
}

// -------------------------------------------------------------------------
// Step 3
// -------------------------------------------------------------------------

fn variable_step(session: &mut WizardSession, theme: &ColorfulTheme) -> Result<Nav> {
    const ACTIONS: [&str; 8] = [
        "Choose variables",
        "Filter by organ system",
        "Search by name",
        "Browse by organ system",
        "Show selected",
        "Continue",
        "Back",
        "Quit",
    ];
    {
        let view = session.variable_selection_view();
        println!(
            "Sources: {} | Organ system: {} | Search: \"{}\" | {} shown, {} selected",
            session.selected_sources(),
            view.organ_system_filter,
            view.search_query,
            view.options.len(),
            view.selected.len()
        );
    }
    let action = Select::with_theme(theme)
        .with_prompt("Variables")
        .items(&ACTIONS)
        .default(0)
        .interact()?;
    match action {
        0 => choose_variables(session, theme)?,
        1 => choose_organ_system(session, theme)?,
        2 => {
            let query: String = Input::with_theme(theme)
                .with_prompt("Search")
                .with_initial_text(session.search_query())
                .allow_empty(true)
                .interact_text()?;
            session.set_search(&query);
        }
        3 => print_tree(session),
        4 => {
            let view = session.variable_selection_view();
            let rows: Vec<_> = view.selected.iter().map(|record| (*record, true)).collect();
            print_catalogue(&rows);
        }
        5 => return Ok(Nav::Next),
        6 => return Ok(Nav::Back),
        _ => return Ok(Nav::Quit),
    }
    Ok(Nav::Stay)
}

fn choose_variables(session: &mut WizardSession, theme: &ColorfulTheme) -> Result<()> {
    let (ids, labels, checked): (Vec<String>, Vec<String>, Vec<bool>) = {
        let view = session.variable_selection_view();
        let mut ids = Vec::with_capacity(view.options.len());
        let mut labels = Vec::with_capacity(view.options.len());
        let mut checked = Vec::with_capacity(view.options.len());
        for option in view.options {
            ids.push(option.record.id.clone());
            labels.push(option.label);
            checked.push(option.checked);
        }
        (ids, labels, checked)
    };
    if ids.is_empty() {
        println!("No variables match the current filters.");
        return Ok(());
    }
    let chosen = MultiSelect::with_theme(theme)
        .with_prompt("Variables (space to toggle)")
        .items(&labels)
        .defaults(&checked)
        .interact()?;
    for (index, id) in ids.iter().enumerate() {
        session.set_variable_checked(id, chosen.contains(&index))?;
    }
    debug!(visible = ids.len(), chosen = chosen.len(), "Applied variable choices");
    Ok(())
}

fn choose_organ_system(session: &mut WizardSession, theme: &ColorfulTheme) -> Result<()> {
    let (options, current): (Vec<String>, usize) = {
        let view = session.variable_selection_view();
        let current = view
            .organ_system_options
            .iter()
            .position(|name| *name == view.organ_system_filter)
            .unwrap_or(0);
        let options = view
            .organ_system_options
            .iter()
            .map(|name| (*name).to_string())
            .collect();
        (options, current)
    };
    let index = Select::with_theme(theme)
        .with_prompt("Organ system")
        .items(&options)
        .default(current)
        .interact()?;
    session.set_organ_system_filter(&options[index])?;
    Ok(())
}

fn print_tree(session: &WizardSession) {
    let view = session.variable_selection_view();
    for system in &view.tree {
        println!("{} ({})", system.name, system.record_count());
        for group in &system.groups {
            println!("  {}", group.name);
            for record in &group.records {
                let mark = if session.is_selected(&record.id) { "x" } else { " " };
                println!("    [{mark}] {} ({})", record.name, record.id);
            }
        }
    }
}

// -------------------------------------------------------------------------
// Step 4
// -------------------------------------------------------------------------

fn review_step(
    session: &mut WizardSession,
    theme: &ColorfulTheme,
    output_dir: &Path,
) -> Result<(Nav, Option<PathBuf>)> {
    const ACTIONS: [&str; 5] = [
        "Download CSV",
        "Add variable",
        "Delete variables",
        "Back",
        "Quit",
    ];
    print_export_table(session.export_table());
    let action = Select::with_theme(theme)
        .with_prompt("Export")
        .items(&ACTIONS)
        .default(0)
        .interact()?;
    match action {
        0 => match session.export_csv() {
            Ok(export) => match export.save_to_dir(output_dir) {
                Ok(path) => {
                    println!("Saved {}", path.display());
                    return Ok((Nav::Stay, Some(path)));
                }
                Err(error) => eprintln!("error: {error}"),
            },
            Err(error) => eprintln!("error: {error}"),
        },
        1 => {
            let input = prompt_manual_row(theme)?;
            if let Err(error) = session.add_manual_row(&input) {
                eprintln!("error: {error}");
            }
        }
        2 => delete_variables(session, theme)?,
        3 => return Ok((Nav::Back, None)),
        _ => return Ok((Nav::Quit, None)),
    }
    Ok((Nav::Stay, None))
}

fn prompt_manual_row(theme: &ColorfulTheme) -> Result<ManualRowInput> {
    let name: String = Input::with_theme(theme)
        .with_prompt("Variable name")
        .allow_empty(true)
        .interact_text()?;
    let source_labels: Vec<&str> = SourceCoverage::MANUAL_CHOICES
        .iter()
        .map(SourceCoverage::as_str)
        .collect();
    let source = Select::with_theme(theme)
        .with_prompt("Source")
        .items(&source_labels)
        .default(0)
        .interact()?;
    let id_code: String = Input::with_theme(theme)
        .with_prompt("ID code")
        .allow_empty(true)
        .interact_text()?;
    let unit_index = Select::with_theme(theme)
        .with_prompt("Unit")
        .items(&UNIT_CHOICES)
        .default(0)
        .interact()?;
    let unit = if UNIT_CHOICES[unit_index] == CUSTOM_UNIT {
        Input::with_theme(theme)
            .with_prompt("Custom unit")
            .allow_empty(true)
            .interact_text()?
    } else {
        UNIT_CHOICES[unit_index].to_string()
    };
    let organ_system: String = Input::with_theme(theme)
        .with_prompt("Organ system")
        .allow_empty(true)
        .interact_text()?;
    let group: String = Input::with_theme(theme)
        .with_prompt("Group")
        .allow_empty(true)
        .interact_text()?;

    Ok(
        ManualRowInput::new(name, SourceCoverage::MANUAL_CHOICES[source], id_code)
            .with_unit(unit)
            .with_organ_system(organ_system)
            .with_group(group),
    )
}

fn delete_variables(session: &mut WizardSession, theme: &ColorfulTheme) -> Result<()> {
    let names: Vec<String> = session
        .export_table()
        .iter()
        .map(|row| row.variable.clone())
        .collect();
    if names.is_empty() {
        println!("Nothing to delete.");
        return Ok(());
    }
    let chosen = MultiSelect::with_theme(theme)
        .with_prompt("Delete (space to mark)")
        .items(&names)
        .interact()?;
    let removed = session.delete_rows(chosen.iter().map(|&index| names[index].as_str()));
    println!("Removed {removed} row(s).");
    Ok(())
}
