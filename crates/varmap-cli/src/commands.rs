use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span};

use varmap_catalogue::Catalogue;
use varmap_cli::config::output_dir;
use varmap_cli::scripted::{MapPlan, run_plan};
use varmap_model::{DataSource, SourceSelection, VariableRecord};
use varmap_wizard::WizardSession;

use crate::cli::{CatalogueArgs, MapArgs, SourceArg, WizardArgs};
use crate::interactive::run_interactive;
use crate::summary::{print_catalogue, print_map_summary};

#[derive(Serialize)]
struct CatalogueEntry<'a> {
    #[serde(flatten)]
    record: &'a VariableRecord,
    label: String,
}

pub fn run_catalogue(catalogue: Catalogue, args: &CatalogueArgs) -> Result<()> {
    let mut session = WizardSession::new(catalogue);
    session.set_sources(source_selection(&args.sources));
    if let Some(organ_system) = &args.organ_system {
        session.set_organ_system_filter(organ_system)?;
    }
    if let Some(query) = &args.search {
        session.set_search(query);
    }
    let view = session.variable_selection_view();

    if args.json {
        let entries: Vec<CatalogueEntry<'_>> = view
            .options
            .iter()
            .map(|option| CatalogueEntry {
                record: option.record,
                label: option.label.clone(),
            })
            .collect();
        let json = serde_json::to_string_pretty(&entries).context("serialize catalogue")?;
        println!("{json}");
    } else {
        let rows: Vec<(&VariableRecord, bool)> = view
            .options
            .iter()
            .map(|option| (option.record, option.checked))
            .collect();
        print_catalogue(&rows);
    }
    Ok(())
}

pub fn run_map(catalogue: Catalogue, args: &MapArgs) -> Result<()> {
    let plan = MapPlan {
        import: args.import.clone(),
        sources: args.sources.iter().copied().map(DataSource::from).collect(),
        select: args.select.clone(),
        add: args.add.clone(),
        delete: args.delete.clone(),
    };
    let mut session = WizardSession::new(catalogue);
    run_plan(&mut session, &plan)?;

    let export = session.export_csv()?;
    if args.stdout {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(&export.bytes)
            .and_then(|()| stdout.flush())
            .context("write CSV to stdout")?;
        return Ok(());
    }
    let dir = output_dir(args.output_dir.as_deref());
    let path = export
        .save_to_dir(&dir)
        .with_context(|| format!("write export to {}", dir.display()))?;
    print_map_summary(&session.summary(), session.export_table(), Some(&path));
    Ok(())
}

pub fn run_wizard(catalogue: Catalogue, args: &WizardArgs) -> Result<Option<PathBuf>> {
    let span = info_span!("wizard");
    let _guard = span.enter();
    let mut session = WizardSession::new(catalogue);
    let dir = output_dir(args.output_dir.as_deref());
    let written = run_interactive(&mut session, &dir)?;
    info!(saved = written.is_some(), "Wizard finished");
    Ok(written)
}

fn source_selection(sources: &[SourceArg]) -> SourceSelection {
    SourceSelection::from_sources(sources.iter().copied().map(DataSource::from))
}
