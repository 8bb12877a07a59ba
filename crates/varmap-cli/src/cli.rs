//! CLI argument definitions for the variable mapping wizard.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use varmap_cli::config::CATALOGUE_ENV;
use varmap_model::{DataSource, ManualRowInput};

#[derive(Parser)]
#[command(
    name = "varmap",
    version,
    about = "Variable mapping wizard - pick clinical variables and export a mapping CSV",
    long_about = "Select monitoring variables from a catalogue, map them to EPIC and PDMS \
                  identifiers, and export the mapping as CSV.\n\n\
                  Run `varmap wizard` for the interactive four-step flow or `varmap map` \
                  for a scripted run."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Variable catalogue CSV (id,name,organ_system,group,epic_id,pdms_id,unit).
    ///
    /// Defaults to the built-in catalogue.
    #[arg(long = "catalogue", value_name = "PATH", env = CATALOGUE_ENV, global = true)]
    pub catalogue: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List catalogue variables, optionally filtered.
    Catalogue(CatalogueArgs),

    /// Run the interactive four-step wizard.
    Wizard(WizardArgs),

    /// Build a mapping export without prompts.
    Map(MapArgs),
}

#[derive(Args)]
pub struct CatalogueArgs {
    /// Only show variables available in this source (repeatable).
    #[arg(long = "source", value_enum, value_delimiter = ',')]
    pub sources: Vec<SourceArg>,

    /// Only show one organ system.
    #[arg(long = "organ-system", value_name = "NAME")]
    pub organ_system: Option<String>,

    /// Case-insensitive substring match on the variable name.
    #[arg(long = "search", value_name = "QUERY")]
    pub search: Option<String>,

    /// Print JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct WizardArgs {
    /// Directory the export CSV is written to (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct MapArgs {
    /// Data source to map against (repeatable, at least one).
    #[arg(long = "source", value_enum, value_delimiter = ',')]
    pub sources: Vec<SourceArg>,

    /// Previously exported mapping; its `Variable` names are pre-selected.
    #[arg(long = "import", value_name = "CSV")]
    pub import: Option<PathBuf>,

    /// Catalogue id to select (repeatable).
    #[arg(long = "select", value_name = "ID")]
    pub select: Vec<String>,

    /// Extra variable as `name|source|id|unit|organ|group` (repeatable).
    ///
    /// Only name, source and id are required, e.g. `Lactate|PDMS|P-LAC-001`.
    #[arg(long = "add", value_name = "ROW", value_parser = parse_manual_row)]
    pub add: Vec<ManualRowInput>,

    /// Variable name to remove from the export (repeatable).
    #[arg(long = "delete", value_name = "NAME")]
    pub delete: Vec<String>,

    /// Directory the export CSV is written to (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR", conflicts_with = "stdout")]
    pub output_dir: Option<PathBuf>,

    /// Print the CSV to stdout instead of writing a file.
    #[arg(long = "stdout")]
    pub stdout: bool,
}

fn parse_manual_row(value: &str) -> Result<ManualRowInput, String> {
    ManualRowInput::parse_pipe(value).map_err(|error| error.to_string())
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SourceArg {
    Epic,
    Pdms,
}

impl From<SourceArg> for DataSource {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Epic => DataSource::Epic,
            SourceArg::Pdms => DataSource::Pdms,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
