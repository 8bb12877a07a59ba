//! Error types for wizard commands.

use thiserror::Error;

use varmap_ingest::ImportError;
use varmap_model::ValidationError;
use varmap_output::ExportError;

/// Errors reported by session commands.
///
/// None of these are fatal: the session keeps its last valid state.
#[derive(Debug, Error)]
pub enum WizardError {
    /// The uploaded configuration could not be parsed.
    #[error(transparent)]
    Import(#[from] ImportError),

    /// A manual row is missing a required field.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Rendering or saving the export failed.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Id not present in the catalogue.
    #[error("unknown variable id '{id}'")]
    UnknownVariable { id: String },

    /// Organ system filter value not offered by the catalogue.
    #[error("unknown organ system '{name}'")]
    UnknownOrganSystem { name: String },

    /// Export requested with an empty table.
    #[error("nothing to export yet")]
    NothingToExport,
}

pub type Result<T> = std::result::Result<T, WizardError>;
