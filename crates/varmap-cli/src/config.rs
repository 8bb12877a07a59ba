//! Catalogue and output locations resolved from flags and environment.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use varmap_catalogue::Catalogue;

/// Environment variable naming a catalogue CSV.
pub const CATALOGUE_ENV: &str = "VARMAP_CATALOGUE";

/// Load the catalogue at `path`, or the built-in one when no path is given.
pub fn load_catalogue(path: Option<&Path>) -> Result<Catalogue> {
    let Some(path) = path else {
        return Ok(Catalogue::seed());
    };
    Catalogue::from_csv_path(path).with_context(|| format!("load catalogue {}", path.display()))
}

/// Export directory, defaulting to the working directory.
pub fn output_dir(dir: Option<&Path>) -> PathBuf {
    dir.map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
