//! Catalogue query engine.
//!
//! Pure functions that narrow the catalogue for display and turn records into
//! export-table rows. The export table itself is a plain `Vec<ExportRow>`
//! whose order is insertion order.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use varmap_model::{
    ExportRow, ManualRowInput, RowStatus, SourceSelection, ValidationError, VariableRecord,
};

/// Organ-system filter value that disables the filter.
pub const ALL_SYSTEMS: &str = "All systems";

/// Organ system / group used for manual rows that leave them blank.
pub const DEFAULT_CATEGORY: &str = "General";

/// Records available in the selected sources.
///
/// With nothing selected the whole catalogue is returned.
pub fn filter_by_sources(
    records: &[VariableRecord],
    sources: SourceSelection,
) -> Vec<&VariableRecord> {
    records
        .iter()
        .filter(|record| match (sources.epic, sources.pdms) {
            (true, true) => record.has_epic() || record.has_pdms(),
            (true, false) => record.has_epic(),
            (false, true) => record.has_pdms(),
            (false, false) => true,
        })
        .collect()
}

/// Keep records of one organ system; [`ALL_SYSTEMS`] keeps everything.
pub fn apply_organ_system_filter<'a>(
    rows: Vec<&'a VariableRecord>,
    organ_system: &str,
) -> Vec<&'a VariableRecord> {
    if organ_system == ALL_SYSTEMS {
        return rows;
    }
    rows.into_iter()
        .filter(|record| record.organ_system == organ_system)
        .collect()
}

/// Case-insensitive substring search on the variable name.
///
/// A blank query keeps everything.
pub fn apply_search<'a>(rows: Vec<&'a VariableRecord>, query: &str) -> Vec<&'a VariableRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return rows;
    }
    rows.into_iter()
        .filter(|record| record.name.to_lowercase().contains(&needle))
        .collect()
}

/// Display label: `"{organ system} · {group} · {name} [{sources}]"`.
pub fn label_for(record: &VariableRecord) -> String {
    format!(
        "{} · {} · {} [{}]",
        record.organ_system,
        record.group,
        record.name,
        record.coverage().label_tag()
    )
}

/// Export row for a catalogue record.
pub fn to_export_row(record: &VariableRecord) -> ExportRow {
    ExportRow {
        variable: record.name.clone(),
        source: record.coverage(),
        id_code: record.id_code(),
        unit: record.unit.clone(),
        organ_system: record.organ_system.clone(),
        group: record.group.clone(),
        status: RowStatus::Published,
    }
}

/// Append a hand-entered row to the export table.
///
/// Name and ID code are required; nothing is appended when either is blank.
/// Blank organ system or group fall back to [`DEFAULT_CATEGORY`].
pub fn add_manual_row(
    table: &mut Vec<ExportRow>,
    input: &ManualRowInput,
) -> Result<ExportRow, ValidationError> {
    if let Err(error) = input.validate() {
        warn!(%error, "Rejected manual variable");
        return Err(error);
    }
    let row = ExportRow {
        variable: input.name.trim().to_string(),
        source: input.source,
        id_code: input.id_code.trim().to_string(),
        unit: input.unit.trim().to_string(),
        organ_system: or_default(&input.organ_system),
        group: or_default(&input.group),
        status: RowStatus::New,
    };
    debug!(variable = %row.variable, "Added manual variable");
    table.push(row.clone());
    Ok(row)
}

/// Remove every row whose variable name is in `names`.
///
/// Unknown names are ignored. Returns how many rows were removed.
pub fn delete_rows<I, S>(table: &mut Vec<ExportRow>, names: I) -> usize
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let names: BTreeSet<String> = names
        .into_iter()
        .map(|name| name.as_ref().to_string())
        .collect();
    if names.is_empty() {
        return 0;
    }
    let before = table.len();
    table.retain(|row| !names.contains(&row.variable));
    let removed = before - table.len();
    debug!(requested = names.len(), removed, "Deleted export rows");
    removed
}

fn or_default(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        DEFAULT_CATEGORY.to_string()
    } else {
        trimmed.to_string()
    }
}
