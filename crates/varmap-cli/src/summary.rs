use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use varmap_ingest::ImportedConfig;
use varmap_model::{DataSource, ExportRow, RowStatus, VariableRecord};
use varmap_wizard::SessionSummary;

pub fn print_catalogue(rows: &[(&VariableRecord, bool)]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Variable"),
        header_cell("Organ system"),
        header_cell("Group"),
        header_cell("EPIC"),
        header_cell("PDMS"),
        header_cell("Unit"),
    ]);
    apply_table_style(&mut table);
    for (record, checked) in rows {
        let id = if *checked {
            Cell::new(format!("* {}", record.id)).fg(Color::Green)
        } else {
            Cell::new(&record.id)
        };
        table.add_row(vec![
            id,
            Cell::new(&record.name),
            Cell::new(&record.organ_system),
            Cell::new(&record.group),
            identifier_cell(record.identifier(DataSource::Epic)),
            identifier_cell(record.identifier(DataSource::Pdms)),
            Cell::new(&record.unit),
        ]);
    }
    println!("{table}");
}

pub fn print_export_table(rows: &[ExportRow]) {
    if rows.is_empty() {
        println!("Export table is empty.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Variable"),
        header_cell("Source"),
        header_cell("ID"),
        header_cell("Unit"),
        header_cell("Organ system"),
        header_cell("Group"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    for (index, row) in rows.iter().enumerate() {
        table.add_row(vec![
            dim_cell(index + 1),
            Cell::new(&row.variable),
            Cell::new(row.source),
            Cell::new(&row.id_code),
            Cell::new(&row.unit),
            Cell::new(&row.organ_system),
            Cell::new(&row.group),
            status_cell(row.status),
        ]);
    }
    println!("{table}");
}

pub fn print_import_preview(config: &ImportedConfig) {
    let name = config.source_name().unwrap_or("configuration");
    println!("Loaded {name}: {} rows", config.len());
    let mut table = Table::new();
    table.set_header(
        config
            .headers()
            .iter()
            .map(|h| header_cell(h))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for row in config.preview() {
        table.add_row(row.iter().map(Cell::new).collect::<Vec<_>>());
    }
    println!("{table}");
    if config.len() > config.preview().len() {
        println!("... {} more", config.len() - config.preview().len());
    }
}

pub fn print_map_summary(summary: &SessionSummary, rows: &[ExportRow], written: Option<&Path>) {
    print_export_table(rows);
    println!(
        "Sources: {}  Selected: {}  Rows: {} ({} published, {} new)",
        summary.sources, summary.selected, summary.export_rows, summary.published, summary.new
    );
    if let Some(path) = written {
        println!("Export: {}", path.display());
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn identifier_cell(id: Option<&str>) -> Cell {
    match id {
        Some(id) => Cell::new(id),
        None => dim_cell("-"),
    }
}

fn status_cell(status: RowStatus) -> Cell {
    match status {
        RowStatus::Published => Cell::new(status),
        RowStatus::New => Cell::new(status)
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
