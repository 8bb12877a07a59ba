use chrono::NaiveDate;

use varmap_model::{ExportRow, RowStatus, SourceCoverage};
use varmap_output::{CsvExport, EXPORT_MIME, export_csv_bytes};

fn row(variable: &str, source: SourceCoverage, id_code: &str, unit: &str) -> ExportRow {
    ExportRow {
        variable: variable.to_string(),
        source,
        id_code: id_code.to_string(),
        unit: unit.to_string(),
        organ_system: "Cardiology".to_string(),
        group: "Heart".to_string(),
        status: RowStatus::Published,
    }
}

fn sample_table() -> Vec<ExportRow> {
    vec![
        row("Heart Rate", SourceCoverage::Both, "E-HR-001 / P-HR-001", "bpm"),
        row("Cardiac Output", SourceCoverage::Epic, "E-CO-001", "L/min"),
        ExportRow {
            variable: "Core Temperature, rectal".to_string(),
            source: SourceCoverage::Pdms,
            id_code: "P-TMP-002".to_string(),
            unit: "°C".to_string(),
            organ_system: "General".to_string(),
            group: "General".to_string(),
            status: RowStatus::New,
        },
    ]
}

#[test]
fn export_csv_text_is_stable() {
    let bytes = export_csv_bytes(&sample_table()).expect("render csv");
    let text = String::from_utf8(bytes).expect("utf8");
    insta::assert_snapshot!(text, @r#"
    Variable,Source,ID,Unit,Organ_System,Group,Status
    Heart Rate,Both,E-HR-001 / P-HR-001,bpm,Cardiology,Heart,Published
    Cardiac Output,EPIC,E-CO-001,L/min,Cardiology,Heart,Published
    "Core Temperature, rectal",PDMS,P-TMP-002,°C,General,General,New
    "#);
}

#[test]
fn saved_export_reimports_with_same_names() {
    let dir = tempfile::tempdir().expect("tempdir");
    let date = NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date");
    let export = CsvExport::render(&sample_table(), date).expect("render");
    assert_eq!(export.mime, EXPORT_MIME);

    let path = export.save_to_dir(&dir.path().join("out")).expect("save");
    assert!(path.ends_with("variable-mapping-2026-10-18.csv"));

    let config = varmap_ingest::read_config_path(&path).expect("reimport");
    assert_eq!(
        config.variable_names().collect::<Vec<_>>(),
        vec!["Heart Rate", "Cardiac Output", "Core Temperature, rectal"]
    );
    assert_eq!(config.headers().len(), 7);
}
