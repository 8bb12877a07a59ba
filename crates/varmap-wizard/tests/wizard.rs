use chrono::NaiveDate;
use proptest::prelude::*;

use varmap_ingest::ImportedConfig;
use varmap_model::{
    ManualRowInput, ProjectType, RowStatus, SourceCoverage, SourceSelection, ValidationError,
};
use varmap_wizard::{StepView, WizardError, WizardSession, WizardStep};

fn session_at_review(ids: &[&str]) -> WizardSession {
    let mut session = WizardSession::default();
    assert!(session.advance());
    session.set_sources(SourceSelection::both());
    assert!(session.advance());
    for id in ids {
        session.toggle_variable(id).expect("known id");
    }
    assert!(session.advance());
    assert_eq!(session.step(), WizardStep::ReviewExport);
    session
}

#[test]
fn load_existing_without_upload_blocks_advance() {
    let mut session = WizardSession::default();
    session.set_project_type(ProjectType::LoadExisting);
    assert!(!session.can_advance());
    assert!(!session.advance());
    assert_eq!(session.step(), WizardStep::Setup);
}

#[test]
fn source_step_requires_a_source() {
    let mut session = WizardSession::default();
    assert!(session.advance());
    assert!(!session.advance());
    assert_eq!(session.step(), WizardStep::SourceSelection);

    session.set_sources(SourceSelection::pdms_only());
    assert!(session.advance());
    assert_eq!(session.step(), WizardStep::VariableSelection);
}

#[test]
fn variable_step_requires_a_selection() {
    let mut session = WizardSession::default();
    session.advance();
    session.set_sources(SourceSelection::both());
    session.advance();
    assert!(!session.advance());
    assert_eq!(session.step(), WizardStep::VariableSelection);
}

#[test]
fn review_step_is_terminal() {
    let mut session = session_at_review(&["hr-001"]);
    assert!(!session.can_advance());
    assert!(!session.advance());
    assert_eq!(session.step(), WizardStep::ReviewExport);
}

#[test]
fn retreat_keeps_everything() {
    let mut session = session_at_review(&["hr-001", "spo2-001"]);
    session
        .add_manual_row(&ManualRowInput::new("Lactate", SourceCoverage::Pdms, "P-LAC-001"))
        .expect("valid row");
    let table = session.export_table().to_vec();
    let ids = session.selected_variable_ids().clone();

    for expected in [
        WizardStep::VariableSelection,
        WizardStep::SourceSelection,
        WizardStep::Setup,
    ] {
        assert!(session.retreat());
        assert_eq!(session.step(), expected);
        assert_eq!(session.selected_sources(), SourceSelection::both());
        assert_eq!(session.selected_variable_ids(), &ids);
        assert_eq!(session.export_table(), table.as_slice());
    }
    assert!(!session.retreat());
    assert_eq!(session.step(), WizardStep::Setup);
}

#[test]
fn revisiting_variable_step_rebuilds_export_table() {
    let mut session = session_at_review(&["hr-001"]);
    session
        .add_manual_row(&ManualRowInput::new("Lactate", SourceCoverage::Pdms, "P-LAC-001"))
        .expect("valid row");
    assert_eq!(session.export_table().len(), 2);

    session.retreat();
    session.toggle_variable("bp-001").expect("known id");
    session.advance();

    let names: Vec<&str> = session
        .export_table()
        .iter()
        .map(|r| r.variable.as_str())
        .collect();
    assert_eq!(names, vec!["Heart Rate", "Blood Pressure"]);
    assert!(
        session
            .export_table()
            .iter()
            .all(|r| r.status == RowStatus::Published)
    );
}

#[test]
fn entering_variable_step_drops_ids_outside_sources() {
    let mut session = WizardSession::default();
    session.advance();
    session.set_sources(SourceSelection::both());
    session.advance();
    session.toggle_variable("mf-pdms-001").expect("known id");
    session.toggle_variable("hr-001").expect("known id");

    session.retreat();
    session.set_sources(SourceSelection::epic_only());
    session.advance();

    let ids: Vec<&str> = session
        .selected_variable_ids()
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(ids, vec!["hr-001"]);
}

#[test]
fn narrowing_sources_on_variable_step_prunes_before_export() {
    let mut session = WizardSession::default();
    session.advance();
    session.set_sources(SourceSelection::both());
    session.advance();
    session.toggle_variable("hr-001").expect("known id");
    session.toggle_variable("mf-pdms-001").expect("known id");

    session.set_sources(SourceSelection::epic_only());
    assert!(session.advance());

    let names: Vec<&str> = session
        .export_table()
        .iter()
        .map(|r| r.variable.as_str())
        .collect();
    assert_eq!(names, vec!["Heart Rate"]);
    assert!(!session.is_selected("mf-pdms-001"));
}

#[test]
fn only_hidden_selection_blocks_variable_step() {
    let mut session = WizardSession::default();
    session.advance();
    session.set_sources(SourceSelection::epic_only());
    session.advance();
    session.toggle_variable("mf-pdms-001").expect("known id");

    let visible = session.variable_selection_view().options.len();
    assert_eq!(visible, 8);
    assert!(!session.can_advance());
    assert!(!session.advance());
    assert_eq!(session.step(), WizardStep::VariableSelection);
    assert!(session.is_selected("mf-pdms-001"));
    assert!(session.export_table().is_empty());
}

#[test]
fn blank_manual_name_is_rejected() {
    let mut session = session_at_review(&["hr-001"]);
    let before = session.export_table().len();
    let err = session
        .add_manual_row(&ManualRowInput::new("   ", SourceCoverage::Epic, "E-X-001"))
        .unwrap_err();
    assert!(matches!(
        err,
        WizardError::Validation(ValidationError::MissingName)
    ));
    assert_eq!(session.export_table().len(), before);
}

#[test]
fn deleting_absent_name_changes_nothing() {
    let mut session = session_at_review(&["hr-001", "qt-001"]);
    let before = session.export_table().to_vec();
    assert_eq!(session.delete_rows(["Not In Table"]), 0);
    assert_eq!(session.export_table(), before.as_slice());
}

#[test]
fn delete_preserves_order_of_remaining_rows() {
    let mut session = session_at_review(&["hr-001", "bp-001", "co-001"]);
    session
        .add_manual_row(&ManualRowInput::new("Lactate", SourceCoverage::Both, "E-L / P-L"))
        .expect("valid row");
    assert_eq!(session.delete_rows(["Blood Pressure"]), 1);
    let names: Vec<&str> = session
        .export_table()
        .iter()
        .map(|r| r.variable.as_str())
        .collect();
    assert_eq!(names, vec!["Heart Rate", "Cardiac Output", "Lactate"]);
}

#[test]
fn export_reimport_preselects_same_variables() {
    let mut session = session_at_review(&["qt-001", "rr-001", "mf-epic-001"]);
    session
        .add_manual_row(&ManualRowInput::new("Lactate", SourceCoverage::Pdms, "P-LAC-001"))
        .expect("valid row");
    let date = NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date");
    let export = session.export_csv_on(date).expect("export");
    assert_eq!(export.filename, "variable-mapping-2026-10-18.csv");
    assert_eq!(export.mime, "text/csv");

    let mut reloaded = WizardSession::default();
    reloaded.set_project_type(ProjectType::LoadExisting);
    reloaded
        .import_config_csv(export.bytes.as_slice())
        .expect("reimport");
    assert!(reloaded.advance());

    let ids: Vec<&str> = reloaded
        .selected_variable_ids()
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(ids, vec!["mf-epic-001", "qt-001", "rr-001"]);
}

#[test]
fn import_matches_names_loosely() {
    let mut session = WizardSession::default();
    session.set_project_type(ProjectType::LoadExisting);
    session.set_imported_config(ImportedConfig::from_variable_names([
        "  heart RATE ",
        "spo2",
        "Unknown Thing",
    ]));
    assert!(session.advance());
    let ids: Vec<&str> = session
        .selected_variable_ids()
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(ids, vec!["hr-001", "spo2-001"]);
}

#[test]
fn declined_import_awaits_new_upload() {
    let mut session = WizardSession::default();
    session.set_project_type(ProjectType::LoadExisting);
    session
        .import_config_csv("Variable\nHeart Rate\n".as_bytes())
        .expect("valid config");
    assert!(session.can_advance());

    session.clear_imported_config();
    assert!(session.imported_config().is_none());
    assert!(!session.can_advance());
    match session.view().body {
        StepView::Setup(setup) => assert!(setup.awaiting_upload()),
        other => panic!("unexpected view: {other:?}"),
    }
}

#[test]
fn failed_import_leaves_session_unchanged() {
    let mut session = WizardSession::default();
    session.set_project_type(ProjectType::LoadExisting);
    let err = session
        .import_config_csv("Name\nHeart Rate\n".as_bytes())
        .unwrap_err();
    assert!(matches!(err, WizardError::Import(_)));
    assert!(session.imported_config().is_none());
    assert!(!session.can_advance());
}

#[test]
fn review_view_exposes_table_and_summary() {
    let session = session_at_review(&["gcs-001"]);
    let view = session.view();
    assert_eq!(view.title, "Show & Export Selected Variables");
    assert!(view.can_retreat);
    match view.body {
        StepView::ReviewExport(review) => {
            assert_eq!(review.rows.len(), 1);
            assert_eq!(review.rows[0].id_code, "E-GCS-001 / P-GCS-001");
            assert_eq!(review.summary.published, 1);
        }
        other => panic!("unexpected view: {other:?}"),
    }
}

#[derive(Debug, Clone)]
enum Command {
    Advance,
    Retreat,
    Sources(bool, bool),
    Toggle(usize),
    Project(bool),
}

const IDS: [&str; 9] = [
    "hr-001",
    "bp-001",
    "co-001",
    "qt-001",
    "spo2-001",
    "rr-001",
    "gcs-001",
    "mf-epic-001",
    "mf-pdms-001",
];

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::Advance),
        Just(Command::Retreat),
        (any::<bool>(), any::<bool>()).prop_map(|(e, p)| Command::Sources(e, p)),
        (0..IDS.len()).prop_map(Command::Toggle),
        any::<bool>().prop_map(Command::Project),
    ]
}

proptest! {
    #[test]
    fn navigation_invariants_hold(commands in prop::collection::vec(command(), 0..40)) {
        let mut session = WizardSession::default();
        for command in commands {
            match command {
                Command::Advance => {
                    let before = session.step();
                    let gate = session.can_advance();
                    let moved = session.advance();
                    prop_assert_eq!(moved, gate);
                    if !gate {
                        prop_assert_eq!(session.step(), before);
                    }
                    if moved && session.step() == WizardStep::ReviewExport {
                        let sources = session.selected_sources();
                        for row in session.export_table() {
                            // neither source selected shows the whole catalogue
                            let offered = !sources.any() || match row.source {
                                SourceCoverage::Both => true,
                                SourceCoverage::Epic => sources.epic,
                                SourceCoverage::Pdms => sources.pdms,
                                SourceCoverage::Unavailable => false,
                            };
                            prop_assert!(offered, "{} exported under {}", row.variable, sources);
                        }
                    }
                }
                Command::Retreat => {
                    let sources = session.selected_sources();
                    let ids = session.selected_variable_ids().clone();
                    let table = session.export_table().to_vec();
                    session.retreat();
                    prop_assert_eq!(session.selected_sources(), sources);
                    prop_assert_eq!(session.selected_variable_ids(), &ids);
                    prop_assert_eq!(session.export_table(), table.as_slice());
                }
                Command::Sources(epic, pdms) => {
                    session.set_sources(SourceSelection { epic, pdms });
                }
                Command::Toggle(idx) => {
                    session.toggle_variable(IDS[idx]).expect("seed id");
                }
                Command::Project(load) => session.set_project_type(if load {
                    ProjectType::LoadExisting
                } else {
                    ProjectType::NewProject
                }),
            }
            let number = session.step().number();
            prop_assert!((1..=4).contains(&number));
        }
    }
}
