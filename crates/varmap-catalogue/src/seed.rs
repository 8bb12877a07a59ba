//! Built-in catalogue of monitoring variables.

use varmap_model::VariableRecord;

/// (id, name, organ system, group, EPIC id, PDMS id, unit)
const SEED: &[(&str, &str, &str, &str, &str, &str, &str)] = &[
    // Cardiology
    ("hr-001", "Heart Rate", "Cardiology", "Heart", "E-HR-001", "P-HR-001", "bpm"),
    ("bp-001", "Blood Pressure", "Cardiology", "Heart", "E-BP-001", "P-BP-001", "mmHg"),
    ("co-001", "Cardiac Output", "Cardiology", "Heart", "E-CO-001", "P-CO-001", "L/min"),
    ("qt-001", "QT Interval", "Cardiology", "ECG", "E-QT-001", "P-QT-001", "ms"),
    // Respiratory
    ("spo2-001", "SpO2", "Respiratory", "Lungs", "E-SPO2-001", "P-SPO2-001", "%"),
    ("rr-001", "Respiratory Rate", "Respiratory", "Lungs", "E-RR-001", "P-RR-001", "breaths/min"),
    // Neurology
    ("gcs-001", "Glasgow Coma Scale", "Neurology", "Brain", "E-GCS-001", "P-GCS-001", "score"),
    ("mf-epic-001", "Motor Function (EPIC only)", "Neurology", "Motor", "E-MF-001", "", "score"),
    ("mf-pdms-001", "Motor Function (PDMS only)", "Neurology", "Motor", "", "P-MF-001", "score"),
];

pub(crate) fn seed_records() -> Vec<VariableRecord> {
    SEED.iter()
        .map(|&(id, name, organ_system, group, epic_id, pdms_id, unit)| {
            VariableRecord::new(id, name, organ_system, group, epic_id, pdms_id, unit)
        })
        .collect()
}
