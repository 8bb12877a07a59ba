//! Step-driven selection state machine for the variable mapping wizard.

#![deny(unsafe_code)]

pub mod error;
pub mod session;
pub mod step;
pub mod view;

pub use error::{Result, WizardError};
pub use session::{SessionSummary, WizardSession};
pub use step::WizardStep;
pub use view::{
    ReviewExportView, SessionView, SetupView, SourceSelectionView, StepView, VariableOption,
    VariableSelectionView,
};
