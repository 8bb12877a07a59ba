//! Wizard steps.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four screens of the wizard, in order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum WizardStep {
    /// Choose a new project or load an existing configuration.
    #[default]
    Setup,
    /// Choose EPIC and/or PDMS.
    SourceSelection,
    /// Browse, filter and check variables.
    VariableSelection,
    /// Review, edit and export the mapping table.
    ReviewExport,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Setup,
        WizardStep::SourceSelection,
        WizardStep::VariableSelection,
        WizardStep::ReviewExport,
    ];

    /// 1-based step number.
    pub fn number(self) -> u8 {
        match self {
            WizardStep::Setup => 1,
            WizardStep::SourceSelection => 2,
            WizardStep::VariableSelection => 3,
            WizardStep::ReviewExport => 4,
        }
    }

    /// Following step; the last step stays put.
    pub fn next(self) -> Self {
        match self {
            WizardStep::Setup => WizardStep::SourceSelection,
            WizardStep::SourceSelection => WizardStep::VariableSelection,
            WizardStep::VariableSelection | WizardStep::ReviewExport => WizardStep::ReviewExport,
        }
    }

    /// Preceding step; the first step stays put.
    pub fn previous(self) -> Self {
        match self {
            WizardStep::Setup | WizardStep::SourceSelection => WizardStep::Setup,
            WizardStep::VariableSelection => WizardStep::SourceSelection,
            WizardStep::ReviewExport => WizardStep::VariableSelection,
        }
    }

    pub fn is_first(self) -> bool {
        self == WizardStep::Setup
    }

    pub fn is_last(self) -> bool {
        self == WizardStep::ReviewExport
    }

    /// Screen title.
    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Setup => "Variable Mapping Setup",
            WizardStep::SourceSelection => "Select Data Source",
            WizardStep::VariableSelection => "Choose Variables",
            WizardStep::ReviewExport => "Show & Export Selected Variables",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_and_previous_clamp() {
        assert_eq!(WizardStep::ReviewExport.next(), WizardStep::ReviewExport);
        assert_eq!(WizardStep::Setup.previous(), WizardStep::Setup);
        let numbers: Vec<u8> = WizardStep::ALL.iter().map(|step| step.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }

    #[test]
    fn display_includes_number_and_title() {
        assert_eq!(
            WizardStep::VariableSelection.to_string(),
            "3. Choose Variables"
        );
    }
}
