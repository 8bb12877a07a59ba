//! CLI library components for the variable mapping wizard.

pub mod config;
pub mod logging;
pub mod scripted;
