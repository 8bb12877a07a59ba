use thiserror::Error;

/// A required field of the manual-entry form is missing or invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("please provide a variable name")]
    MissingName,
    #[error("please provide an ID code")]
    MissingIdCode,
    #[error("{0}")]
    InvalidSource(String),
}
