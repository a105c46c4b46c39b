//! Error types shared across the lead pipeline

use thiserror::Error;

/// Errors raised by the lead pipeline
///
/// An unclassifiable signal is not an error: the classifier returns `None`
/// and the caller simply skips lead creation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Empty or malformed static registry. Fatal at startup.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Feedback or input that cannot be applied. No state change occurred.
    #[error("Invalid value for {field}: {message}")]
    Validation { field: String, message: String },

    /// Raised by the persistence collaborator when a lead changed underneath
    /// a read-modify-write. Re-invoke with refreshed state.
    #[error("Lead {lead_id} was modified concurrently (expected version {expected}, found {found})")]
    ConcurrencyConflict {
        lead_id: String,
        expected: u64,
        found: u64,
    },

    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
