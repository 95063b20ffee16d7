//! Error types for folio

use thiserror::Error;

/// Folio error type
#[derive(Error, Debug)]
pub enum FolioError {
    /// Anchor name that is not one of the page sections
    #[error("Unknown section anchor: {0}")]
    UnknownSection(String),

    /// No renderable region registered under this key
    #[error("Unknown target: {0}")]
    UnknownTarget(String),

    /// Activation edge string could not be parsed (e.g. "top 80%")
    #[error("Invalid activation edge '{0}'")]
    InvalidEdge(String),

    /// Easing name could not be parsed (e.g. "expo.out")
    #[error("Invalid easing '{0}'")]
    InvalidEasing(String),

    /// Trigger definition is inconsistent
    #[error("Invalid trigger: {0}")]
    InvalidTrigger(String),

    /// A required form field was empty
    #[error("Required field '{0}' is empty")]
    MissingField(&'static str),

    /// Submit called while a submission is already in flight
    #[error("A submission is already in progress")]
    AlreadySubmitting,

    /// Contact submission failed
    #[error("Submission failed: {0}")]
    Submission(String),

    /// Configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for folio operations
pub type Result<T> = std::result::Result<T, FolioError>;
