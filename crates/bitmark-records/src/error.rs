//! Error types for the registrar.

use bitmark_records_core::{KeyError, RecordError, ValidationError};
use thiserror::Error;

/// Errors that can occur during registrar operations.
#[derive(Debug, Error)]
pub enum RegistrarError {
    /// Building or signing failed.
    #[error("record error: {0}")]
    Record(#[from] RecordError),

    /// A freshly signed record did not validate.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The signing key could not be loaded.
    #[error("key error: {0}")]
    Key(#[from] KeyError),
}

/// Result type for registrar operations.
pub type Result<T> = std::result::Result<T, RegistrarError>;
