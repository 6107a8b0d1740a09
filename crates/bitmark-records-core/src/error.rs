//! Error types for Bitmark record construction, keys and verification.

use thiserror::Error;

/// Errors raised while building or signing a record.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("invalid nonce: {0}")]
    InvalidNonce(String),

    #[error("asset has no id: it must be signed before it can be issued")]
    MissingAssetId,

    #[error("signer failed: {0}")]
    Signer(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RecordError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        RecordError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors raised while parsing keys and account numbers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("invalid base58 encoding: {0}")]
    InvalidEncoding(String),

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("invalid key variant: {0}")]
    InvalidVariant(String),

    #[error("unsupported key algorithm: {0:#x}")]
    UnsupportedAlgorithm(u64),

    #[error("expected a {expected} key")]
    WrongKeyPart { expected: &'static str },

    #[error("invalid key length: expected {expected}, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("invalid public key")]
    InvalidPublicKey,
}

/// Errors raised while decoding or verifying signed records.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("signature verification failed")]
    SignatureFailed,

    #[error("unexpected record tag: expected {expected}, got {got}")]
    UnexpectedTag { expected: u64, got: u64 },

    #[error("malformed record: {0}")]
    Malformed(String),

    #[error("key error: {0}")]
    Key(#[from] KeyError),

    #[error("record error: {0}")]
    Record(#[from] RecordError),
}

/// Result type for record operations.
pub type Result<T> = std::result::Result<T, RecordError>;
