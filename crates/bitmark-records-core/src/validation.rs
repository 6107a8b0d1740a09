//! Field constraints and signed-record validation.

use crate::asset::{Asset, Metadata};
use crate::error::{RecordError, ValidationError};
use crate::issue::Issue;
use crate::types::AssetId;

/// Separator between metadata keys and values in the canonical string.
pub const METADATA_SEPARATOR: char = '\u{0}';

/// Size limits applied to asset fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLimits {
    /// Maximum asset name length in bytes.
    pub max_name_len: usize,
    /// Maximum fingerprint length in bytes.
    pub max_fingerprint_len: usize,
    /// Maximum length in bytes of the canonical metadata string.
    pub max_metadata_len: usize,
}

impl Default for RecordLimits {
    fn default() -> Self {
        Self {
            max_name_len: 64,
            max_fingerprint_len: 1024,
            max_metadata_len: 2048,
        }
    }
}

pub fn check_name(name: &str, limits: &RecordLimits) -> Result<(), RecordError> {
    if name.len() > limits.max_name_len {
        return Err(RecordError::invalid(
            "name",
            format!("{} bytes exceeds limit of {}", name.len(), limits.max_name_len),
        ));
    }
    Ok(())
}

pub fn check_fingerprint(fingerprint: &str, limits: &RecordLimits) -> Result<(), RecordError> {
    if fingerprint.is_empty() {
        return Err(RecordError::invalid("fingerprint", "must not be empty"));
    }
    if fingerprint.len() > limits.max_fingerprint_len {
        return Err(RecordError::invalid(
            "fingerprint",
            format!(
                "{} bytes exceeds limit of {}",
                fingerprint.len(),
                limits.max_fingerprint_len
            ),
        ));
    }
    Ok(())
}

/// Keys must be non-empty; neither side may contain the separator.
pub fn check_metadata_entry(key: &str, value: &str) -> Result<(), RecordError> {
    if key.is_empty() {
        return Err(RecordError::invalid("metadata", "key must not be empty"));
    }
    if key.contains(METADATA_SEPARATOR) || value.contains(METADATA_SEPARATOR) {
        return Err(RecordError::invalid(
            "metadata",
            format!("entry {key:?} contains a NUL character"),
        ));
    }
    Ok(())
}

pub fn check_metadata(metadata: &Metadata, limits: &RecordLimits) -> Result<(), RecordError> {
    for (key, value) in metadata.iter() {
        check_metadata_entry(key, value)?;
    }
    let len = metadata.canonical_len();
    if len > limits.max_metadata_len {
        return Err(RecordError::invalid(
            "metadata",
            format!("{len} bytes exceeds limit of {}", limits.max_metadata_len),
        ));
    }
    Ok(())
}

/// Validate a signed asset: field constraints, id derivation and signature.
pub fn validate_asset(asset: &Asset, limits: &RecordLimits) -> Result<(), ValidationError> {
    validate_asset_structure(asset, limits)?;
    asset.verify()
}

/// Validate asset structure without signature verification.
pub fn validate_asset_structure(asset: &Asset, limits: &RecordLimits) -> Result<(), ValidationError> {
    check_name(asset.name(), limits)?;
    check_fingerprint(asset.fingerprint(), limits)?;
    check_metadata(asset.metadata(), limits)?;

    if asset.id() != AssetId::from_fingerprint(asset.fingerprint()) {
        return Err(ValidationError::Malformed(
            "asset id does not match fingerprint".into(),
        ));
    }
    Ok(())
}

/// Validate a signed issue.
pub fn validate_issue(issue: &Issue) -> Result<(), ValidationError> {
    issue.verify()
}
