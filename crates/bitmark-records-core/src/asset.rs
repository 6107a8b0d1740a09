//! Asset: the registration of a piece of content.
//!
//! An [`AssetBuilder`] accumulates name, fingerprint and metadata. Signing
//! it produces an immutable [`Asset`] carrying the registrant, signature and
//! the asset id. The builder is never mutated by signing.

use indexmap::IndexMap;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;

use crate::account::AccountNumber;
use crate::auth::{sign_with, AuthKey};
use crate::canonical::{asset_signing_bytes, decode_asset, pack};
use crate::error::{RecordError, Result, ValidationError};
use crate::types::{AssetId, Signature};
use crate::validation::{
    check_fingerprint, check_metadata, check_metadata_entry, check_name, validate_asset,
    RecordLimits, METADATA_SEPARATOR,
};

/// Asset metadata: unique keys in insertion order.
///
/// Every entry has a non-empty key and no NUL in key or value, so the
/// canonical string always parses back to the same entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Metadata(IndexMap<String, String>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build metadata from entries, checking each one.
    ///
    /// A repeated key keeps its first position and its last value.
    pub fn try_from_entries<I, K, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut metadata = Self::new();
        for (key, value) in entries {
            let (key, value) = (key.into(), value.into());
            check_metadata_entry(&key, &value)?;
            metadata.insert(key, value);
        }
        Ok(metadata)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Insert or overwrite. An overwritten key keeps its position.
    fn insert(&mut self, key: String, value: String) {
        self.0.insert(key, value);
    }

    /// `key NUL value NUL key NUL value ...`
    pub fn to_canonical_string(&self) -> String {
        let mut out = String::with_capacity(self.canonical_len());
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                out.push(METADATA_SEPARATOR);
            }
            out.push_str(key);
            out.push(METADATA_SEPARATOR);
            out.push_str(value);
        }
        out
    }

    pub fn canonical_len(&self) -> usize {
        let separators = (self.0.len() * 2).saturating_sub(1);
        self.0.iter().map(|(k, v)| k.len() + v.len()).sum::<usize>() + separators
    }

    /// Parse the canonical string form.
    pub fn from_canonical_string(s: &str) -> Result<Self> {
        let mut metadata = Self::new();
        if s.is_empty() {
            return Ok(metadata);
        }
        let parts: Vec<&str> = s.split(METADATA_SEPARATOR).collect();
        if parts.len() % 2 != 0 {
            return Err(RecordError::invalid("metadata", "odd number of fields"));
        }
        for pair in parts.chunks(2) {
            let (key, value) = (pair[0], pair[1]);
            check_metadata_entry(key, value)?;
            if metadata.0.contains_key(key) {
                return Err(RecordError::invalid(
                    "metadata",
                    format!("duplicate key {key:?}"),
                ));
            }
            metadata.insert(key.to_string(), value.to_string());
        }
        Ok(metadata)
    }
}

impl TryFrom<IndexMap<String, String>> for Metadata {
    type Error = RecordError;

    fn try_from(entries: IndexMap<String, String>) -> Result<Self> {
        Self::try_from_entries(entries)
    }
}

impl<'de> Deserialize<'de> for Metadata {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let entries = IndexMap::<String, String>::deserialize(deserializer)?;
        Self::try_from(entries).map_err(de::Error::custom)
    }
}

/// Builder for asset records.
#[derive(Debug, Clone, Default)]
pub struct AssetBuilder {
    name: Option<String>,
    fingerprint: Option<String>,
    metadata: Metadata,
    limits: RecordLimits,
}

impl AssetBuilder {
    /// Start building an asset with the default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building an asset with custom limits.
    pub fn with_limits(limits: RecordLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    /// Set the name.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<&mut Self> {
        let name = name.into();
        check_name(&name, &self.limits)?;
        self.name = Some(name);
        Ok(self)
    }

    /// Add a metadata entry, overwriting any previous value for the key.
    pub fn add_metadata(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<&mut Self> {
        let (key, value) = (key.into(), value.into());
        check_metadata_entry(&key, &value)?;

        let mut next = self.metadata.clone();
        next.insert(key, value);
        check_metadata(&next, &self.limits)?;

        self.metadata = next;
        Ok(self)
    }

    /// Set the fingerprint.
    pub fn set_fingerprint(&mut self, fingerprint: impl Into<String>) -> Result<&mut Self> {
        let fingerprint = fingerprint.into();
        check_fingerprint(&fingerprint, &self.limits)?;
        self.fingerprint = Some(fingerprint);
        Ok(self)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// An unsigned asset is never signed.
    pub fn is_signed(&self) -> bool {
        false
    }

    /// JSON of the fields set so far.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        if let Some(name) = &self.name {
            map.insert("name".into(), Value::String(name.clone()));
        }
        if let Some(fingerprint) = &self.fingerprint {
            map.insert("fingerprint".into(), Value::String(fingerprint.clone()));
        }
        map.insert("metadata".into(), metadata_json(&self.metadata));
        Value::Object(map)
    }

    /// Build and sign the asset.
    pub fn sign<K: AuthKey + ?Sized>(&self, key: &K) -> Result<Asset> {
        let name = self.name.clone().ok_or(RecordError::MissingField("name"))?;
        let fingerprint = self
            .fingerprint
            .clone()
            .ok_or(RecordError::MissingField("fingerprint"))?;

        let registrant = key.account_number();
        let message = asset_signing_bytes(&name, &fingerprint, &self.metadata, &registrant);
        let signature = sign_with(key, &message)?;
        let id = AssetId::from_fingerprint(&fingerprint);

        Ok(Asset {
            name,
            fingerprint,
            metadata: self.metadata.clone(),
            registrant,
            signature,
            id,
        })
    }
}

/// A signed asset record.
#[derive(Clone, PartialEq, Eq)]
pub struct Asset {
    name: String,
    fingerprint: String,
    metadata: Metadata,
    registrant: AccountNumber,
    signature: Signature,
    id: AssetId,
}

impl Asset {
    /// The asset id, SHA3-512 of the fingerprint.
    pub fn id(&self) -> AssetId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// The account that signed the registration.
    pub fn registrant(&self) -> &AccountNumber {
        &self.registrant
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn is_signed(&self) -> bool {
        true
    }

    /// The bytes the registrant signed.
    pub fn signing_bytes(&self) -> Vec<u8> {
        asset_signing_bytes(&self.name, &self.fingerprint, &self.metadata, &self.registrant)
    }

    /// Signing bytes followed by the signature.
    pub fn pack(&self) -> Vec<u8> {
        pack(&self.signing_bytes(), &self.signature)
    }

    /// Decode a packed asset, checking fields against the default limits
    /// and the signature.
    pub fn unpack(bytes: &[u8]) -> std::result::Result<Self, ValidationError> {
        Self::unpack_with_limits(bytes, &RecordLimits::default())
    }

    /// Decode a packed asset, checking fields against `limits` and the
    /// signature.
    pub fn unpack_with_limits(
        bytes: &[u8],
        limits: &RecordLimits,
    ) -> std::result::Result<Self, ValidationError> {
        let (name, fingerprint, metadata, registrant, signature) = decode_asset(bytes)?;
        let id = AssetId::from_fingerprint(&fingerprint);
        let asset = Self {
            name,
            fingerprint,
            metadata,
            registrant,
            signature,
            id,
        };
        validate_asset(&asset, limits)?;
        Ok(asset)
    }

    /// Verify the registrant's signature.
    pub fn verify(&self) -> std::result::Result<(), ValidationError> {
        self.registrant.verify(&self.signing_bytes(), &self.signature)
    }

    /// JSON projection: `{id, name, fingerprint, metadata, registrant, signature}`.
    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id.to_hex(),
            "name": self.name,
            "fingerprint": self.fingerprint,
            "metadata": metadata_json(&self.metadata),
            "registrant": self.registrant.to_string(),
            "signature": self.signature.to_hex(),
        })
    }
}

impl fmt::Debug for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Asset")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("registrant", &self.registrant)
            .field("metadata_len", &self.metadata.len())
            .finish()
    }
}

fn metadata_json(metadata: &Metadata) -> Value {
    Value::Object(
        metadata
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect(),
    )
}
