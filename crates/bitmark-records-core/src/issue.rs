//! Issue: the creation of a bitmark (ownership claim) against an asset.
//!
//! An issue references its asset by id only. The nonce distinguishes issues
//! of the same asset by the same owner; when none is given a random one is
//! drawn at signing time.

use serde_json::{json, Value};
use std::fmt;

use crate::account::AccountNumber;
use crate::asset::{Asset, AssetBuilder};
use crate::auth::{sign_with, AuthKey};
use crate::canonical::{decode_issue, issue_signing_bytes, pack};
use crate::error::{RecordError, Result, ValidationError};
use crate::types::{AssetId, Nonce, Signature, TxId};

/// Something an issue can point at: a signed asset or an asset id.
pub trait AssetReference {
    /// Resolve the referenced asset id.
    fn asset_id(&self) -> Result<AssetId>;
}

impl AssetReference for Asset {
    fn asset_id(&self) -> Result<AssetId> {
        Ok(self.id())
    }
}

impl AssetReference for AssetBuilder {
    fn asset_id(&self) -> Result<AssetId> {
        Err(RecordError::MissingAssetId)
    }
}

impl AssetReference for AssetId {
    fn asset_id(&self) -> Result<AssetId> {
        Ok(*self)
    }
}

impl AssetReference for str {
    fn asset_id(&self) -> Result<AssetId> {
        AssetId::from_hex(self).map_err(|e| RecordError::invalid("asset", e.to_string()))
    }
}

impl AssetReference for String {
    fn asset_id(&self) -> Result<AssetId> {
        self.as_str().asset_id()
    }
}

impl<T: AssetReference + ?Sized> AssetReference for &T {
    fn asset_id(&self) -> Result<AssetId> {
        (**self).asset_id()
    }
}

/// Builder for issue records.
#[derive(Debug, Clone, Default)]
pub struct IssueBuilder {
    asset: Option<AssetId>,
    nonce: Option<Nonce>,
}

impl IssueBuilder {
    /// Start building an issue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reference the asset being issued.
    pub fn from_asset<R: AssetReference + ?Sized>(&mut self, asset: &R) -> Result<&mut Self> {
        self.asset = Some(asset.asset_id()?);
        Ok(self)
    }

    /// Set the nonce. Accepts any integer type, or a JSON value.
    pub fn set_nonce<N>(&mut self, nonce: N) -> Result<&mut Self>
    where
        N: TryInto<Nonce, Error = RecordError>,
    {
        self.nonce = Some(nonce.try_into()?);
        Ok(self)
    }

    pub fn asset(&self) -> Option<&AssetId> {
        self.asset.as_ref()
    }

    pub fn nonce(&self) -> Option<Nonce> {
        self.nonce
    }

    pub fn is_signed(&self) -> bool {
        false
    }

    /// Build and sign the issue, drawing a random nonce if none was set.
    pub fn sign<K: AuthKey + ?Sized>(&self, key: &K) -> Result<Issue> {
        let asset = self.asset.ok_or(RecordError::MissingField("asset"))?;
        let nonce = self.nonce.unwrap_or_else(Nonce::random);
        let owner = key.account_number();

        let message = issue_signing_bytes(&asset, &owner, nonce);
        let signature = sign_with(key, &message)?;

        Ok(Issue {
            asset,
            nonce,
            owner,
            signature,
        })
    }
}

/// A signed issue record.
#[derive(Clone, PartialEq, Eq)]
pub struct Issue {
    asset: AssetId,
    nonce: Nonce,
    owner: AccountNumber,
    signature: Signature,
}

impl Issue {
    pub fn asset(&self) -> &AssetId {
        &self.asset
    }

    pub fn nonce(&self) -> Nonce {
        self.nonce
    }

    /// The issuer, who owns the new bitmark.
    pub fn owner(&self) -> &AccountNumber {
        &self.owner
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn is_signed(&self) -> bool {
        true
    }

    /// Transaction id: SHA3-256 of the packed record.
    pub fn id(&self) -> TxId {
        TxId::hash(&self.pack())
    }

    /// The bytes the owner signed.
    pub fn signing_bytes(&self) -> Vec<u8> {
        issue_signing_bytes(&self.asset, &self.owner, self.nonce)
    }

    /// Signing bytes followed by the signature.
    pub fn pack(&self) -> Vec<u8> {
        pack(&self.signing_bytes(), &self.signature)
    }

    /// Decode a packed issue and verify its signature.
    pub fn unpack(bytes: &[u8]) -> std::result::Result<Self, ValidationError> {
        let (asset, owner, nonce, signature) = decode_issue(bytes)?;
        let issue = Self {
            asset,
            nonce,
            owner,
            signature,
        };
        issue.verify()?;
        Ok(issue)
    }

    /// Verify the owner's signature.
    pub fn verify(&self) -> std::result::Result<(), ValidationError> {
        self.owner.verify(&self.signing_bytes(), &self.signature)
    }

    /// JSON projection: exactly `{owner, signature, asset, nonce}`.
    pub fn to_json(&self) -> Value {
        json!({
            "owner": self.owner.to_string(),
            "signature": self.signature.to_hex(),
            "asset": self.asset.to_hex(),
            "nonce": self.nonce.get(),
        })
    }

    /// Parse the JSON projection and verify the signature.
    ///
    /// The object must hold exactly the fields `to_json` writes.
    pub fn from_json(value: &Value) -> std::result::Result<Self, ValidationError> {
        let object = value
            .as_object()
            .ok_or_else(|| RecordError::invalid("issue", "expected a JSON object"))?;
        if let Some(key) = object.keys().find(|k| !JSON_FIELDS.contains(&k.as_str())) {
            return Err(RecordError::invalid("issue", format!("unexpected field {key:?}")).into());
        }

        let owner: AccountNumber = text_field(value, "owner")?.parse()?;
        let signature = Signature::from_hex(text_field(value, "signature")?)
            .map_err(|e| RecordError::invalid("signature", e.to_string()))?;
        let asset = text_field(value, "asset")?.asset_id()?;
        let nonce = Nonce::try_from(field(value, "nonce")?)?;

        let issue = Self {
            asset,
            nonce,
            owner,
            signature,
        };
        issue.verify()?;
        Ok(issue)
    }
}

const JSON_FIELDS: [&str; 4] = ["owner", "signature", "asset", "nonce"];

fn field<'a>(value: &'a Value, name: &'static str) -> Result<&'a Value> {
    value.get(name).ok_or(RecordError::MissingField(name))
}

fn text_field<'a>(value: &'a Value, name: &'static str) -> Result<&'a str> {
    field(value, name)?
        .as_str()
        .ok_or_else(|| RecordError::invalid(name, "expected a string"))
}

impl fmt::Debug for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Issue")
            .field("asset", &self.asset)
            .field("nonce", &self.nonce)
            .field("owner", &self.owner)
            .field("signature", &self.signature)
            .finish()
    }
}
