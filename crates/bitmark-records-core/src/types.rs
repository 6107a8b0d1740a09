//! Strong type definitions for Bitmark records.
//!
//! All identifiers are newtypes to prevent misuse at compile time.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha3::{Digest, Sha3_256, Sha3_512};
use std::fmt;

use crate::error::RecordError;

/// A 64-byte asset identifier, computed as SHA3-512(fingerprint).
///
/// Two assets registered with the same fingerprint share an id, which is
/// what lets several registrants refer to the same piece of content.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct AssetId(pub [u8; 64]);

impl AssetId {
    /// Derive the id of the asset with the given fingerprint.
    pub fn from_fingerprint(fingerprint: &str) -> Self {
        let digest = Sha3_512::digest(fingerprint.as_bytes());
        let mut arr = [0u8; 64];
        arr.copy_from_slice(&digest);
        Self(arr)
    }

    /// Create a new AssetId from raw bytes.
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 64 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 64];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetId({}...)", &self.to_hex()[..16])
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for AssetId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<AssetId> for String {
    fn from(id: AssetId) -> Self {
        id.to_hex()
    }
}

impl TryFrom<String> for AssetId {
    type Error = hex::FromHexError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl TryFrom<&[u8]> for AssetId {
    type Error = std::array::TryFromSliceError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 64] = slice.try_into()?;
        Ok(Self(arr))
    }
}

/// A 32-byte transaction identifier, computed as SHA3-256(packed record).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxId(pub [u8; 32]);

impl TxId {
    /// Hash packed record bytes into a transaction id.
    pub fn hash(packed: &[u8]) -> Self {
        let digest = Sha3_256::digest(packed);
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&digest);
        Self(arr)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxId({}...)", &self.to_hex()[..16])
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Signature bytes returned by an [`AuthKey`](crate::auth::AuthKey).
///
/// The length depends on the signing scheme (64 bytes for ed25519).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Signature(Bytes);

impl Signature {
    /// Wrap raw signature bytes.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        Ok(Self(hex::decode(s)?.into()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_hex();
        write!(f, "Sig({}...)", &hex[..hex.len().min(16)])
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// An issue nonce: any value representable as an unsigned 64-bit integer.
///
/// Conversions from signed, wider, and JSON inputs are checked and fail
/// with [`RecordError::InvalidNonce`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Nonce(u64);

impl Nonce {
    /// Every `u64` is a valid nonce.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// Draw a random nonce, never zero.
    pub fn random() -> Self {
        use rand::Rng;
        Self(rand::thread_rng().gen_range(1..=u64::MAX))
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! nonce_from_unsigned {
    ($($t:ty),*) => {$(
        impl TryFrom<$t> for Nonce {
            type Error = RecordError;

            fn try_from(value: $t) -> Result<Self, Self::Error> {
                Ok(Self(value as u64))
            }
        }
    )*};
}

macro_rules! nonce_from_checked {
    ($($t:ty),*) => {$(
        impl TryFrom<$t> for Nonce {
            type Error = RecordError;

            fn try_from(value: $t) -> Result<Self, Self::Error> {
                u64::try_from(value).map(Self).map_err(|_| {
                    RecordError::InvalidNonce(format!("{value} is not in 0..=2^64-1"))
                })
            }
        }
    )*};
}

nonce_from_unsigned!(u8, u16, u32, u64);
nonce_from_checked!(usize, u128, i8, i16, i32, i64, i128, isize);

impl TryFrom<&Value> for Nonce {
    type Error = RecordError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(n) => {
                if let Some(v) = n.as_u64() {
                    Ok(Self(v))
                } else if let Some(v) = n.as_i64() {
                    Err(RecordError::InvalidNonce(format!("{v} is negative")))
                } else {
                    Err(RecordError::InvalidNonce(format!("{n} is not an integer")))
                }
            }
            Value::String(_) => Err(RecordError::InvalidNonce("expected an integer, got a string".into())),
            Value::Array(_) => Err(RecordError::InvalidNonce("expected an integer, got an array".into())),
            other => Err(RecordError::InvalidNonce(format!("expected an integer, got {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_asset_id_hex_roundtrip() {
        let id = AssetId::from_bytes([0x42; 64]);
        let recovered = AssetId::from_hex(&id.to_hex()).unwrap();
        assert_eq!(id, recovered);
    }

    #[test]
    fn test_asset_id_from_fingerprint() {
        let id = AssetId::from_fingerprint("Test Bitmark Lib 11");
        assert_eq!(
            id.to_hex(),
            "3e6e66b398030966f087347d447ea0d35133099a247d0dd9bfec29ac2f853d20\
             de6ac10a8e5348ab7bdf16f8633780365e7ea62a39b5ab8c490dedd8573b3dc1"
        );
        assert_ne!(id, AssetId::from_fingerprint("Test Bitmark Lib 12"));
    }

    #[test]
    fn test_asset_id_rejects_wrong_length() {
        assert!(AssetId::from_hex("abcd").is_err());
        assert!(AssetId::from_hex(&"zz".repeat(64)).is_err());
    }

    #[test]
    fn test_asset_id_serde_as_hex() {
        let id = AssetId::from_bytes([0xab; 64]);
        let value = serde_json::to_value(id).unwrap();
        assert_eq!(value, json!("ab".repeat(64)));
        let back: AssetId = serde_json::from_value(value).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_nonce_integer_conversions() {
        assert_eq!(Nonce::try_from(0i32).unwrap().get(), 0);
        assert_eq!(Nonce::try_from(u64::MAX).unwrap().get(), u64::MAX);
        assert!(matches!(Nonce::try_from(-1i64), Err(RecordError::InvalidNonce(_))));
        assert!(matches!(
            Nonce::try_from(u64::MAX as u128 + 1),
            Err(RecordError::InvalidNonce(_))
        ));
    }

    #[test]
    fn test_nonce_new_accepts_full_range() {
        for n in [0, 1, 1_475_482_198_529, u64::MAX] {
            assert_eq!(Nonce::new(n), Nonce::try_from(n).unwrap());
            assert_eq!(Nonce::new(n).get(), n);
        }
    }

    #[test]
    fn test_nonce_json_conversions() {
        assert_eq!(Nonce::try_from(&json!(1475482198529u64)).unwrap().get(), 1475482198529);
        assert!(Nonce::try_from(&json!(-1)).is_err());
        assert!(Nonce::try_from(&json!(1.5)).is_err());
        assert!(Nonce::try_from(&json!("1")).is_err());
        assert!(Nonce::try_from(&json!([1, 2, 3])).is_err());
        assert!(Nonce::try_from(&Value::Null).is_err());
    }

    #[test]
    fn test_random_nonce_nonzero() {
        for _ in 0..64 {
            assert!(Nonce::random().get() > 0);
        }
    }

    #[test]
    fn test_signature_debug_short() {
        let sig = Signature::from_bytes(vec![0xcd; 64]);
        assert!(format!("{:?}", sig).starts_with("Sig(cdcd"));
        assert_eq!(sig.len(), 64);
        assert_eq!(Signature::from_hex(&sig.to_hex()).unwrap(), sig);
    }
}
