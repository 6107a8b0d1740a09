//! Account numbers: the public identity of a record's registrant or owner.
//!
//! Binary form is `varint(key_variant) || public_key`. Text form is base58
//! of the binary form followed by the first 4 bytes of its SHA3-256 digest.
//!
//! Key variant bits:
//! - bit 0: key part (0 = private, 1 = public)
//! - bit 1: network (0 = livenet, 1 = testnet)
//! - bits 4..: key algorithm (0x01 = ed25519)

use ed25519_dalek::{Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};
use std::fmt;
use std::str::FromStr;

use crate::canonical::encode_varint;
use crate::error::{KeyError, ValidationError};
use crate::types::Signature;

/// Length of the checksum appended to base58 encodings.
pub const CHECKSUM_LEN: usize = 4;

/// Length of an ed25519 public key.
pub const ED25519_PUBLIC_KEY_LEN: usize = 32;

const PUBLIC_PART: u64 = 0x01;
const NETWORK_BIT: u64 = 0x02;
const RESERVED_BITS: u64 = 0x0c;

/// The ledger network a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Network {
    #[default]
    Livenet,
    Testnet,
}

impl Network {
    fn bit(self) -> u64 {
        match self {
            Network::Livenet => 0,
            Network::Testnet => NETWORK_BIT,
        }
    }
}

/// The signature algorithm of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum KeyAlgorithm {
    Ed25519 = 0x01,
}

impl KeyAlgorithm {
    pub fn from_u64(value: u64) -> Option<Self> {
        match value {
            0x01 => Some(Self::Ed25519),
            _ => None,
        }
    }
}

/// A decoded key variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct KeyVariant {
    pub algorithm: KeyAlgorithm,
    pub network: Network,
    pub public: bool,
}

impl KeyVariant {
    pub fn to_u64(self) -> u64 {
        let part = if self.public { PUBLIC_PART } else { 0 };
        ((self.algorithm as u64) << 4) | self.network.bit() | part
    }

    pub fn from_u64(value: u64) -> Result<Self, KeyError> {
        if value & RESERVED_BITS != 0 {
            return Err(KeyError::InvalidVariant(format!("reserved bits set in {value:#x}")));
        }
        let algorithm = KeyAlgorithm::from_u64(value >> 4)
            .ok_or(KeyError::UnsupportedAlgorithm(value >> 4))?;
        let network = if value & NETWORK_BIT != 0 {
            Network::Testnet
        } else {
            Network::Livenet
        };
        Ok(Self {
            algorithm,
            network,
            public: value & PUBLIC_PART != 0,
        })
    }

    /// Read a variant prefix, advancing `input` past it.
    pub fn read(input: &mut &[u8]) -> Result<Self, KeyError> {
        let value = leb128::read::unsigned(input)
            .map_err(|e| KeyError::InvalidVariant(e.to_string()))?;
        Self::from_u64(value)
    }
}

/// First 4 bytes of SHA3-256(data).
pub(crate) fn checksum(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = Sha3_256::digest(data);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}

/// Base58 of `payload || checksum(payload)`.
pub(crate) fn encode_checked(payload: &[u8]) -> String {
    let mut buf = payload.to_vec();
    buf.extend_from_slice(&checksum(payload));
    bs58::encode(buf).into_string()
}

/// Decode base58 and strip a verified checksum.
pub(crate) fn decode_checked(s: &str) -> Result<Vec<u8>, KeyError> {
    let mut buf = bs58::decode(s)
        .into_vec()
        .map_err(|e| KeyError::InvalidEncoding(e.to_string()))?;
    if buf.len() <= CHECKSUM_LEN {
        return Err(KeyError::InvalidLength {
            expected: CHECKSUM_LEN + 1,
            got: buf.len(),
        });
    }
    let split = buf.len() - CHECKSUM_LEN;
    if checksum(&buf[..split]) != buf[split..] {
        return Err(KeyError::ChecksumMismatch);
    }
    buf.truncate(split);
    Ok(buf)
}

/// The public identity of a key pair.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct AccountNumber {
    network: Network,
    public_key: [u8; ED25519_PUBLIC_KEY_LEN],
}

impl AccountNumber {
    /// Create from an ed25519 public key.
    pub const fn new(network: Network, public_key: [u8; ED25519_PUBLIC_KEY_LEN]) -> Self {
        Self {
            network,
            public_key,
        }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn algorithm(&self) -> KeyAlgorithm {
        KeyAlgorithm::Ed25519
    }

    pub fn public_key(&self) -> &[u8; ED25519_PUBLIC_KEY_LEN] {
        &self.public_key
    }

    fn variant(&self) -> KeyVariant {
        KeyVariant {
            algorithm: self.algorithm(),
            network: self.network,
            public: true,
        }
    }

    /// Binary form used inside canonical record bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(1 + ED25519_PUBLIC_KEY_LEN);
        encode_varint(&mut buf, self.variant().to_u64());
        buf.extend_from_slice(&self.public_key);
        buf
    }

    /// Parse the binary form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let mut input = bytes;
        let variant = KeyVariant::read(&mut input)?;
        if !variant.public {
            return Err(KeyError::WrongKeyPart { expected: "public" });
        }
        let public_key: [u8; ED25519_PUBLIC_KEY_LEN] =
            input.try_into().map_err(|_| KeyError::InvalidLength {
                expected: ED25519_PUBLIC_KEY_LEN,
                got: input.len(),
            })?;
        Ok(Self::new(variant.network, public_key))
    }

    /// Verify a signature over a message.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), ValidationError> {
        let verifying_key =
            VerifyingKey::from_bytes(&self.public_key).map_err(|_| KeyError::InvalidPublicKey)?;
        let sig = ed25519_dalek::Signature::from_slice(signature.as_bytes())
            .map_err(|_| ValidationError::SignatureFailed)?;
        verifying_key
            .verify(message, &sig)
            .map_err(|_| ValidationError::SignatureFailed)
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_checked(&self.to_bytes()))
    }
}

impl fmt::Debug for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountNumber({:?}, {})", self.network, self)
    }
}

impl FromStr for AccountNumber {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(&decode_checked(s)?)
    }
}

impl From<AccountNumber> for String {
    fn from(account: AccountNumber) -> Self {
        account.to_string()
    }
}

impl TryFrom<String> for AccountNumber {
    type Error = KeyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
