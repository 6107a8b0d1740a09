//! Ed25519 key pairs and their KIF (key interchange format) encoding.
//!
//! KIF is base58 of `varint(private_variant) || seed || checksum`, where
//! the checksum is the first 4 bytes of SHA3-256 over everything before it.

use ed25519_dalek::{Signer, SigningKey};
use std::convert::Infallible;
use std::fmt;

use crate::account::{decode_checked, encode_checked, AccountNumber, KeyAlgorithm, KeyVariant, Network};
use crate::auth::AuthKey;
use crate::canonical::encode_varint;
use crate::error::KeyError;
use crate::types::Signature;

/// Length of an ed25519 seed.
pub const ED25519_SEED_LEN: usize = 32;

/// An ed25519 key pair bound to a network.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
    network: Network,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate(network: Network) -> Self {
        let mut rng = rand::thread_rng();
        let signing_key = SigningKey::generate(&mut rng);
        Self {
            signing_key,
            network,
        }
    }

    /// Create from a 32-byte seed.
    pub fn from_seed(seed: &[u8; ED25519_SEED_LEN], network: Network) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
            network,
        }
    }

    /// Parse a KIF string.
    pub fn from_kif(kif: &str) -> Result<Self, KeyError> {
        let raw = decode_checked(kif)?;
        let mut input = raw.as_slice();
        let variant = KeyVariant::read(&mut input)?;
        if variant.public {
            return Err(KeyError::WrongKeyPart { expected: "private" });
        }
        let seed: [u8; ED25519_SEED_LEN] =
            input.try_into().map_err(|_| KeyError::InvalidLength {
                expected: ED25519_SEED_LEN,
                got: input.len(),
            })?;
        Ok(Self::from_seed(&seed, variant.network))
    }

    /// Encode as a KIF string.
    pub fn to_kif(&self) -> String {
        let variant = KeyVariant {
            algorithm: KeyAlgorithm::Ed25519,
            network: self.network,
            public: false,
        };
        let mut buf = Vec::with_capacity(1 + ED25519_SEED_LEN);
        encode_varint(&mut buf, variant.to_u64());
        buf.extend_from_slice(&self.seed());
        encode_checked(&buf)
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// Get the account number of this key's public half.
    pub fn account_number(&self) -> AccountNumber {
        AccountNumber::new(self.network, self.signing_key.verifying_key().to_bytes())
    }

    /// Sign a message.
    pub fn sign(&self, message: &[u8]) -> Signature {
        let sig = self.signing_key.sign(message);
        Signature::from_bytes(sig.to_bytes().to_vec())
    }

    /// Get the raw seed bytes (secret key material).
    pub fn seed(&self) -> [u8; ED25519_SEED_LEN] {
        self.signing_key.to_bytes()
    }
}

impl AuthKey for Keypair {
    type Error = Infallible;

    fn sign(&self, message: &[u8]) -> Result<Signature, Self::Error> {
        Ok(Keypair::sign(self, message))
    }

    fn account_number(&self) -> AccountNumber {
        Keypair::account_number(self)
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({:?})", self.account_number())
    }
}
