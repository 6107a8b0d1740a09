//! The signing capability consumed by record builders.

use crate::account::AccountNumber;
use crate::error::RecordError;
use crate::types::Signature;

/// A key that can sign record payloads and name its own account.
///
/// Builders never see key material: they hand canonical bytes to `sign` and
/// record whatever signature comes back. Implementations must be reusable
/// across any number of signs.
pub trait AuthKey {
    /// Failure of the underlying signer, propagated as an opaque source.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Sign a message.
    fn sign(&self, message: &[u8]) -> Result<Signature, Self::Error>;

    /// The account whose public key verifies this key's signatures.
    fn account_number(&self) -> AccountNumber;
}

impl<K: AuthKey + ?Sized> AuthKey for &K {
    type Error = K::Error;

    fn sign(&self, message: &[u8]) -> Result<Signature, Self::Error> {
        (**self).sign(message)
    }

    fn account_number(&self) -> AccountNumber {
        (**self).account_number()
    }
}

/// Sign through a key, wrapping its failure as [`RecordError::Signer`].
pub(crate) fn sign_with<K: AuthKey + ?Sized>(
    key: &K,
    message: &[u8],
) -> Result<Signature, RecordError> {
    key.sign(message).map_err(|e| RecordError::Signer(Box::new(e)))
}
