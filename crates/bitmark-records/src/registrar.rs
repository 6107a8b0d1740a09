//! The Registrar: one signing key, one record per call.
//!
//! Wraps the core builders so callers can register an asset or issue a
//! bitmark in a single call. Every record is checked against the
//! configured limits and, by default, verified right after signing.

use tracing::{debug, warn};

use bitmark_records_core::{
    validate_asset, validate_issue, AccountNumber, Asset, AssetBuilder, AssetReference, AuthKey,
    Issue, IssueBuilder, Keypair, RecordLimits,
};

use crate::error::Result;

/// Configuration for the Registrar.
#[derive(Debug, Clone)]
pub struct RegistrarConfig {
    /// Field limits applied to every asset.
    pub limits: RecordLimits,
    /// Whether to verify each record after signing it.
    pub verify_after_sign: bool,
}

impl Default for RegistrarConfig {
    fn default() -> Self {
        Self {
            limits: RecordLimits::default(),
            verify_after_sign: true,
        }
    }
}

/// Signs assets and issues with a single key.
pub struct Registrar<K: AuthKey> {
    key: K,
    config: RegistrarConfig,
}

impl Registrar<Keypair> {
    /// Create a registrar from a KIF-encoded private key.
    pub fn from_kif(kif: &str, config: RegistrarConfig) -> Result<Self> {
        Ok(Self::new(Keypair::from_kif(kif)?, config))
    }
}

impl<K: AuthKey> Registrar<K> {
    /// Create a new registrar.
    pub fn new(key: K, config: RegistrarConfig) -> Self {
        Self { key, config }
    }

    /// The account records are signed for.
    pub fn account_number(&self) -> AccountNumber {
        self.key.account_number()
    }

    pub fn config(&self) -> &RegistrarConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Record Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Register an asset.
    ///
    /// Metadata entries are added in iteration order; a repeated key keeps
    /// its first position and its last value.
    pub fn register_asset<I, MK, MV>(&self, name: &str, fingerprint: &str, metadata: I) -> Result<Asset>
    where
        I: IntoIterator<Item = (MK, MV)>,
        MK: Into<String>,
        MV: Into<String>,
    {
        let mut builder = AssetBuilder::with_limits(self.config.limits);
        builder.set_name(name)?.set_fingerprint(fingerprint)?;
        for (key, value) in metadata {
            builder.add_metadata(key, value)?;
        }

        let asset = builder.sign(&self.key)?;

        if self.config.verify_after_sign {
            if let Err(e) = validate_asset(&asset, &self.config.limits) {
                warn!(asset_id = %asset.id(), error = %e, "signed asset failed verification");
                return Err(e.into());
            }
        }

        debug!(
            asset_id = %asset.id(),
            registrant = %asset.registrant(),
            "asset registered"
        );
        Ok(asset)
    }

    /// Issue a bitmark on an asset. A random nonce is used when none is given.
    pub fn issue<R: AssetReference + ?Sized>(&self, asset: &R, nonce: Option<u64>) -> Result<Issue> {
        let mut builder = IssueBuilder::new();
        builder.from_asset(asset)?;
        if let Some(nonce) = nonce {
            builder.set_nonce(nonce)?;
        }

        let issue = builder.sign(&self.key)?;

        if self.config.verify_after_sign {
            if let Err(e) = validate_issue(&issue) {
                warn!(tx_id = %issue.id(), error = %e, "signed issue failed verification");
                return Err(e.into());
            }
        }

        debug!(
            tx_id = %issue.id(),
            asset_id = %issue.asset(),
            nonce = issue.nonce().get(),
            "issue signed"
        );
        Ok(issue)
    }

    /// Decode a packed asset under the configured limits.
    pub fn unpack_asset(&self, bytes: &[u8]) -> Result<Asset> {
        let asset = Asset::unpack_with_limits(bytes, &self.config.limits)?;
        debug!(asset_id = %asset.id(), "asset unpacked");
        Ok(asset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistrarError;
    use bitmark_records_core::{Network, RecordError, Signature, ValidationError};
    use std::convert::Infallible;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    }

    fn test_registrar() -> Registrar<Keypair> {
        init_tracing();
        Registrar::new(
            Keypair::from_seed(&[0x11; 32], Network::Testnet),
            RegistrarConfig::default(),
        )
    }

    /// Signs with one key while claiming another's account.
    struct MismatchedKey {
        signer: Keypair,
        claimed: Keypair,
    }

    impl AuthKey for MismatchedKey {
        type Error = Infallible;

        fn sign(&self, message: &[u8]) -> std::result::Result<Signature, Self::Error> {
            Ok(self.signer.sign(message))
        }

        fn account_number(&self) -> AccountNumber {
            self.claimed.account_number()
        }
    }

    #[test]
    fn test_register_asset() {
        let registrar = test_registrar();
        let asset = registrar
            .register_asset("photo", "f1f2f3", [("author", "ana"), ("year", "2016")])
            .unwrap();

        assert_eq!(asset.name(), "photo");
        assert_eq!(asset.registrant(), &registrar.account_number());
        assert_eq!(asset.metadata().get("year"), Some("2016"));
        asset.verify().unwrap();
    }

    #[test]
    fn test_register_asset_without_metadata() {
        let registrar = test_registrar();
        let asset = registrar
            .register_asset("bare", "00", Vec::<(String, String)>::new())
            .unwrap();
        assert!(asset.metadata().is_empty());
    }

    #[test]
    fn test_register_asset_applies_limits() {
        init_tracing();
        let config = RegistrarConfig {
            limits: RecordLimits {
                max_name_len: 3,
                ..RecordLimits::default()
            },
            ..RegistrarConfig::default()
        };
        let registrar = Registrar::new(Keypair::generate(Network::Livenet), config);

        let result = registrar.register_asset("long name", "ff", Vec::<(&str, &str)>::new());
        assert!(matches!(
            result,
            Err(RegistrarError::Record(RecordError::InvalidField { field: "name", .. }))
        ));
    }

    #[test]
    fn test_unpack_asset_uses_configured_limits() {
        init_tracing();
        let config = RegistrarConfig {
            limits: RecordLimits {
                max_name_len: 128,
                ..RecordLimits::default()
            },
            ..RegistrarConfig::default()
        };
        let registrar = Registrar::new(Keypair::from_seed(&[0x05; 32], Network::Testnet), config);

        let name = "n".repeat(100);
        let asset = registrar
            .register_asset(&name, "0a0b0c", [("author", "ana")])
            .unwrap();
        let packed = asset.pack();

        assert_eq!(registrar.unpack_asset(&packed).unwrap(), asset);
        assert!(matches!(
            test_registrar().unpack_asset(&packed),
            Err(RegistrarError::Validation(ValidationError::Record(
                RecordError::InvalidField { field: "name", .. }
            )))
        ));
    }

    #[test]
    fn test_issue_with_nonce() {
        let registrar = test_registrar();
        let asset = registrar
            .register_asset("photo", "f1f2f3", [("author", "ana")])
            .unwrap();

        let issue = registrar.issue(&asset, Some(7)).unwrap();
        assert_eq!(issue.asset(), &asset.id());
        assert_eq!(issue.nonce().get(), 7);
        assert_eq!(issue.owner(), &registrar.account_number());
    }

    #[test]
    fn test_issue_random_nonce_differs() {
        let registrar = test_registrar();
        let asset = registrar
            .register_asset("photo", "f1f2f3", [("author", "ana")])
            .unwrap();

        let a = registrar.issue(&asset, None).unwrap();
        let b = registrar.issue(&asset, None).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_issue_by_hex_id() {
        let registrar = test_registrar();
        let asset = registrar
            .register_asset("photo", "f1f2f3", [("author", "ana")])
            .unwrap();

        let by_hex = registrar.issue(asset.id().to_hex().as_str(), Some(1)).unwrap();
        let by_asset = registrar.issue(&asset, Some(1)).unwrap();
        assert_eq!(by_hex, by_asset);
    }

    #[test]
    fn test_verify_after_sign_catches_bad_key() {
        init_tracing();
        let key = MismatchedKey {
            signer: Keypair::from_seed(&[0x01; 32], Network::Testnet),
            claimed: Keypair::from_seed(&[0x02; 32], Network::Testnet),
        };
        let registrar = Registrar::new(key, RegistrarConfig::default());

        let result = registrar.register_asset("photo", "ab", [("k", "v")]);
        assert!(matches!(
            result,
            Err(RegistrarError::Validation(ValidationError::SignatureFailed))
        ));
    }

    #[test]
    fn test_verify_after_sign_disabled() {
        init_tracing();
        let key = MismatchedKey {
            signer: Keypair::from_seed(&[0x01; 32], Network::Testnet),
            claimed: Keypair::from_seed(&[0x02; 32], Network::Testnet),
        };
        let config = RegistrarConfig {
            verify_after_sign: false,
            ..RegistrarConfig::default()
        };
        let registrar = Registrar::new(key, config);

        let asset = registrar.register_asset("photo", "ab", [("k", "v")]).unwrap();
        assert!(asset.verify().is_err());
    }

    #[test]
    fn test_from_kif() {
        init_tracing();
        let registrar = Registrar::from_kif(
            "ce5MNS5PwvZ1bo5cU9Fex7He2tMpFP2Q42ToKZTBEBdA5f4dXm",
            RegistrarConfig::default(),
        )
        .unwrap();
        assert_eq!(
            registrar.account_number().to_string(),
            "fofit7KdvrS4wJ3dCZBrd425mUu217Ui9tGtVjypwDXzBQQEfS"
        );

        assert!(matches!(
            Registrar::from_kif("not-a-kif", RegistrarConfig::default()),
            Err(RegistrarError::Key(_))
        ));
    }
}
