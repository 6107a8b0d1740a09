//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use bitmark_records_core::{AccountNumber, Asset, AssetBuilder, Issue, IssueBuilder, Keypair, Network};

/// A test fixture holding one testnet keypair.
pub struct TestFixture {
    pub keypair: Keypair,
}

impl TestFixture {
    /// Create a new test fixture with a random keypair.
    pub fn new() -> Self {
        Self {
            keypair: Keypair::generate(Network::Testnet),
        }
    }

    /// Create with a deterministic keypair from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            keypair: Keypair::from_seed(&seed, Network::Testnet),
        }
    }

    pub fn account_number(&self) -> AccountNumber {
        self.keypair.account_number()
    }

    /// Register and sign an asset.
    pub fn make_asset(&self, name: &str, fingerprint: &str, metadata: &[(&str, &str)]) -> Asset {
        let mut builder = AssetBuilder::new();
        builder
            .set_name(name)
            .and_then(|b| b.set_fingerprint(fingerprint))
            .expect("fixture asset fields are valid");
        for (key, value) in metadata {
            builder
                .add_metadata(*key, *value)
                .expect("fixture metadata is valid");
        }
        builder.sign(&self.keypair).expect("keypair signing is infallible")
    }

    /// Issue a bitmark on an asset with a fixed nonce.
    pub fn make_issue(&self, asset: &Asset, nonce: u64) -> Issue {
        IssueBuilder::new()
            .from_asset(asset)
            .and_then(|b| b.set_nonce(nonce))
            .and_then(|b| b.sign(&self.keypair))
            .expect("fixture issue is valid")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple test fixtures for multi-party tests.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            TestFixture::with_seed(seed)
        })
        .collect()
}
