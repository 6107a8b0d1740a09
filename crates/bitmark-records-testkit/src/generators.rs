//! Proptest generators for property-based testing.

use proptest::prelude::*;

use bitmark_records_core::{Asset, AssetBuilder, AssetId, Keypair, Network, Nonce};

/// Generate a network.
pub fn network() -> impl Strategy<Value = Network> {
    prop_oneof![Just(Network::Livenet), Just(Network::Testnet)]
}

/// Generate a random keypair on either network.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    (any::<[u8; 32]>(), network()).prop_map(|(seed, network)| Keypair::from_seed(&seed, network))
}

/// Generate the AssetId of a random fingerprint.
pub fn asset_id() -> impl Strategy<Value = AssetId> {
    fingerprint().prop_map(|fp| AssetId::from_fingerprint(&fp))
}

/// Generate an asset name within the default limit.
pub fn asset_name() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ._-]{0,64}".prop_map(String::from)
}

/// Generate a non-empty hex fingerprint.
pub fn fingerprint() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<u8>(), 1..=64).prop_map(hex::encode)
}

/// Generate metadata entries. Keys may repeat.
pub fn metadata() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[a-z]{1,16}", "[a-zA-Z0-9 ]{0,32}"), 0..=8)
}

/// Generate a nonce, zero included.
pub fn nonce() -> impl Strategy<Value = Nonce> {
    any::<u64>().prop_map(Nonce::new)
}

/// Parameters for generating an asset.
#[derive(Debug, Clone)]
pub struct AssetParams {
    pub keypair: Keypair,
    pub name: String,
    pub fingerprint: String,
    pub metadata: Vec<(String, String)>,
}

impl Arbitrary for AssetParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (keypair(), asset_name(), fingerprint(), metadata())
            .prop_map(|(keypair, name, fingerprint, metadata)| AssetParams {
                keypair,
                name,
                fingerprint,
                metadata,
            })
            .boxed()
    }
}

/// Build an unsigned asset from parameters.
pub fn builder_from_params(params: &AssetParams) -> AssetBuilder {
    let mut builder = AssetBuilder::new();
    builder
        .set_name(params.name.as_str())
        .and_then(|b| b.set_fingerprint(params.fingerprint.as_str()))
        .expect("generated fields are within limits");
    for (key, value) in &params.metadata {
        builder
            .add_metadata(key.as_str(), value.as_str())
            .expect("generated metadata is within limits");
    }
    builder
}

/// Generate a signed asset from parameters.
pub fn asset_from_params(params: &AssetParams) -> Asset {
    builder_from_params(params)
        .sign(&params.keypair)
        .expect("keypair signing is infallible")
}
