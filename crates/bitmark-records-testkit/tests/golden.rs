//! Golden vectors: every implementation of the record encoding must
//! produce identical accounts, asset ids, signatures and tx ids.

use bitmark_records_core::{
    asset_signing_bytes, issue_signing_bytes, Asset, AssetId, Issue, Keypair, Metadata, Nonce,
};
use bitmark_records_testkit::vectors::{all_vectors, generate_records_from_vector, verify_all_vectors};

#[test]
fn test_all_vectors_match() {
    for (name, matches, output) in verify_all_vectors() {
        assert!(matches, "vector '{name}' mismatch: {output:#?}");
    }
}

#[test]
fn test_vector_fields_individually() {
    for vector in all_vectors() {
        let (asset, issue) = generate_records_from_vector(&vector);

        assert_eq!(asset.registrant().to_string(), vector.expected_account, "{}", vector.name);
        assert_eq!(asset.id().to_hex(), vector.expected_asset_id, "{}", vector.name);
        assert_eq!(
            asset.signature().to_hex(),
            vector.expected_asset_signature,
            "{}",
            vector.name
        );
        assert_eq!(
            issue.signature().to_hex(),
            vector.expected_issue_signature,
            "{}",
            vector.name
        );
        assert_eq!(issue.id().to_hex(), vector.expected_tx_id, "{}", vector.name);
    }
}

#[test]
fn test_signing_bytes_from_parts() {
    let vector = &all_vectors()[0];
    let keypair = Keypair::from_kif(vector.kif).unwrap();
    let account = keypair.account_number();
    let metadata = Metadata::try_from_entries(vector.metadata.iter().copied()).unwrap();

    let asset_bytes = asset_signing_bytes(vector.asset_name, vector.fingerprint, &metadata, &account);
    let asset_signature = keypair.sign(&asset_bytes);
    assert_eq!(asset_signature.to_hex(), vector.expected_asset_signature);

    let asset_id = AssetId::from_fingerprint(vector.fingerprint);
    let nonce = Nonce::try_from(vector.nonce).unwrap();
    let issue_bytes = issue_signing_bytes(&asset_id, &account, nonce);
    assert_eq!(keypair.sign(&issue_bytes).to_hex(), vector.expected_issue_signature);
}

#[test]
fn test_packed_vectors_decode() {
    for vector in all_vectors() {
        let (asset, issue) = generate_records_from_vector(&vector);

        let unpacked_asset = Asset::unpack(&asset.pack()).unwrap();
        assert_eq!(unpacked_asset.id().to_hex(), vector.expected_asset_id);

        let unpacked_issue = Issue::unpack(&issue.pack()).unwrap();
        assert_eq!(unpacked_issue.id().to_hex(), vector.expected_tx_id);
    }
}

#[test]
fn test_truncated_pack_rejected() {
    let (asset, issue) = generate_records_from_vector(&all_vectors()[1]);

    let packed = asset.pack();
    assert!(Asset::unpack(&packed[..packed.len() - 1]).is_err());

    let mut packed = issue.pack();
    packed.push(0);
    assert!(Issue::unpack(&packed).is_err());
}
