//! Canonical binary encoding for record signing payloads.
//!
//! Every value is self-delimiting:
//! - Unsigned integers: unsigned LEB128 varint
//! - Byte and text strings: `varint(len) || bytes`
//! - Metadata: a text string of `key NUL value NUL key NUL value ...`
//! - Accounts: a byte string of the account's binary form
//!
//! A record starts with a varint tag and lists its fields in a fixed order.
//! The packed form appends the signature as a byte string.
//!
//! **CRITICAL**: This layout is FROZEN. Changes break all existing signatures.

use crate::account::AccountNumber;
use crate::asset::Metadata;
use crate::error::ValidationError;
use crate::types::{AssetId, Nonce, Signature};

/// Record tags.
pub mod tags {
    pub const ASSET: u64 = 0x02;
    pub const ISSUE: u64 = 0x03;
}

/// Encode the signing payload of an asset.
///
/// Layout: tag || text(name) || text(fingerprint) || text(metadata) || bytes(registrant)
pub fn asset_signing_bytes(
    name: &str,
    fingerprint: &str,
    metadata: &Metadata,
    registrant: &AccountNumber,
) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_varint(&mut buf, tags::ASSET);
    encode_text(&mut buf, name);
    encode_text(&mut buf, fingerprint);
    encode_text(&mut buf, &metadata.to_canonical_string());
    encode_bytes(&mut buf, &registrant.to_bytes());
    buf
}

/// Encode the signing payload of an issue.
///
/// Layout: tag || bytes(asset_id) || bytes(owner) || varint(nonce)
pub fn issue_signing_bytes(asset: &AssetId, owner: &AccountNumber, nonce: Nonce) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_varint(&mut buf, tags::ISSUE);
    encode_bytes(&mut buf, asset.as_bytes());
    encode_bytes(&mut buf, &owner.to_bytes());
    encode_varint(&mut buf, nonce.get());
    buf
}

/// Append the signature to a signing payload.
pub fn pack(signing_bytes: &[u8], signature: &Signature) -> Vec<u8> {
    let mut buf = Vec::with_capacity(signing_bytes.len() + signature.len() + 1);
    buf.extend_from_slice(signing_bytes);
    encode_bytes(&mut buf, signature.as_bytes());
    buf
}

/// Encode an unsigned LEB128 varint.
pub fn encode_varint(buf: &mut Vec<u8>, n: u64) {
    // Writes into a Vec cannot fail.
    let _ = leb128::write::unsigned(buf, n);
}

/// Encode a length-prefixed byte string.
pub fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    encode_varint(buf, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

/// Encode a length-prefixed UTF-8 string.
pub fn encode_text(buf: &mut Vec<u8>, s: &str) {
    encode_bytes(buf, s.as_bytes());
}

/// Fields of a packed asset, in layout order.
pub type AssetParts = (String, String, Metadata, AccountNumber, Signature);

/// Fields of a packed issue, in layout order.
pub type IssueParts = (AssetId, AccountNumber, Nonce, Signature);

/// Decode a packed asset. Does not verify the signature.
pub fn decode_asset(bytes: &[u8]) -> Result<AssetParts, ValidationError> {
    let mut decoder = Decoder::new(bytes);
    decoder.expect_tag(tags::ASSET)?;

    let name = decoder.text()?.to_string();
    let fingerprint = decoder.text()?.to_string();
    let metadata = Metadata::from_canonical_string(decoder.text()?)?;
    let registrant = AccountNumber::from_bytes(decoder.bytes()?)?;
    let signature = Signature::from_bytes(decoder.bytes()?.to_vec());
    decoder.finish()?;

    Ok((name, fingerprint, metadata, registrant, signature))
}

/// Decode a packed issue. Does not verify the signature.
pub fn decode_issue(bytes: &[u8]) -> Result<IssueParts, ValidationError> {
    let mut decoder = Decoder::new(bytes);
    decoder.expect_tag(tags::ISSUE)?;

    let asset = AssetId::try_from(decoder.bytes()?)
        .map_err(|_| ValidationError::Malformed("asset id must be 64 bytes".into()))?;
    let owner = AccountNumber::from_bytes(decoder.bytes()?)?;
    let nonce = Nonce::try_from(decoder.varint()?)?;
    let signature = Signature::from_bytes(decoder.bytes()?.to_vec());
    decoder.finish()?;

    Ok((asset, owner, nonce, signature))
}

/// Cursor over packed record bytes.
struct Decoder<'a> {
    input: &'a [u8],
}

impl<'a> Decoder<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self { input }
    }

    fn varint(&mut self) -> Result<u64, ValidationError> {
        leb128::read::unsigned(&mut self.input)
            .map_err(|e| ValidationError::Malformed(format!("bad varint: {e}")))
    }

    fn expect_tag(&mut self, expected: u64) -> Result<(), ValidationError> {
        let got = self.varint()?;
        if got != expected {
            return Err(ValidationError::UnexpectedTag { expected, got });
        }
        Ok(())
    }

    fn bytes(&mut self) -> Result<&'a [u8], ValidationError> {
        let len = self.varint()?;
        let len = usize::try_from(len)
            .ok()
            .filter(|len| *len <= self.input.len())
            .ok_or_else(|| {
                ValidationError::Malformed(format!(
                    "length {len} exceeds remaining {} bytes",
                    self.input.len()
                ))
            })?;
        let (head, tail) = self.input.split_at(len);
        self.input = tail;
        Ok(head)
    }

    fn text(&mut self) -> Result<&'a str, ValidationError> {
        let bytes = self.bytes()?;
        std::str::from_utf8(bytes).map_err(|e| ValidationError::Malformed(e.to_string()))
    }

    fn finish(self) -> Result<(), ValidationError> {
        if !self.input.is_empty() {
            return Err(ValidationError::Malformed(format!(
                "{} trailing bytes",
                self.input.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::Network;

    fn varint(n: u64) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_varint(&mut buf, n);
        buf
    }

    #[test]
    fn test_varint_encoding() {
        assert_eq!(varint(0), vec![0x00]);
        assert_eq!(varint(0x7f), vec![0x7f]);
        assert_eq!(varint(0x80), vec![0x80, 0x01]);
        assert_eq!(varint(300), vec![0xac, 0x02]);
        assert_eq!(varint(u64::MAX).len(), 10);
    }

    #[test]
    fn test_varint_matches_leb128_reader() {
        for n in [0, 1, 127, 128, 16_384, 1_475_482_198_529, u64::MAX] {
            let buf = varint(n);
            let mut input = buf.as_slice();
            assert_eq!(leb128::read::unsigned(&mut input).unwrap(), n);
            assert!(input.is_empty());
        }
    }

    #[test]
    fn test_text_is_length_prefixed() {
        let mut buf = Vec::new();
        encode_text(&mut buf, "abc");
        assert_eq!(buf, vec![0x03, b'a', b'b', b'c']);
    }

    #[test]
    fn test_adjacent_strings_do_not_collide() {
        let owner = AccountNumber::new(Network::Testnet, [0x01; 32]);
        let meta = Metadata::new();
        let a = asset_signing_bytes("ab", "c", &meta, &owner);
        let b = asset_signing_bytes("a", "bc", &meta, &owner);
        assert_ne!(a, b);
    }

    #[test]
    fn test_issue_layout() {
        let asset = AssetId::from_bytes([0xaa; 64]);
        let owner = AccountNumber::new(Network::Testnet, [0x01; 32]);
        let nonce = Nonce::try_from(5u64).unwrap();
        let bytes = issue_signing_bytes(&asset, &owner, nonce);

        assert_eq!(bytes[0], 0x03);
        assert_eq!(bytes[1], 64);
        assert_eq!(&bytes[2..66], &[0xaa; 64]);
        assert_eq!(bytes[66], 33);
        assert_eq!(bytes[67], 0x13);
        assert_eq!(&bytes[68..100], &[0x01; 32]);
        assert_eq!(bytes[100], 5);
        assert_eq!(bytes.len(), 101);
    }

    #[test]
    fn test_issue_decode() {
        let asset = AssetId::from_bytes([0xaa; 64]);
        let owner = AccountNumber::new(Network::Livenet, [0x02; 32]);
        let nonce = Nonce::try_from(1_475_482_198_529u64).unwrap();
        let signature = Signature::from_bytes(vec![0x5a; 64]);
        let packed = pack(&issue_signing_bytes(&asset, &owner, nonce), &signature);

        let (a, o, n, s) = decode_issue(&packed).unwrap();
        assert_eq!(a, asset);
        assert_eq!(o, owner);
        assert_eq!(n, nonce);
        assert_eq!(s, signature);
    }

    #[test]
    fn test_decode_rejects_wrong_tag() {
        let owner = AccountNumber::new(Network::Testnet, [0x01; 32]);
        let packed = pack(
            &asset_signing_bytes("n", "f", &Metadata::new(), &owner),
            &Signature::from_bytes(vec![0; 64]),
        );
        assert!(matches!(
            decode_issue(&packed),
            Err(ValidationError::UnexpectedTag { expected: 3, got: 2 })
        ));
    }

    #[test]
    fn test_decode_rejects_truncated_and_trailing() {
        let asset = AssetId::from_bytes([0xaa; 64]);
        let owner = AccountNumber::new(Network::Testnet, [0x01; 32]);
        let nonce = Nonce::try_from(1u64).unwrap();
        let packed = pack(
            &issue_signing_bytes(&asset, &owner, nonce),
            &Signature::from_bytes(vec![0; 64]),
        );

        let truncated = &packed[..packed.len() - 1];
        assert!(matches!(decode_issue(truncated), Err(ValidationError::Malformed(_))));

        let mut trailing = packed.clone();
        trailing.push(0);
        assert!(matches!(decode_issue(&trailing), Err(ValidationError::Malformed(_))));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::account::Network;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_varint_decodes_to_same_value(n in any::<u64>()) {
            let mut buf = Vec::new();
            encode_varint(&mut buf, n);

            let mut decoder = Decoder::new(&buf);
            prop_assert_eq!(decoder.varint().unwrap(), n);
            prop_assert!(decoder.finish().is_ok());
        }

        #[test]
        fn test_issue_decode_restores_fields(
            id in any::<[u8; 32]>(),
            key in any::<[u8; 32]>(),
            n in any::<u64>(),
            sig in prop::collection::vec(any::<u8>(), 64),
        ) {
            let mut raw = [0u8; 64];
            raw[..32].copy_from_slice(&id);
            let asset = AssetId::from_bytes(raw);
            let owner = AccountNumber::new(Network::Livenet, key);
            let nonce = Nonce::try_from(n).unwrap();
            let signature = Signature::from_bytes(sig);

            let packed = pack(&issue_signing_bytes(&asset, &owner, nonce), &signature);
            let (a, o, decoded, s) = decode_issue(&packed).unwrap();

            prop_assert_eq!(a, asset);
            prop_assert_eq!(o, owner);
            prop_assert_eq!(decoded, nonce);
            prop_assert_eq!(s, signature);
        }

        #[test]
        fn test_metadata_canonical_string_parses_back(
            entries in prop::collection::vec(("[a-z]{1,8}", "[a-z0-9 ]{0,8}"), 0..6),
        ) {
            let metadata = Metadata::try_from_entries(entries).unwrap();
            let parsed = Metadata::from_canonical_string(&metadata.to_canonical_string()).unwrap();

            prop_assert_eq!(parsed.canonical_len(), metadata.canonical_len());
            prop_assert_eq!(parsed, metadata);
        }
    }
}
