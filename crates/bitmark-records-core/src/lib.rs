//! # Bitmark Records Core
//!
//! Pure primitives for Bitmark records: assets, issues, accounts, and the
//! canonical encoding they are signed over.
//!
//! This crate contains no I/O, no storage, no networking.
//!
//! ## Key Types
//!
//! - [`AssetBuilder`] / [`Asset`] - Registration of a piece of content
//! - [`IssueBuilder`] / [`Issue`] - Creation of an ownership claim on an asset
//! - [`AuthKey`] - The signing capability records are signed with
//! - [`AccountNumber`] - Public identity of a registrant or owner
//! - [`Keypair`] - An ed25519 [`AuthKey`] with KIF import/export
//!
//! ## Lifecycle
//!
//! Builders are the unsigned state; `sign` returns the signed record. Only
//! builders have setters and only records have ids and signatures, so a
//! signed record can never be modified or signed again.
//!
//! ```rust
//! use bitmark_records_core::{AssetBuilder, IssueBuilder, Keypair, Network};
//!
//! # fn main() -> Result<(), bitmark_records_core::RecordError> {
//! let key = Keypair::generate(Network::Testnet);
//!
//! let asset = AssetBuilder::new()
//!     .set_name("sunset.jpg")?
//!     .add_metadata("author", "ana")?
//!     .set_fingerprint("01ab23cd")?
//!     .sign(&key)?;
//!
//! let issue = IssueBuilder::new()
//!     .from_asset(&asset)?
//!     .sign(&key)?;
//!
//! assert_eq!(issue.asset(), &asset.id());
//! # Ok(())
//! # }
//! ```
//!
//! ## Canonicalization
//!
//! Records are signed over a varint-delimited binary layout. See the
//! [`canonical`] module.

pub mod account;
pub mod asset;
pub mod auth;
pub mod canonical;
pub mod crypto;
pub mod error;
pub mod issue;
pub mod types;
pub mod validation;

pub use account::{AccountNumber, KeyAlgorithm, Network};
pub use asset::{Asset, AssetBuilder, Metadata};
pub use auth::AuthKey;
pub use canonical::{asset_signing_bytes, issue_signing_bytes};
pub use crypto::Keypair;
pub use error::{KeyError, RecordError, Result, ValidationError};
pub use issue::{AssetReference, Issue, IssueBuilder};
pub use types::{AssetId, Nonce, Signature, TxId};
pub use validation::{validate_asset, validate_asset_structure, validate_issue, RecordLimits};
