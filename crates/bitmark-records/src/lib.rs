//! # Bitmark Records
//!
//! Build and sign Bitmark asset and issue records.
//!
//! ## Overview
//!
//! - **Assets**: Registration of a piece of content by its fingerprint
//! - **Issues**: Ownership claims (bitmarks) created on a registered asset
//! - **Registrar**: A single signing key wrapped with limits and verification
//!
//! ## Usage
//!
//! ```rust
//! use bitmark_records::{Registrar, RegistrarConfig};
//! use bitmark_records::core::{Keypair, Network};
//!
//! # fn main() -> bitmark_records::Result<()> {
//! let registrar = Registrar::new(Keypair::generate(Network::Testnet), RegistrarConfig::default());
//!
//! let asset = registrar.register_asset("sunset.jpg", "01ab23cd", [("author", "ana")])?;
//! let issue = registrar.issue(&asset, None)?;
//!
//! assert_eq!(issue.asset(), &asset.id());
//! # Ok(())
//! # }
//! ```
//!
//! ## Re-exports
//!
//! - `bitmark_records::core` - Builders, records, keys and the canonical encoding

pub mod error;
pub mod registrar;

pub use bitmark_records_core as core;

pub use error::{RegistrarError, Result};
pub use registrar::{Registrar, RegistrarConfig};

pub use bitmark_records_core::{
    AccountNumber, Asset, AssetBuilder, AssetId, AssetReference, AuthKey, Issue, IssueBuilder,
    Keypair, Metadata, Network, Nonce, RecordLimits, Signature, TxId,
};
