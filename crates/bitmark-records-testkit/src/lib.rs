//! # Bitmark Records Testkit
//!
//! Testing utilities for Bitmark records.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known inputs with expected accounts, ids and signatures
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for setting up test scenarios
//!
//! ## Golden Vectors
//!
//! ```rust
//! use bitmark_records_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, output) in verify_all_vectors() {
//!     assert!(matches, "{name}: {output:?}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use bitmark_records_testkit::generators::{asset_from_params, AssetParams};
//!
//! proptest! {
//!     #[test]
//!     fn asset_id_is_deterministic(params: AssetParams) {
//!         let a1 = asset_from_params(&params);
//!         let a2 = asset_from_params(&params);
//!         prop_assert_eq!(a1.id(), a2.id());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use bitmark_records_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let asset = fixture.make_asset("photo", "0a0b0c", &[("author", "ana")]);
//! let issue = fixture.make_issue(&asset, 1);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, TestFixture};
pub use generators::{asset_from_params, AssetParams};
pub use vectors::{all_vectors, generate_records_from_vector, verify_all_vectors, GoldenVector};
