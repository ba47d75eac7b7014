//! # Namelease Testkit
//!
//! Testing utilities for Namelease.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Vectors**: Known prices and commitment preimages for cross-platform verification
//! - **Generators**: Proptest strategies over registry operations
//! - **Fixtures**: A service wired to an in-memory ledger and a manual clock
//!
//! ## Vectors
//!
//! ```rust
//! use namelease_testkit::vectors::{all_price_vectors, verify_all_vectors};
//!
//! for vector in all_price_vectors() {
//!     println!("{} x {}: {}", vector.name, vector.duration, vector.expected);
//! }
//! assert!(verify_all_vectors().iter().all(|(_, ok, _)| *ok));
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use namelease_testkit::{apply_op, Op, TestFixture};
//!
//! proptest! {
//!     #[test]
//!     fn escrow_always_matches(ops in prop::collection::vec(any::<Op>(), 1..50)) {
//!         let mut fixture = TestFixture::new();
//!         let accounts = fixture.accounts(3);
//!         for op in &ops {
//!             let _ = apply_op(&mut fixture, &accounts, op);
//!             prop_assert!(fixture.service.check_escrow().is_ok());
//!         }
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use namelease_testkit::fixtures::TestFixture;
//!
//! let mut fixture = TestFixture::new();
//! let alice = fixture.account("alice");
//! fixture.service.register("Friendship", 10, 1000, alice).unwrap();
//! fixture.advance(10);
//! assert!(!fixture.service.is_registered("Friendship"));
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{init_tracing, TestFixture, DEFAULT_FUNDING};
pub use generators::{apply_op, Op};
pub use vectors::{
    all_commitment_vectors, all_price_vectors, verify_all_vectors, CommitmentVector, PriceVector,
};
