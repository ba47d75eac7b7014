//! # Namelease Core
//!
//! Pure primitives for the name lease registry: identifiers, pricing,
//! lease records, settlements, and the canonical commitment encoding.
//!
//! This crate contains no I/O and no shared state. It is pure computation
//! over the values the registry and its collaborators exchange.
//!
//! ## Key Types
//!
//! - [`AccountId`] - 32-byte account identifier, [`AccountId::UNOWNED`] is the sentinel
//! - [`Name`] - Validated, non-empty name
//! - [`Record`] - Lease state held against a name
//! - [`PricingPolicy`] - `price_per_unit * len(name) * duration`
//! - [`Settlement`] - Ordered transfers a registry change requires
//! - [`Digest`] - Output of the commitment [`HashPrimitive`]
//!
//! ## Canonicalization
//!
//! Commitment preimages are encoded as deterministic CBOR. See [`canonical`].

pub mod canonical;
pub mod clock;
pub mod crypto;
pub mod error;
pub mod pricing;
pub mod record;
pub mod settlement;
pub mod types;

pub use canonical::{commitment_preimage, COMMIT_DOMAIN};
pub use clock::{Clock, ManualClock};
pub use crypto::{Blake3Hasher, Digest, HashPrimitive};
pub use error::{CoreError, Result};
pub use pricing::PricingPolicy;
pub use record::Record;
pub use settlement::{Party, Settlement, Transfer};
pub use types::{AccountId, Amount, Name, Tick};
