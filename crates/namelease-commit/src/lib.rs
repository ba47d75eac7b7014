//! # Namelease Commit
//!
//! Commit-reveal protocol layered on top of registration.
//!
//! ## Overview
//!
//! A registrant first publishes only a [`Digest`] binding the name, their
//! account, the payment and the lease duration. Observers learn nothing
//! about the name. The later reveal recomputes the digest from the plain
//! arguments; because the caller is bound into it, nobody else can replay
//! the commitment for themselves.
//!
//! ## Key Types
//!
//! - [`CommitmentStore`] - Committed digests and the reveal flow
//! - [`Commitment`] - Metadata stored per digest
//! - [`RevealTicket`] - Proof that a reveal was validated; required to consume
//! - [`DuplicateCommitment`] - Policy for re-committing an existing digest
//!
//! [`Digest`]: namelease_core::Digest

pub mod digest;
pub mod error;
pub mod store;

pub use digest::compute_digest;
pub use error::{CommitError, Result};
pub use store::{Commitment, CommitmentStore, DuplicateCommitment, RevealTicket};
