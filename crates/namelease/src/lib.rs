//! # Namelease
//!
//! A leasable name registry: participants pay to claim a name for a bounded
//! number of ticks, can renew or release it, and can register through a
//! commit-reveal flow that hides the name until it is claimed.
//!
//! ## Overview
//!
//! - **Leases**: a name resolves to its owner while `now < expiration`
//! - **Escrow**: the lease price stays locked against the name and is paid
//!   back on withdrawal, or to the old owner when someone else takes over
//!   an expired name
//! - **Commit-reveal**: commit a digest first, reveal the name later
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use namelease::{RegistrationService, ServiceConfig};
//! use namelease::core::{AccountId, ManualClock};
//! use namelease::ledger::{Ledger, MemoryLedger};
//!
//! let ledger = Arc::new(MemoryLedger::new());
//! let clock = Arc::new(ManualClock::new(1));
//! let mut service =
//!     RegistrationService::new(ServiceConfig::default(), ledger.clone(), clock.clone());
//!
//! let alice = AccountId::derive("alice");
//! ledger.fund(alice, 10_000).unwrap();
//!
//! // Commit without revealing the name
//! let digest = service.compute_digest("Friendship", &alice, 1000, 10);
//! service.register_commitment(digest).unwrap();
//!
//! // Reveal and register
//! let registration = service
//!     .safe_register(digest, "Friendship", 10, 1000, alice)
//!     .unwrap();
//! assert_eq!(registration.expiration, 11);
//! assert_eq!(service.resolve("Friendship"), alice);
//!
//! // After expiry the owner can take the escrow back
//! clock.advance(10);
//! service.withdraw("Friendship", alice).unwrap();
//! assert_eq!(ledger.balance(&alice).unwrap(), 10_000);
//! ```
//!
//! ## Re-exports
//!
//! - `namelease::core` - Primitives (AccountId, Name, PricingPolicy, ...)
//! - `namelease::ledger` - Settlement collaborator
//! - `namelease::commit` - Commit-reveal store
//! - `namelease::registry` - Lease state machine

pub mod error;
pub mod service;
pub mod snapshot;

// Re-export component crates
pub use namelease_commit as commit;
pub use namelease_core as core;
pub use namelease_ledger as ledger;
pub use namelease_registry as registry;

// Re-export main types for convenience
pub use error::{ErrorKind, Result, ServiceError};
pub use service::{Registration, RegistrationService, Renewal, ServiceConfig, Withdrawal};
pub use snapshot::{ServiceSnapshot, SNAPSHOT_VERSION};

pub use namelease_commit::DuplicateCommitment;
pub use namelease_core::{AccountId, Amount, Digest, Name, Tick};
pub use namelease_registry::Ejection;
