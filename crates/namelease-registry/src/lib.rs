//! # Namelease Registry
//!
//! The name → [`Record`] map and its lease/escrow transitions.
//!
//! ## Two-phase changes
//!
//! Mutations are split so that validation always precedes any transfer:
//!
//! 1. `prepare_register` / `prepare_renew` / `prepare_withdraw` take `&self`,
//!    run every check, and return a [`PendingChange`] carrying the next
//!    record and the [`Settlement`] it needs.
//! 2. [`Registry::commit`] hands the settlement to a callback (the ledger)
//!    and writes the record only if the callback succeeds.
//!
//! A failed check or a failed settlement leaves the registry untouched,
//! including a displaced owner's escrow.
//!
//! [`Record`]: namelease_core::Record
//! [`Settlement`]: namelease_core::Settlement

pub mod change;
pub mod error;
pub mod registry;

pub use change::{ChangeKind, Ejection, PendingChange};
pub use error::{RegistryError, Result};
pub use registry::Registry;
