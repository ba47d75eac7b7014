//! Error types for the registry.

use namelease_core::{Amount, CoreError, Name, Tick};
use thiserror::Error;

/// Errors that can occur during registry transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The name has an active lease.
    #[error("name {0} is already registered")]
    AlreadyRegistered(Name),

    /// The payment does not cover the required amount.
    #[error("insufficient payment: required {required}, paid {paid}")]
    InsufficientPayment { required: Amount, paid: Amount },

    /// The caller does not own the record.
    #[error("not the owner of {0}")]
    NotOwner(Name),

    /// No record exists for the name.
    #[error("name {0} not found")]
    NotFound(Name),

    /// Withdrawal attempted while the lease is active.
    #[error("balance of {name} is locked until tick {expires_at}")]
    BalanceLocked { name: Name, expires_at: Tick },

    /// The sentinel account cannot own a name.
    #[error("the unowned sentinel cannot register a name")]
    InvalidAccount,

    /// Imported records name the same entry twice.
    #[error("duplicate record for {0}")]
    DuplicateRecord(Name),

    /// The change was prepared against an older registry revision.
    #[error("stale change for {name}: prepared at revision {prepared}, registry at {current}")]
    StaleChange {
        name: Name,
        prepared: u64,
        current: u64,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
