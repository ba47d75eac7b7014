//! Error types for the ledger module.

use namelease_core::{Amount, Party};
use thiserror::Error;

/// Errors that can occur while settling transfers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// A debit exceeds the available balance.
    #[error("insufficient funds in {party}: needed {needed}, available {available}")]
    InsufficientFunds {
        party: Party,
        needed: Amount,
        available: Amount,
    },

    /// A credit would overflow the balance.
    #[error("balance overflow in {0}")]
    BalanceOverflow(Party),

    /// The ledger lock was poisoned by a panicking writer.
    #[error("ledger lock poisoned")]
    LockPoisoned,
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
