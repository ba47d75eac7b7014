//! Error types for the registration service.

use namelease_commit::CommitError;
use namelease_core::{Amount, CoreError};
use namelease_ledger::LedgerError;
use namelease_registry::RegistryError;
use thiserror::Error;

/// Errors that can occur during service operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Registry transition rejected.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Commit or reveal rejected.
    #[error("commitment error: {0}")]
    Commit(#[from] CommitError),

    /// Ledger refused the settlement.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Invalid input value.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Restored state does not match the ledger's escrow.
    #[error("escrow mismatch: records lock {locked}, ledger escrow holds {escrow}")]
    EscrowMismatch { locked: Amount, escrow: Amount },

    /// Snapshot bytes could not be decoded or encoded.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// Configuration could not be parsed.
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

/// Flat classification of [`ServiceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    AlreadyRegistered,
    InsufficientPayment,
    NotOwner,
    NotFound,
    BalanceLocked,
    InvalidCommitment,
    /// Malformed input, duplicate commitment, overflow, bad config or snapshot.
    Invalid,
    /// The ledger could not settle, or state and ledger disagree.
    Settlement,
}

impl ServiceError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Registry(e) => match e {
                RegistryError::AlreadyRegistered(_) => ErrorKind::AlreadyRegistered,
                RegistryError::InsufficientPayment { .. } => ErrorKind::InsufficientPayment,
                RegistryError::NotOwner(_) => ErrorKind::NotOwner,
                RegistryError::NotFound(_) => ErrorKind::NotFound,
                RegistryError::BalanceLocked { .. } => ErrorKind::BalanceLocked,
                RegistryError::InvalidAccount
                | RegistryError::DuplicateRecord(_)
                | RegistryError::StaleChange { .. }
                | RegistryError::Core(_) => ErrorKind::Invalid,
            },
            ServiceError::Commit(CommitError::InvalidCommitment(_)) => {
                ErrorKind::InvalidCommitment
            }
            ServiceError::Commit(CommitError::DuplicateCommitment(_)) => ErrorKind::Invalid,
            ServiceError::Ledger(_) | ServiceError::EscrowMismatch { .. } => {
                ErrorKind::Settlement
            }
            ServiceError::Core(_)
            | ServiceError::InvalidSnapshot(_)
            | ServiceError::InvalidConfig(_) => ErrorKind::Invalid,
        }
    }
}

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;
