//! Error types for the commit-reveal module.

use namelease_core::Digest;
use thiserror::Error;

/// Errors that can occur during commit or reveal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitError {
    /// The digest is already committed.
    #[error("commitment already exists: {0}")]
    DuplicateCommitment(Digest),

    /// The digest is unknown, already consumed, or does not match the
    /// revealed arguments.
    #[error("invalid commitment: {0}")]
    InvalidCommitment(Digest),
}

/// Result type for commit-reveal operations.
pub type Result<T> = std::result::Result<T, CommitError>;
