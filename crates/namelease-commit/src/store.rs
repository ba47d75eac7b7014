//! Commitment storage and the reveal flow.
//!
//! Commitments are consumed exactly once, by a successful reveal. Nothing
//! expires on its own: an unrevealed commitment stays until it is revealed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use namelease_core::{AccountId, Amount, Digest, HashPrimitive, Tick};

use crate::digest::compute_digest;
use crate::error::{CommitError, Result};

/// What to do when a digest that is already committed is committed again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateCommitment {
    /// Fail with [`CommitError::DuplicateCommitment`].
    #[default]
    Reject,
    /// Keep the original entry and succeed.
    Ignore,
}

/// Metadata kept for a committed digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commitment {
    /// The committed digest.
    pub digest: Digest,

    /// Tick at which it was first committed.
    pub committed_at: Tick,
}

/// Proof that a reveal matched a stored commitment.
///
/// Only [`CommitmentStore::check_reveal`] creates tickets, so a commitment
/// can only be consumed after its reveal was validated.
#[derive(Debug, PartialEq, Eq)]
pub struct RevealTicket {
    digest: Digest,
}

impl RevealTicket {
    /// The validated digest.
    pub fn digest(&self) -> &Digest {
        &self.digest
    }
}

/// Committed digests.
#[derive(Debug, Default)]
pub struct CommitmentStore {
    commitments: HashMap<Digest, Commitment>,
    duplicates: DuplicateCommitment,
}

impl CommitmentStore {
    /// Create an empty store with the given duplicate policy.
    pub fn new(duplicates: DuplicateCommitment) -> Self {
        Self {
            commitments: HashMap::new(),
            duplicates,
        }
    }

    /// Rebuild a store from previously exported commitments.
    pub fn from_commitments(
        duplicates: DuplicateCommitment,
        commitments: impl IntoIterator<Item = Commitment>,
    ) -> Self {
        Self {
            commitments: commitments.into_iter().map(|c| (c.digest, c)).collect(),
            duplicates,
        }
    }

    /// Store `digest` as committed at `now`.
    ///
    /// # Returns
    /// - `Ok(true)` if the digest was stored.
    /// - `Ok(false)` if it already existed and the policy is `Ignore`.
    /// - `DuplicateCommitment` if it already existed and the policy is `Reject`.
    pub fn register(&mut self, digest: Digest, now: Tick) -> Result<bool> {
        if self.commitments.contains_key(&digest) {
            return match self.duplicates {
                DuplicateCommitment::Reject => Err(CommitError::DuplicateCommitment(digest)),
                DuplicateCommitment::Ignore => Ok(false),
            };
        }

        self.commitments.insert(
            digest,
            Commitment {
                digest,
                committed_at: now,
            },
        );
        tracing::debug!(%digest, committed_at = now, "commitment stored");
        Ok(true)
    }

    /// Whether `digest` is committed and matches the revealed arguments.
    ///
    /// Read-only: repeated calls never consume the commitment.
    pub fn validate(
        &self,
        hasher: &dyn HashPrimitive,
        digest: &Digest,
        name: &str,
        caller: &AccountId,
        payment: Amount,
        lease_duration: Tick,
    ) -> bool {
        self.commitments.contains_key(digest)
            && compute_digest(hasher, name, caller, payment, lease_duration) == *digest
    }

    /// Validate a reveal and hand out the ticket needed to consume it.
    pub fn check_reveal(
        &self,
        hasher: &dyn HashPrimitive,
        digest: &Digest,
        name: &str,
        caller: &AccountId,
        payment: Amount,
        lease_duration: Tick,
    ) -> Result<RevealTicket> {
        if self.validate(hasher, digest, name, caller, payment, lease_duration) {
            Ok(RevealTicket { digest: *digest })
        } else {
            Err(CommitError::InvalidCommitment(*digest))
        }
    }

    /// Remove a validated commitment.
    pub fn consume(&mut self, ticket: RevealTicket) -> Result<Commitment> {
        let commitment = self
            .commitments
            .remove(&ticket.digest)
            .ok_or(CommitError::InvalidCommitment(ticket.digest))?;
        tracing::debug!(digest = %ticket.digest, "commitment consumed");
        Ok(commitment)
    }

    /// Get the stored metadata for a digest.
    pub fn get(&self, digest: &Digest) -> Option<&Commitment> {
        self.commitments.get(digest)
    }

    pub fn contains(&self, digest: &Digest) -> bool {
        self.commitments.contains_key(digest)
    }

    pub fn len(&self) -> usize {
        self.commitments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commitments.is_empty()
    }

    /// Iterate over all stored commitments, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Commitment> {
        self.commitments.values()
    }

    /// The configured duplicate policy.
    pub fn duplicate_policy(&self) -> DuplicateCommitment {
        self.duplicates
    }
}
