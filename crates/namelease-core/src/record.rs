//! Lease record held against a name.

use serde::{Deserialize, Serialize};

use crate::types::{AccountId, Amount, Tick};

/// Lease and escrow state of a single name.
///
/// `Record::default()` is the sentinel state: no owner, no lease, nothing
/// locked. A name that was never claimed and a name whose owner withdrew
/// both look like this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Who holds (or last held) the lease.
    pub owner: AccountId,

    /// First tick at which the lease is no longer active.
    pub expiration: Tick,

    /// Amount escrowed for the current lease term.
    pub locked_balance: Amount,
}

impl Record {
    /// Create a record for a fresh lease term.
    pub fn new(owner: AccountId, expiration: Tick, locked_balance: Amount) -> Self {
        Self {
            owner,
            expiration,
            locked_balance,
        }
    }

    /// Whether the lease is active at `now`.
    pub fn is_active(&self, now: Tick) -> bool {
        !self.owner.is_unowned() && now < self.expiration
    }

    /// Whether this is the sentinel state.
    pub fn is_unowned(&self) -> bool {
        self.owner.is_unowned()
    }

    /// Whether the sentinel invariants hold: an unowned record has neither
    /// expiration nor locked balance.
    pub fn is_consistent(&self) -> bool {
        !self.is_unowned() || (self.expiration == 0 && self.locked_balance == 0)
    }
}
