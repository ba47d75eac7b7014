//! Prepared, not yet applied, registry changes.

use namelease_core::{AccountId, Amount, Name, Record, Settlement};

/// An expired owner's escrow paid out by a new registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ejection {
    /// The displaced owner.
    pub owner: AccountId,
    /// Their locked balance, paid back in full.
    pub amount: Amount,
}

/// Which operation produced a change, with its accounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeKind {
    Register {
        cost: Amount,
        refund: Amount,
        ejected: Option<Ejection>,
    },
    Renew {
        /// Net amount taken from the caller (0 when the new term is cheaper).
        charged: Amount,
        refund: Amount,
    },
    Withdraw {
        amount: Amount,
    },
}

impl ChangeKind {
    /// Amount paid out to the caller.
    pub fn refund(&self) -> Amount {
        match self {
            ChangeKind::Register { refund, .. } | ChangeKind::Renew { refund, .. } => *refund,
            ChangeKind::Withdraw { amount } => *amount,
        }
    }

    /// Amount newly taken from the caller into escrow.
    pub fn charged(&self) -> Amount {
        match self {
            ChangeKind::Register { cost, .. } => *cost,
            ChangeKind::Renew { charged, .. } => *charged,
            ChangeKind::Withdraw { .. } => 0,
        }
    }

    /// The displaced owner, for registrations over an expired lease.
    pub fn ejected(&self) -> Option<Ejection> {
        match self {
            ChangeKind::Register { ejected, .. } => *ejected,
            _ => None,
        }
    }
}

/// A validated transition awaiting settlement.
///
/// Produced by the registry's `prepare_*` methods and consumed by
/// [`Registry::commit`](crate::Registry::commit).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingChange {
    pub(crate) name: Name,
    pub(crate) revision: u64,
    pub(crate) next: Option<Record>,
    pub(crate) settlement: Settlement,
    pub(crate) kind: ChangeKind,
}

impl PendingChange {
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The record after the change, `None` when the name is released.
    pub fn next(&self) -> Option<&Record> {
        self.next.as_ref()
    }

    pub fn settlement(&self) -> &Settlement {
        &self.settlement
    }

    pub fn kind(&self) -> &ChangeKind {
        &self.kind
    }
}
