//! Settlements: the transfers a registry change asks the ledger to make.
//!
//! Every accepted payment is deposited into escrow and whatever is not
//! locked is paid back out in the same settlement. The registry never holds
//! value outside its locked balances.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{AccountId, Amount};

/// One side of a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Party {
    /// A participant account.
    Account(AccountId),
    /// The registry's escrow.
    Escrow,
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Party::Account(id) => write!(f, "account {}", id),
            Party::Escrow => f.write_str("escrow"),
        }
    }
}

/// A single value movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub amount: Amount,
    pub from: Party,
    pub to: Party,
}

/// An ordered batch of transfers, applied atomically by the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    transfers: Vec<Transfer>,
}

impl Settlement {
    /// Create an empty settlement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `amount` from `account` into escrow.
    pub fn deposit(&mut self, account: AccountId, amount: Amount) -> &mut Self {
        self.push(Party::Account(account), Party::Escrow, amount)
    }

    /// Move `amount` from escrow to `account`.
    pub fn payout(&mut self, account: AccountId, amount: Amount) -> &mut Self {
        self.push(Party::Escrow, Party::Account(account), amount)
    }

    fn push(&mut self, from: Party, to: Party, amount: Amount) -> &mut Self {
        if amount > 0 {
            self.transfers.push(Transfer { amount, from, to });
        }
        self
    }

    /// The transfers in application order.
    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }

    /// Net change of `party`'s balance once the settlement is applied.
    ///
    /// Returns `None` if the net does not fit in an `i128`.
    pub fn net_change(&self, party: Party) -> Option<i128> {
        self.transfers.iter().try_fold(0i128, |net, t| {
            let amount = i128::try_from(t.amount).ok()?;
            let net = if t.to == party {
                net.checked_add(amount)?
            } else {
                net
            };
            if t.from == party {
                net.checked_sub(amount)
            } else {
                Some(net)
            }
        })
    }
}
