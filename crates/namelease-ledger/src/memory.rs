//! In-memory implementation of the Ledger trait.
//!
//! Balances live in a map behind an `RwLock`. All data is lost when the
//! ledger is dropped.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use namelease_core::{AccountId, Amount, Party, Settlement, Transfer};

use crate::error::{LedgerError, Result};
use crate::traits::Ledger;

/// In-memory ledger.
pub struct MemoryLedger {
    inner: RwLock<MemoryLedgerInner>,
}

#[derive(Default)]
struct MemoryLedgerInner {
    /// Account balances. Absent accounts hold zero.
    balances: HashMap<AccountId, Amount>,

    /// Value held in escrow.
    escrow: Amount,

    /// Every applied transfer, in order.
    history: Vec<Transfer>,
}

impl MemoryLedgerInner {
    fn balance_of(&self, party: Party) -> Amount {
        match party {
            Party::Account(id) => self.balances.get(&id).copied().unwrap_or(0),
            Party::Escrow => self.escrow,
        }
    }
}

impl MemoryLedger {
    /// Create a new empty ledger.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryLedgerInner::default()),
        }
    }

    /// Mint `amount` into `account`. Genesis and test funding only.
    pub fn fund(&self, account: AccountId, amount: Amount) -> Result<Amount> {
        let mut inner = self.write()?;
        let balance = inner.balances.entry(account).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow(Party::Account(account)))?;
        Ok(*balance)
    }

    /// Sum of every account balance plus escrow.
    pub fn total_supply(&self) -> Result<Amount> {
        let inner = self.read()?;
        inner
            .balances
            .values()
            .try_fold(inner.escrow, |acc, b| acc.checked_add(*b))
            .ok_or(LedgerError::BalanceOverflow(Party::Escrow))
    }

    /// Every transfer applied so far.
    pub fn history(&self) -> Result<Vec<Transfer>> {
        Ok(self.read()?.history.clone())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryLedgerInner>> {
        self.inner.read().map_err(|_| LedgerError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryLedgerInner>> {
        self.inner.write().map_err(|_| LedgerError::LockPoisoned)
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger for MemoryLedger {
    fn balance(&self, account: &AccountId) -> Result<Amount> {
        Ok(self.read()?.balance_of(Party::Account(*account)))
    }

    fn escrow_balance(&self) -> Result<Amount> {
        Ok(self.read()?.escrow)
    }

    fn settle(&self, settlement: &Settlement) -> Result<()> {
        if settlement.is_empty() {
            return Ok(());
        }

        let mut inner = self.write()?;

        // Apply against a scratch view of the touched parties first
        let mut scratch: HashMap<Party, Amount> = HashMap::new();
        for transfer in settlement.transfers() {
            let available = *scratch
                .entry(transfer.from)
                .or_insert_with(|| inner.balance_of(transfer.from));
            let remaining =
                available
                    .checked_sub(transfer.amount)
                    .ok_or(LedgerError::InsufficientFunds {
                        party: transfer.from,
                        needed: transfer.amount,
                        available,
                    })?;
            scratch.insert(transfer.from, remaining);

            let target = scratch
                .entry(transfer.to)
                .or_insert_with(|| inner.balance_of(transfer.to));
            *target = target
                .checked_add(transfer.amount)
                .ok_or(LedgerError::BalanceOverflow(transfer.to))?;
        }

        for (party, balance) in scratch {
            match party {
                Party::Account(id) => {
                    inner.balances.insert(id, balance);
                }
                Party::Escrow => inner.escrow = balance,
            }
        }
        inner.history.extend_from_slice(settlement.transfers());

        tracing::trace!(
            transfers = settlement.transfers().len(),
            escrow = %inner.escrow,
            "settlement applied"
        );
        Ok(())
    }
}
