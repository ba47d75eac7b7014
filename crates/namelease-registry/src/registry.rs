//! Registry state: name → lease record.
//!
//! Only owned records are stored. Withdrawal removes the entry, so an absent
//! name and a released name are indistinguishable, which is exactly the
//! sentinel state callers observe.

use std::collections::HashMap;

use namelease_core::{AccountId, Amount, CoreError, Name, PricingPolicy, Record, Settlement, Tick};

use crate::change::{ChangeKind, Ejection, PendingChange};
use crate::error::{RegistryError, Result};

/// Lease lifecycle and escrow accounting for every name.
#[derive(Debug)]
pub struct Registry {
    pricing: PricingPolicy,

    /// Owned records. Never contains a sentinel owner.
    records: HashMap<Name, Record>,

    /// Bumped on every committed change.
    revision: u64,
}

impl Registry {
    /// Create an empty registry priced by `pricing`.
    pub fn new(pricing: PricingPolicy) -> Self {
        Self {
            pricing,
            records: HashMap::new(),
            revision: 0,
        }
    }

    /// Rebuild a registry from previously exported records.
    ///
    /// Rejects sentinel owners and names that appear more than once.
    pub fn from_records(
        pricing: PricingPolicy,
        records: impl IntoIterator<Item = (Name, Record)>,
    ) -> Result<Self> {
        let mut registry = Self::new(pricing);
        for (name, record) in records {
            if record.is_unowned() {
                return Err(RegistryError::InvalidAccount);
            }
            if registry.records.contains_key(name.as_str()) {
                return Err(RegistryError::DuplicateRecord(name));
            }
            registry.records.insert(name, record);
        }
        Ok(registry)
    }

    pub fn pricing(&self) -> &PricingPolicy {
        &self.pricing
    }

    /// Current revision. Changes prepared at an older revision are stale.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// The owner if the lease is active at `now`, else [`AccountId::UNOWNED`].
    pub fn resolve(&self, name: &str, now: Tick) -> AccountId {
        match self.records.get(name) {
            Some(record) if record.is_active(now) => record.owner,
            _ => AccountId::UNOWNED,
        }
    }

    /// Whether the name has an active lease at `now`.
    pub fn is_active(&self, name: &str, now: Tick) -> bool {
        self.records
            .get(name)
            .map(|r| r.is_active(now))
            .unwrap_or(false)
    }

    /// Expiration tick, `0` if the name has no record.
    pub fn expiration(&self, name: &str) -> Tick {
        self.records.get(name).map(|r| r.expiration).unwrap_or(0)
    }

    /// Locked balance, `0` if the name has no record.
    pub fn locked_balance(&self, name: &str) -> Amount {
        self.records.get(name).map(|r| r.locked_balance).unwrap_or(0)
    }

    /// The record for a name, or the sentinel record.
    pub fn record(&self, name: &str) -> Record {
        self.records.get(name).copied().unwrap_or_default()
    }

    /// Iterate over all owned records, in no particular order.
    pub fn records(&self) -> impl Iterator<Item = (&Name, &Record)> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of every locked balance. Equals the escrow held by the ledger.
    pub fn total_locked(&self) -> Result<Amount> {
        self.records
            .values()
            .try_fold(0 as Amount, |acc, r| acc.checked_add(r.locked_balance))
            .ok_or(RegistryError::Core(CoreError::AmountOverflow))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Prepare
    // ─────────────────────────────────────────────────────────────────────────

    /// Validate a registration and compute its effects.
    ///
    /// An expired record still held by its owner is ejected: its locked
    /// balance is paid back to that owner in the same settlement that locks
    /// the new payment. Payment is checked before the ejection is planned.
    pub fn prepare_register(
        &self,
        name: &Name,
        lease_duration: Tick,
        payment: Amount,
        caller: AccountId,
        now: Tick,
    ) -> Result<PendingChange> {
        if caller.is_unowned() {
            return Err(RegistryError::InvalidAccount);
        }

        let existing = self.records.get(name.as_str());
        if existing.map(|r| r.is_active(now)).unwrap_or(false) {
            return Err(RegistryError::AlreadyRegistered(name.clone()));
        }

        let cost = self.pricing.price_for(name, lease_duration)?;
        if payment < cost {
            return Err(RegistryError::InsufficientPayment {
                required: cost,
                paid: payment,
            });
        }
        let expiration = lease_end(now, lease_duration)?;
        let refund = payment - cost;

        let ejected = existing.map(|r| Ejection {
            owner: r.owner,
            amount: r.locked_balance,
        });

        let mut settlement = Settlement::new();
        settlement.deposit(caller, payment);
        if let Some(ejection) = &ejected {
            settlement.payout(ejection.owner, ejection.amount);
        }
        settlement.payout(caller, refund);

        Ok(PendingChange {
            name: name.clone(),
            revision: self.revision,
            next: Some(Record::new(caller, expiration, cost)),
            settlement,
            kind: ChangeKind::Register {
                cost,
                refund,
                ejected,
            },
        })
    }

    /// Validate a renewal and compute its effects.
    ///
    /// The owner keeps renewal rights after expiry until they withdraw or
    /// someone else registers the name. The locked balance is topped up to
    /// the new price, or the surplus is refunded when the new term is cheaper.
    pub fn prepare_renew(
        &self,
        name: &Name,
        lease_duration: Tick,
        payment: Amount,
        caller: AccountId,
        now: Tick,
    ) -> Result<PendingChange> {
        let record = self.owned_record(name, caller)?;

        let target = self.pricing.price_for(name, lease_duration)?;
        let (charged, refund) = if target > record.locked_balance {
            let delta = target - record.locked_balance;
            if payment < delta {
                return Err(RegistryError::InsufficientPayment {
                    required: delta,
                    paid: payment,
                });
            }
            (delta, payment - delta)
        } else {
            let surplus = record.locked_balance - target;
            let refund = payment
                .checked_add(surplus)
                .ok_or(RegistryError::Core(CoreError::AmountOverflow))?;
            (0, refund)
        };
        let expiration = lease_end(now, lease_duration)?;

        let mut settlement = Settlement::new();
        settlement.deposit(caller, payment).payout(caller, refund);

        Ok(PendingChange {
            name: name.clone(),
            revision: self.revision,
            next: Some(Record::new(caller, expiration, target)),
            settlement,
            kind: ChangeKind::Renew { charged, refund },
        })
    }

    /// Validate a withdrawal and compute its effects.
    pub fn prepare_withdraw(&self, name: &Name, caller: AccountId, now: Tick) -> Result<PendingChange> {
        let record = self.owned_record(name, caller)?;

        if now < record.expiration {
            return Err(RegistryError::BalanceLocked {
                name: name.clone(),
                expires_at: record.expiration,
            });
        }

        let mut settlement = Settlement::new();
        settlement.payout(caller, record.locked_balance);

        Ok(PendingChange {
            name: name.clone(),
            revision: self.revision,
            next: None,
            settlement,
            kind: ChangeKind::Withdraw {
                amount: record.locked_balance,
            },
        })
    }

    fn owned_record(&self, name: &Name, caller: AccountId) -> Result<&Record> {
        let record = self
            .records
            .get(name.as_str())
            .ok_or_else(|| RegistryError::NotFound(name.clone()))?;
        if record.owner != caller {
            return Err(RegistryError::NotOwner(name.clone()));
        }
        Ok(record)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Commit
    // ─────────────────────────────────────────────────────────────────────────

    /// Settle and apply a prepared change.
    ///
    /// `settle` receives the change's settlement; the record is written only
    /// if it returns `Ok`. A change prepared before another commit is
    /// rejected as stale before `settle` runs.
    pub fn commit<F, E>(&mut self, change: PendingChange, settle: F) -> std::result::Result<ChangeKind, E>
    where
        F: FnOnce(&Settlement) -> std::result::Result<(), E>,
        E: From<RegistryError>,
    {
        if change.revision != self.revision {
            return Err(RegistryError::StaleChange {
                name: change.name,
                prepared: change.revision,
                current: self.revision,
            }
            .into());
        }

        settle(&change.settlement)?;

        if let ChangeKind::Register {
            ejected: Some(ejection),
            ..
        } = &change.kind
        {
            tracing::debug!(
                name = %change.name,
                owner = %ejection.owner,
                amount = %ejection.amount,
                "ejected expired owner"
            );
        }

        match change.next {
            Some(record) => {
                self.records.insert(change.name, record);
            }
            None => {
                self.records.remove(change.name.as_str());
            }
        }
        self.revision += 1;

        Ok(change.kind)
    }
}

fn lease_end(now: Tick, lease_duration: Tick) -> Result<Tick> {
    now.checked_add(lease_duration).ok_or(RegistryError::Core(CoreError::TickOverflow {
        now,
        duration: lease_duration,
    }))
}
