//! The RegistrationService: the operation surface of the name registry.
//!
//! The service owns the registry and the commitment store, and shares the
//! ledger and clock with the environment. Every mutating operation reads the
//! clock once, validates, settles through the ledger, and only then writes
//! state.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use namelease_commit::{compute_digest, CommitmentStore, DuplicateCommitment};
use namelease_core::{
    AccountId, Amount, Blake3Hasher, Clock, Digest, HashPrimitive, Name, PricingPolicy, Tick,
};
use namelease_ledger::Ledger;
use namelease_registry::{ChangeKind, Ejection, PendingChange, Registry};

use crate::error::{Result, ServiceError};
use crate::snapshot::{ServiceSnapshot, SNAPSHOT_VERSION};

/// Configuration for the RegistrationService.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Price per name byte per tick.
    pub price_per_unit: Amount,
    /// Handling of a digest committed twice.
    pub duplicate_commitments: DuplicateCommitment,
}

impl ServiceConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The pricing policy this configuration describes.
    pub fn pricing(&self) -> PricingPolicy {
        PricingPolicy::new(self.price_per_unit)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            price_per_unit: 10,
            duplicate_commitments: DuplicateCommitment::Reject,
        }
    }
}

/// Result of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: Name,
    pub owner: AccountId,
    pub expiration: Tick,
    /// Amount now escrowed against the name.
    pub locked: Amount,
    /// Excess payment returned to the caller.
    pub refund: Amount,
    /// The previous owner paid out, if the name was expired but still held.
    pub ejected: Option<Ejection>,
}

/// Result of a successful renewal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renewal {
    pub name: Name,
    pub expiration: Tick,
    pub locked: Amount,
    /// Net amount taken from the caller.
    pub charged: Amount,
    /// Amount returned to the caller.
    pub refund: Amount,
}

/// Result of a successful withdrawal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Withdrawal {
    pub name: Name,
    pub owner: AccountId,
    /// The released escrow, paid to the owner.
    pub amount: Amount,
}

/// The name registry.
///
/// Provides:
/// - Read-only queries (resolve, expiration, balances, prices)
/// - Direct registration, renewal and withdrawal
/// - Commit-reveal registration
/// - Snapshots
pub struct RegistrationService<L: Ledger, C: Clock> {
    config: ServiceConfig,
    registry: Registry,
    commitments: CommitmentStore,
    ledger: Arc<L>,
    clock: Arc<C>,
    hasher: Box<dyn HashPrimitive>,
}

impl<L: Ledger, C: Clock> RegistrationService<L, C> {
    /// Create a new service with empty state, hashing commitments with Blake3.
    pub fn new(config: ServiceConfig, ledger: Arc<L>, clock: Arc<C>) -> Self {
        Self {
            registry: Registry::new(config.pricing()),
            commitments: CommitmentStore::new(config.duplicate_commitments),
            config,
            ledger,
            clock,
            hasher: Box::new(Blake3Hasher),
        }
    }

    /// Replace the commitment hash primitive.
    ///
    /// Digests committed under the previous primitive will no longer
    /// validate, so this belongs at construction time.
    pub fn with_hasher(mut self, hasher: impl HashPrimitive + 'static) -> Self {
        self.hasher = Box::new(hasher);
        self
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn commitments(&self) -> &CommitmentStore {
        &self.commitments
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The current tick.
    pub fn now(&self) -> Tick {
        self.clock.now()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// The active owner of `name`, or [`AccountId::UNOWNED`].
    pub fn resolve(&self, name: &str) -> AccountId {
        self.registry.resolve(name, self.now())
    }

    /// Whether `name` has an active lease.
    pub fn is_registered(&self, name: &str) -> bool {
        self.registry.is_active(name, self.now())
    }

    /// Expiration tick of `name`, `0` if it has no record.
    pub fn expiration(&self, name: &str) -> Tick {
        self.registry.expiration(name)
    }

    /// Locked balance of `name`, `0` if it has no record.
    pub fn locked_balance(&self, name: &str) -> Amount {
        self.registry.locked_balance(name)
    }

    /// Price of leasing `name` for `lease_duration` ticks.
    pub fn registry_price(&self, name: &str, lease_duration: Tick) -> Result<Amount> {
        Ok(self.registry.pricing().price(name.len(), lease_duration)?)
    }

    /// The digest to commit before a [`safe_register`](Self::safe_register).
    pub fn compute_digest(
        &self,
        name: &str,
        caller: &AccountId,
        payment: Amount,
        lease_duration: Tick,
    ) -> Digest {
        compute_digest(self.hasher.as_ref(), name, caller, payment, lease_duration)
    }

    /// Whether `digest` is committed and matches the given arguments.
    pub fn validate_commitment(
        &self,
        digest: &Digest,
        name: &str,
        caller: &AccountId,
        payment: Amount,
        lease_duration: Tick,
    ) -> bool {
        self.commitments.validate(
            self.hasher.as_ref(),
            digest,
            name,
            caller,
            payment,
            lease_duration,
        )
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Registration
    // ─────────────────────────────────────────────────────────────────────────

    /// Register `name` for `lease_duration` ticks.
    ///
    /// `payment` is taken from `caller`; everything above the price is
    /// refunded. An expired name still held by someone else is taken over,
    /// and its previous owner receives their locked balance.
    pub fn register(
        &mut self,
        name: &str,
        lease_duration: Tick,
        payment: Amount,
        caller: AccountId,
    ) -> Result<Registration> {
        let name = Name::new(name)?;
        let now = self.now();

        let change = self
            .registry
            .prepare_register(&name, lease_duration, payment, caller, now)?;
        self.finish_register(change)
    }

    /// Renew `name` for `lease_duration` ticks from now.
    ///
    /// Only the owner may renew, also after expiry. The locked balance is
    /// reused: only the difference to the new price is charged, and a
    /// cheaper term refunds the surplus.
    pub fn renew(
        &mut self,
        name: &str,
        lease_duration: Tick,
        payment: Amount,
        caller: AccountId,
    ) -> Result<Renewal> {
        let name = Name::new(name)?;
        let now = self.now();

        let change = self
            .registry
            .prepare_renew(&name, lease_duration, payment, caller, now)?;
        let kind = self.apply(change)?;
        let record = self.registry.record(name.as_str());

        tracing::debug!(
            name = %name,
            expiration = record.expiration,
            charged = %kind.charged(),
            "renewed"
        );

        Ok(Renewal {
            name,
            expiration: record.expiration,
            locked: record.locked_balance,
            charged: kind.charged(),
            refund: kind.refund(),
        })
    }

    /// Release an expired name and pay its locked balance to the owner.
    pub fn withdraw(&mut self, name: &str, caller: AccountId) -> Result<Withdrawal> {
        let name = Name::new(name)?;
        let now = self.now();

        let change = self.registry.prepare_withdraw(&name, caller, now)?;
        let kind = self.apply(change)?;

        tracing::debug!(name = %name, owner = %caller, amount = %kind.refund(), "withdrawn");

        Ok(Withdrawal {
            name,
            owner: caller,
            amount: kind.refund(),
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Commit-reveal
    // ─────────────────────────────────────────────────────────────────────────

    /// Commit to a registration without revealing the name.
    pub fn register_commitment(&mut self, digest: Digest) -> Result<()> {
        let now = self.now();
        self.commitments.register(digest, now)?;
        Ok(())
    }

    /// Reveal a commitment and register the name it hides.
    ///
    /// The commitment is consumed only if the registration goes through.
    pub fn safe_register(
        &mut self,
        digest: Digest,
        name: &str,
        lease_duration: Tick,
        payment: Amount,
        caller: AccountId,
    ) -> Result<Registration> {
        let ticket = match self.commitments.check_reveal(
            self.hasher.as_ref(),
            &digest,
            name,
            &caller,
            payment,
            lease_duration,
        ) {
            Ok(ticket) => ticket,
            Err(e) => {
                tracing::warn!(%digest, caller = %caller, "rejected reveal");
                return Err(e.into());
            }
        };

        let name = Name::new(name)?;
        let now = self.now();
        let change = self
            .registry
            .prepare_register(&name, lease_duration, payment, caller, now)?;

        let registration = self.finish_register(change)?;
        self.commitments.consume(ticket)?;
        Ok(registration)
    }

    fn finish_register(&mut self, change: PendingChange) -> Result<Registration> {
        let name = change.name().clone();
        let kind = self.apply(change)?;
        let record = self.registry.record(name.as_str());

        tracing::debug!(
            name = %name,
            owner = %record.owner,
            expiration = record.expiration,
            locked = %record.locked_balance,
            "registered"
        );

        Ok(Registration {
            name,
            owner: record.owner,
            expiration: record.expiration,
            locked: record.locked_balance,
            refund: kind.refund(),
            ejected: kind.ejected(),
        })
    }

    /// Settle a prepared change through the ledger and apply it.
    fn apply(&mut self, change: PendingChange) -> Result<ChangeKind> {
        let ledger = &self.ledger;
        self.registry
            .commit(change, |settlement| Ok(ledger.settle(settlement)?))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Snapshots
    // ─────────────────────────────────────────────────────────────────────────

    /// Export records and commitments.
    pub fn snapshot(&self) -> ServiceSnapshot {
        ServiceSnapshot::new(
            self.now(),
            self.registry
                .records()
                .map(|(name, record)| (name.clone(), *record))
                .collect(),
            self.commitments.iter().copied().collect(),
        )
    }

    /// Rebuild a service from a snapshot.
    ///
    /// The ledger must already hold the escrow the snapshot's records lock,
    /// and the clock must not be behind the tick the snapshot was taken at.
    /// Duplicate or unowned records are rejected.
    ///
    /// The restored service hashes commitments with Blake3. A service that
    /// committed under another [`HashPrimitive`] must reapply it with
    /// [`with_hasher`](Self::with_hasher), or its restored commitments will
    /// not validate.
    pub fn restore(
        config: ServiceConfig,
        ledger: Arc<L>,
        clock: Arc<C>,
        snapshot: ServiceSnapshot,
    ) -> Result<Self> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(ServiceError::InvalidSnapshot(format!(
                "unsupported snapshot version: {}",
                snapshot.version
            )));
        }

        let now = clock.now();
        if snapshot.taken_at > now {
            return Err(ServiceError::InvalidSnapshot(format!(
                "snapshot taken at tick {} is ahead of the clock at {}",
                snapshot.taken_at, now
            )));
        }

        let registry = Registry::from_records(config.pricing(), snapshot.records)?;
        let commitments =
            CommitmentStore::from_commitments(config.duplicate_commitments, snapshot.commitments);

        let service = Self {
            config,
            registry,
            commitments,
            ledger,
            clock,
            hasher: Box::new(Blake3Hasher),
        };
        service.check_escrow()?;
        Ok(service)
    }

    /// Verify that the ledger's escrow equals the sum of locked balances.
    pub fn check_escrow(&self) -> Result<()> {
        let locked = self.registry.total_locked()?;
        let escrow = self.ledger.escrow_balance()?;
        if locked != escrow {
            tracing::warn!(locked = %locked, escrow = %escrow, "escrow mismatch");
            return Err(ServiceError::EscrowMismatch { locked, escrow });
        }
        Ok(())
    }
}
